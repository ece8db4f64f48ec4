// ==========================================
// 导入行解析器
// ==========================================
// 职责: 平台回传表格的一行 → SKU + 字段变更
// 红线: 解析不访问仓储；单元格一律按去空白文本读取
// ==========================================

use crate::domain::{meta_keys, MarketplaceTarget, ProductChanges};
use crate::engine::layout::{import_start_row, texts};
use crate::sheet::Worksheet;

/// 解析结果（尚未匹配商品）
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub row_number: u32,
    /// 去空白后的 SKU；空串表示缺失
    pub sku: String,
    /// 仅用于日志
    pub display_name: String,
    pub changes: ProductChanges,
}

// ==========================================
// RowParser Trait
// ==========================================
pub trait RowParser: Send + Sync {
    fn target(&self) -> MarketplaceTarget;

    /// 数据起始行（1 起始）
    fn start_row(&self) -> u32 {
        import_start_row(self.target()).unwrap_or(1)
    }

    fn parse_row(&self, sheet: &Worksheet, row: u32) -> ParsedRow;
}

/// 导入目标 → 解析器；导出目标返回 None
pub fn parser_for(target: MarketplaceTarget) -> Option<Box<dyn RowParser>> {
    match target {
        MarketplaceTarget::TokopediaImport => Some(Box::new(TokopediaRowParser)),
        MarketplaceTarget::BlibliImport => Some(Box::new(BlibliRowParser)),
        _ => None,
    }
}

/// 数值文本 → f64（非数值、空白、非有限值返回 None）
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 库存文本 → 整数（截断小数；非数值为 0）
pub fn parse_stock(text: &str) -> i64 {
    parse_numeric(text).map(|v| v.trunc() as i64).unwrap_or(0)
}

// ==========================================
// Tokopedia: C 名称 / D 链接 / F 库存 / H 价格 / K SKU / M 重量
// ==========================================
pub struct TokopediaRowParser;

impl TokopediaRowParser {
    const COL_NAME: u32 = 3;
    const COL_LINK: u32 = 4;
    const COL_STOCK: u32 = 6;
    const COL_PRICE: u32 = 8;
    const COL_SKU: u32 = 11;
    const COL_WEIGHT: u32 = 13;
}

impl RowParser for TokopediaRowParser {
    fn target(&self) -> MarketplaceTarget {
        MarketplaceTarget::TokopediaImport
    }

    fn parse_row(&self, sheet: &Worksheet, row: u32) -> ParsedRow {
        let mut changes = ProductChanges::default();

        // 库存仅在大于 0 时更新
        let stock = parse_stock(&sheet.cell_text(Self::COL_STOCK, row));
        if stock > 0 {
            changes.stock_quantity = Some(stock);
        }

        // 重量总是写入；空白或非数值清空
        changes.weight = Some(parse_numeric(&sheet.cell_text(Self::COL_WEIGHT, row)));

        changes.set_meta(
            meta_keys::TOKOPEDIA_PRICE,
            sheet.cell_text(Self::COL_PRICE, row),
        );
        changes.set_meta(
            meta_keys::TOKOPEDIA_MARKER,
            sheet.cell_text(Self::COL_LINK, row),
        );

        ParsedRow {
            row_number: row,
            sku: sheet.cell_text(Self::COL_SKU, row),
            display_name: sheet.cell_text(Self::COL_NAME, row),
            changes,
        }
    }
}

// ==========================================
// Blibli: A 商品编码 / E 名称 / F SKU / G 价格 / I 库存
// ==========================================
pub struct BlibliRowParser;

impl BlibliRowParser {
    const COL_CODE: u32 = 1;
    const COL_NAME: u32 = 5;
    const COL_SKU: u32 = 6;
    const COL_PRICE: u32 = 7;
    const COL_STOCK: u32 = 9;
}

impl RowParser for BlibliRowParser {
    fn target(&self) -> MarketplaceTarget {
        MarketplaceTarget::BlibliImport
    }

    fn parse_row(&self, sheet: &Worksheet, row: u32) -> ParsedRow {
        let sku = sheet.cell_text(Self::COL_SKU, row);
        let mut changes = ProductChanges {
            stock_quantity: Some(parse_stock(&sheet.cell_text(Self::COL_STOCK, row))),
            sku: Some(sku.clone()),
            ..ProductChanges::default()
        };

        changes.set_meta(
            meta_keys::BLIBLI_PRICE,
            sheet.cell_text(Self::COL_PRICE, row),
        );
        changes.set_meta(
            meta_keys::BLIBLI_MARKER,
            format!(
                "{}{}",
                texts::BLIBLI_PRODUCT_URL_PREFIX,
                sheet.cell_text(Self::COL_CODE, row)
            ),
        );

        ParsedRow {
            row_number: row,
            sku,
            display_name: sheet.cell_text(Self::COL_NAME, row),
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::column_index;

    #[test]
    fn test_column_constants_match_letters() {
        assert_eq!(column_index("C"), Some(TokopediaRowParser::COL_NAME));
        assert_eq!(column_index("K"), Some(TokopediaRowParser::COL_SKU));
        assert_eq!(column_index("M"), Some(TokopediaRowParser::COL_WEIGHT));
        assert_eq!(column_index("F"), Some(BlibliRowParser::COL_SKU));
        assert_eq!(column_index("I"), Some(BlibliRowParser::COL_STOCK));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 12 "), Some(12.0));
        assert_eq!(parse_numeric("1.5"), Some(1.5));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_stock("7.9"), 7);
        assert_eq!(parse_stock("n/a"), 0);
    }

    #[test]
    fn test_tokopedia_row() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell(3, 4, "Tas Gucci").unwrap();
        sheet.set_cell(4, 4, "https://tokopedia.com/x").unwrap();
        sheet.set_cell(6, 4, 2.0).unwrap();
        sheet.set_cell(8, 4, 1_200_000.0).unwrap();
        sheet.set_cell(11, 4, " SKU-9 ").unwrap();
        sheet.set_cell(13, 4, 1.5).unwrap();

        let parsed = TokopediaRowParser.parse_row(&sheet, 4);
        assert_eq!(parsed.sku, "SKU-9");
        assert_eq!(parsed.display_name, "Tas Gucci");
        assert_eq!(parsed.changes.stock_quantity, Some(2));
        assert_eq!(parsed.changes.weight, Some(Some(1.5)));
        assert_eq!(parsed.changes.sku, None);
        assert_eq!(
            parsed.changes.meta,
            vec![
                (meta_keys::TOKOPEDIA_PRICE.to_string(), "1200000".to_string()),
                (
                    meta_keys::TOKOPEDIA_MARKER.to_string(),
                    "https://tokopedia.com/x".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_tokopedia_zero_stock_and_blank_weight() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell(6, 4, "0").unwrap();
        sheet.set_cell(11, 4, "SKU-1").unwrap();

        let parsed = TokopediaRowParser.parse_row(&sheet, 4);
        assert_eq!(parsed.changes.stock_quantity, None);
        assert_eq!(parsed.changes.weight, Some(None));
    }

    #[test]
    fn test_blibli_row() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell(1, 2, "ABC-123").unwrap();
        sheet.set_cell(5, 2, "Tas Prada").unwrap();
        sheet.set_cell(6, 2, "SKU-2").unwrap();
        sheet.set_cell(7, 2, "900000").unwrap();
        sheet.set_cell(9, 2, "0").unwrap();

        let parser = BlibliRowParser;
        assert_eq!(parser.start_row(), 2);
        let parsed = parser.parse_row(&sheet, 2);
        assert_eq!(parsed.changes.stock_quantity, Some(0));
        assert_eq!(parsed.changes.sku, Some("SKU-2".to_string()));
        assert_eq!(
            parsed.changes.meta[1].1,
            "https://www.blibli.com/p/product-detail/ps--ABC-123"
        );
    }

    #[test]
    fn test_parser_for() {
        assert!(parser_for(MarketplaceTarget::TokopediaImport).is_some());
        assert!(parser_for(MarketplaceTarget::BlibliExport).is_none());
        assert_eq!(
            parser_for(MarketplaceTarget::TokopediaImport)
                .unwrap()
                .start_row(),
            4
        );
    }
}
