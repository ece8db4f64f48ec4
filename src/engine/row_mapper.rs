// ==========================================
// 导出行映射器
// ==========================================
// 职责: 商品 → 固定列数的单元格序列（每个导出目标一个实现）
// 红线: 输出列数与图片数量无关；映射过程不访问仓储
// ==========================================

use crate::domain::{MarketplaceTarget, Product};
use crate::engine::brand_codes::brand_code;
use crate::engine::layout::{
    layout_for, texts, ColumnLayout, BLIBLI_LAYOUT, BLIBLI_SALE_LAYOUT, TOKOPEDIA_LAYOUT,
};
use crate::engine::pricing::{
    blibli_effective_price, blibli_regular_price, tokopedia_price, BlibliSaleRule,
};
use crate::sheet::CellValue;

// ==========================================
// RowMapper Trait
// ==========================================
pub trait RowMapper: Send + Sync {
    /// 列布局（起始行、列数）
    fn layout(&self) -> &'static ColumnLayout;

    /// 映射单个商品；返回长度恒为 layout().column_count
    fn map_row(&self, product: &Product) -> Vec<CellValue>;

    /// 已在对应平台上架（标记非空）的商品跳过
    fn should_skip(&self, product: &Product) -> bool {
        product.is_listed_on(self.layout().target.marketplace())
    }
}

/// 导出目标 → 映射器；导入目标返回 None
pub fn mapper_for(target: MarketplaceTarget) -> Option<Box<dyn RowMapper>> {
    layout_for(target)?;
    match target {
        MarketplaceTarget::TokopediaExport => Some(Box::new(TokopediaRowMapper)),
        MarketplaceTarget::BlibliExport => Some(Box::new(BlibliRowMapper)),
        MarketplaceTarget::BlibliExportSaleOnly => Some(Box::new(BlibliSaleRowMapper)),
        _ => None,
    }
}

// ==========================================
// Tokopedia
// ==========================================
pub struct TokopediaRowMapper;

impl RowMapper for TokopediaRowMapper {
    fn layout(&self) -> &'static ColumnLayout {
        &TOKOPEDIA_LAYOUT
    }

    fn map_row(&self, product: &Product) -> Vec<CellValue> {
        let description = format!(
            "{}{}{}",
            texts::tokopedia_preamble(),
            product.description,
            texts::tokopedia_postamble()
        );

        let mut row = vec![
            CellValue::Empty,                                // A
            product.formatted_name().into(),                 // B
            description.into(),                              // C
            texts::TOKOPEDIA_CATEGORY.into(),                // D
            product.weight.into(),                           // E
            "1".into(),                                      // F
            brand_code(product.brand.as_deref()).into(),     // G
            CellValue::Empty,                                // H
            texts::CONDITION_USED.into(),                    // I
            product.image_url.as_deref().into(),             // J
        ];
        row.extend(gallery_cells(product, TOKOPEDIA_LAYOUT.gallery_slots)); // K-N
        row.extend([
            product.sku.as_deref().into(),                   // O
            texts::STATUS_INACTIVE.into(),                   // P
            "1".into(),                                      // Q
            tokopedia_price(product.regular_price).into(),   // R
            CellValue::Empty,                                // S
            texts::OPTIONAL.into(),                          // T
        ]);

        debug_assert_eq!(row.len(), TOKOPEDIA_LAYOUT.column_count);
        row
    }
}

// ==========================================
// Blibli 主表
// ==========================================
pub struct BlibliRowMapper;

impl RowMapper for BlibliRowMapper {
    fn layout(&self) -> &'static ColumnLayout {
        &BLIBLI_LAYOUT
    }

    fn map_row(&self, product: &Product) -> Vec<CellValue> {
        let description = format!(
            "{}{}{}",
            texts::blibli_preamble(),
            blibli_description(&product.description),
            texts::blibli_postamble()
        );

        let mut row = vec![
            product.formatted_name().into(),                 // A
            CellValue::Empty,                                // B
            product.sku.as_deref().into(),                   // C
            description.into(),                              // D
            CellValue::Empty,                                // E
            texts::BLIBLI_BRAND_LABEL.into(),                // F
        ];
        row.extend(blanks(5));                               // G-K
        row.push(product.image_url.as_deref().into());       // L
        row.extend(gallery_cells(product, BLIBLI_LAYOUT.gallery_slots)); // M-R
        row.extend([
            CellValue::Empty,                                // S
            texts::BLIBLI_SHIPPING.into(),                   // T
            texts::BLIBLI_STORE.into(),                      // U
            product.length.into(),                           // V
            product.width.into(),                            // W
            product.height.into(),                           // X
            product.weight.into(),                           // Y
            blibli_regular_price(product.regular_price).into(), // Z
            blibli_effective_price(product, BlibliSaleRule::MainSheet).into(), // AA
            "1".into(),                                      // AB
            "1".into(),                                      // AC
            "0".into(),                                      // AD
        ]);
        row.extend(blanks(9));                               // AE-AM

        debug_assert_eq!(row.len(), BLIBLI_LAYOUT.column_count);
        row
    }
}

// ==========================================
// Blibli 促销专表
// ==========================================
pub struct BlibliSaleRowMapper;

impl RowMapper for BlibliSaleRowMapper {
    fn layout(&self) -> &'static ColumnLayout {
        &BLIBLI_SALE_LAYOUT
    }

    fn map_row(&self, product: &Product) -> Vec<CellValue> {
        vec![
            product.sku.as_deref().into(),                   // A
            CellValue::Empty,                                // B
            product.formatted_name().into(),                 // C
            blibli_regular_price(product.regular_price).into(), // D
            blibli_effective_price(product, BlibliSaleRule::SaleOnlySheet).into(), // E
            "1".into(),                                      // F
            CellValue::Empty,                                // G
            CellValue::Empty,                                // H
        ]
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn blanks(n: usize) -> impl Iterator<Item = CellValue> {
    std::iter::repeat(CellValue::Empty).take(n)
}

/// 前 slots 张图库图片，不足补空，超出截断
fn gallery_cells(product: &Product, slots: usize) -> Vec<CellValue> {
    (0..slots)
        .map(|i| product.gallery_urls.get(i).map(String::as_str).into())
        .collect()
}

/// Blibli 描述: trim → 换行前插入 `<br />` → 连续空白折叠为一个空格
pub fn blibli_description(raw: &str) -> String {
    collapse_whitespace(&html_line_breaks(raw.trim()))
}

/// 在每个换行序列（\r\n、\n\r、\n、\r）前插入 `<br />`
fn html_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                out.push_str("<br />");
                out.push(c);
                let pair = if c == '\r' { '\n' } else { '\r' };
                if chars.peek() == Some(&pair) {
                    out.push(pair);
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// ASCII 空白（空格、\t、\n、\r、\x0B、\x0C）连续出现时折叠为一个空格
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
