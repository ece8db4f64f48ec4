// ==========================================
// 平台列布局（静态配置）
// ==========================================
// 每个导出目标: 数据起始行 + 固定列数 + 固定文案
// 模板中起始行以上为表头，引擎不触碰
// ==========================================

use crate::domain::MarketplaceTarget;

/// 列布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub target: MarketplaceTarget,
    /// 第一行数据所在行（1 起始）
    pub start_row: u32,
    /// 每行输出的列数（与图片数量无关）
    pub column_count: usize,
    /// 图库图片槽位数
    pub gallery_slots: usize,
}

pub const TOKOPEDIA_LAYOUT: ColumnLayout = ColumnLayout {
    target: MarketplaceTarget::TokopediaExport,
    start_row: 4,
    column_count: 20,
    gallery_slots: 4,
};

pub const BLIBLI_LAYOUT: ColumnLayout = ColumnLayout {
    target: MarketplaceTarget::BlibliExport,
    start_row: 5,
    column_count: 39,
    gallery_slots: 6,
};

pub const BLIBLI_SALE_LAYOUT: ColumnLayout = ColumnLayout {
    target: MarketplaceTarget::BlibliExportSaleOnly,
    start_row: 12,
    column_count: 8,
    gallery_slots: 0,
};

/// 导出目标的列布局；导入目标返回 None
pub fn layout_for(target: MarketplaceTarget) -> Option<&'static ColumnLayout> {
    match target {
        MarketplaceTarget::TokopediaExport => Some(&TOKOPEDIA_LAYOUT),
        MarketplaceTarget::BlibliExport => Some(&BLIBLI_LAYOUT),
        MarketplaceTarget::BlibliExportSaleOnly => Some(&BLIBLI_SALE_LAYOUT),
        MarketplaceTarget::TokopediaImport | MarketplaceTarget::BlibliImport => None,
    }
}

/// 导入数据起始行
pub fn import_start_row(target: MarketplaceTarget) -> Option<u32> {
    match target {
        MarketplaceTarget::TokopediaImport => Some(4),
        MarketplaceTarget::BlibliImport => Some(2),
        _ => None,
    }
}

// ==========================================
// 固定文案
// ==========================================

pub mod texts {
    const DISCLAIMER: &str = "Due to the nature of online sales, the color of the image photograph and the actual product may differ slightly depending on the monitor environment of the personal computer or smartphone that is being used by customers, shooting, image quality and so on.";

    const REMINDER: &str = "REMINDER: Teliti sebelum membeli, untuk foto & keterangan lebih lengkap silahkan hubungi kami melalui chat";

    const WEBSITE: &str = "More Detail Please Visit Our Website - https://secondchancebag.com";

    /// Tokopedia 描述前缀（纯文本换行）
    pub fn tokopedia_preamble() -> String {
        format!("{}\n\n", REMINDER)
    }

    /// Tokopedia 描述后缀
    pub fn tokopedia_postamble() -> String {
        format!("\n\n{}\n\nNote :\n\n{}\n\n", WEBSITE, DISCLAIMER)
    }

    /// Blibli 描述前缀（HTML 换行）
    pub fn blibli_preamble() -> String {
        format!("{}<br><br>", REMINDER)
    }

    /// Blibli 描述后缀（不含网站链接）
    pub fn blibli_postamble() -> String {
        format!("Note :<br><br>{}<br><br>", DISCLAIMER)
    }

    pub const TOKOPEDIA_CATEGORY: &str = "1919";
    pub const CONDITION_USED: &str = "Bekas";
    pub const STATUS_INACTIVE: &str = "Nonaktif";
    pub const OPTIONAL: &str = "opsional";

    pub const BLIBLI_BRAND_LABEL: &str = "SECOND CHANCE";
    pub const BLIBLI_SHIPPING: &str = "Melalui partner logistik Blibli";
    pub const BLIBLI_STORE: &str = "PP-3091873 || Second Chance Official Store";

    /// Blibli 商品详情链接前缀（导入时拼接平台商品编码）
    pub const BLIBLI_PRODUCT_URL_PREFIX: &str = "https://www.blibli.com/p/product-detail/ps--";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_lookup() {
        assert_eq!(
            layout_for(MarketplaceTarget::TokopediaExport).map(|l| l.start_row),
            Some(4)
        );
        assert_eq!(
            layout_for(MarketplaceTarget::BlibliExport).map(|l| l.column_count),
            Some(39)
        );
        assert!(layout_for(MarketplaceTarget::BlibliImport).is_none());
        assert_eq!(import_start_row(MarketplaceTarget::BlibliImport), Some(2));
        assert_eq!(import_start_row(MarketplaceTarget::TokopediaExport), None);
    }

    #[test]
    fn test_texts() {
        assert!(texts::tokopedia_preamble().ends_with("chat\n\n"));
        assert!(texts::tokopedia_postamble().contains("secondchancebag.com"));
        assert!(!texts::blibli_postamble().contains("secondchancebag.com"));
        assert!(texts::blibli_preamble().ends_with("<br><br>"));
    }
}
