// ==========================================
// 领域类型定义
// ==========================================
// 平台 / 平台目标 / 商品发布状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 电商平台 (Marketplace)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Tokopedia,
    Blibli,
}

impl Marketplace {
    /// 小写标识，用于文件名前缀与导入来源标记
    pub fn slug(&self) -> &'static str {
        match self {
            Marketplace::Tokopedia => "tokopedia",
            Marketplace::Blibli => "blibli",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

// ==========================================
// 平台目标 (Marketplace Target)
// ==========================================
// 决定列布局、价格规则变体、跳过判定
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketplaceTarget {
    TokopediaExport,
    BlibliExport,
    BlibliExportSaleOnly,
    TokopediaImport,
    BlibliImport,
}

impl MarketplaceTarget {
    pub const ALL: [MarketplaceTarget; 5] = [
        MarketplaceTarget::TokopediaExport,
        MarketplaceTarget::BlibliExport,
        MarketplaceTarget::BlibliExportSaleOnly,
        MarketplaceTarget::TokopediaImport,
        MarketplaceTarget::BlibliImport,
    ];

    pub fn marketplace(&self) -> Marketplace {
        match self {
            MarketplaceTarget::TokopediaExport | MarketplaceTarget::TokopediaImport => {
                Marketplace::Tokopedia
            }
            MarketplaceTarget::BlibliExport
            | MarketplaceTarget::BlibliExportSaleOnly
            | MarketplaceTarget::BlibliImport => Marketplace::Blibli,
        }
    }

    pub fn is_export(&self) -> bool {
        matches!(
            self,
            MarketplaceTarget::TokopediaExport
                | MarketplaceTarget::BlibliExport
                | MarketplaceTarget::BlibliExportSaleOnly
        )
    }

    pub fn is_import(&self) -> bool {
        !self.is_export()
    }

    /// 导出文件名前缀: `<marketplace>_export[_sale]`
    pub fn file_prefix(&self) -> String {
        match self {
            MarketplaceTarget::BlibliExportSaleOnly => {
                format!("{}_export_sale", self.marketplace().slug())
            }
            MarketplaceTarget::TokopediaImport | MarketplaceTarget::BlibliImport => {
                format!("{}_import", self.marketplace().slug())
            }
            _ => format!("{}_export", self.marketplace().slug()),
        }
    }
}

impl fmt::Display for MarketplaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketplaceTarget::TokopediaExport => "TOKOPEDIA_EXPORT",
            MarketplaceTarget::BlibliExport => "BLIBLI_EXPORT",
            MarketplaceTarget::BlibliExportSaleOnly => "BLIBLI_EXPORT_SALE_ONLY",
            MarketplaceTarget::TokopediaImport => "TOKOPEDIA_IMPORT",
            MarketplaceTarget::BlibliImport => "BLIBLI_IMPORT",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MarketplaceTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        MarketplaceTarget::ALL
            .into_iter()
            .find(|t| t.to_string() == normalized)
            .ok_or_else(|| format!("未知的平台目标: {}", s))
    }
}

// ==========================================
// 商品发布状态 (Product Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Publish,
    Draft,
    Private,
    Pending,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Publish => "publish",
            ProductStatus::Draft => "draft",
            ProductStatus::Private => "private",
            ProductStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "publish" => Ok(ProductStatus::Publish),
            "draft" => Ok(ProductStatus::Draft),
            "private" => Ok(ProductStatus::Private),
            "pending" => Ok(ProductStatus::Pending),
            other => Err(format!("未知的商品状态: {}", other)),
        }
    }
}
