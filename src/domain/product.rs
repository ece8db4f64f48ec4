// ==========================================
// 商品领域模型
// ==========================================
// 用途: 仓储层读出，导出映射只读；导入只修改已存在商品的部分字段
// 对齐: product / product_gallery / product_category / product_meta 表
// ==========================================

use crate::domain::types::{Marketplace, ProductStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// product_meta 中使用的键
pub mod meta_keys {
    pub const BRAND: &str = "_brand";
    pub const SALE_PRICE_DATES_FROM: &str = "_sale_price_dates_from";
    pub const SALE_PRICE_DATES_TO: &str = "_sale_price_dates_to";
    pub const TOKOPEDIA_MARKER: &str = "button_tokopedia";
    pub const BLIBLI_MARKER: &str = "button_blibli";
    pub const TOKOPEDIA_PRICE: &str = "_tokopedia_price";
    pub const BLIBLI_PRICE: &str = "_blibli_price";

    /// 仓储读取 Product 时一并加载的元数据键
    pub const PRODUCT_KEYS: [&str; 7] = [
        BRAND,
        SALE_PRICE_DATES_FROM,
        SALE_PRICE_DATES_TO,
        TOKOPEDIA_MARKER,
        BLIBLI_MARKER,
        TOKOPEDIA_PRICE,
        BLIBLI_PRICE,
    ];
}

// ==========================================
// Product - 商品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub sku: Option<String>,
    pub name: String,
    pub brand: Option<String>,  // 品牌（自由文本，查表时大小写不敏感）
    pub description: String,    // 描述（含换行）
    pub status: ProductStatus,
    pub category_ids: Vec<i64>,

    // ===== 价格 =====
    pub regular_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub sale_from: Option<String>, // 促销开始（原样保存，只判断是否存在）
    pub sale_to: Option<String>,   // 促销结束

    // ===== 库存与物流 =====
    pub stock_quantity: Option<i64>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,

    // ===== 图片 =====
    pub image_url: Option<String>,
    pub gallery_urls: Vec<String>,

    // ===== 平台标记 / 平台价格（元数据） =====
    pub tokopedia_marker: Option<String>,
    pub blibli_marker: Option<String>,
    pub tokopedia_price: Option<String>,
    pub blibli_price: Option<String>,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// 最小可用商品（其余字段为空），主要用于测试与种子数据
    pub fn new(id: i64, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            sku: None,
            name: name.into(),
            brand: None,
            description: String::new(),
            status: ProductStatus::Publish,
            category_ids: Vec::new(),
            regular_price: None,
            sale_price: None,
            sale_from: None,
            sale_to: None,
            stock_quantity: None,
            weight: None,
            length: None,
            width: None,
            height: None,
            image_url: None,
            gallery_urls: Vec::new(),
            tokopedia_marker: None,
            blibli_marker: None,
            tokopedia_price: None,
            blibli_price: None,
            created_at,
        }
    }

    /// 平台“已上架”标记
    pub fn marker_for(&self, marketplace: Marketplace) -> Option<&str> {
        match marketplace {
            Marketplace::Tokopedia => self.tokopedia_marker.as_deref(),
            Marketplace::Blibli => self.blibli_marker.as_deref(),
        }
    }

    /// 是否已在该平台上架（标记非空）
    pub fn is_listed_on(&self, marketplace: Marketplace) -> bool {
        self.marker_for(marketplace)
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false)
    }

    /// 不定期促销: 有促销价，且开始/结束日期均为空
    pub fn has_indefinite_sale(&self) -> bool {
        let has_sale = self.sale_price.map(|p| p != 0.0).unwrap_or(false);
        has_sale && is_blank(self.sale_from.as_deref()) && is_blank(self.sale_to.as_deref())
    }

    /// `品牌 名称 SKU`，空缺部分保留空格（不 trim）
    pub fn formatted_name(&self) -> String {
        format!(
            "{} {} {}",
            self.brand.as_deref().unwrap_or(""),
            self.name,
            self.sku.as_deref().unwrap_or("")
        )
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

// ==========================================
// ProductChanges - 导入解析出的字段变更（尚未绑定商品）
// ==========================================
// 约定: None = 不修改
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub stock_quantity: Option<i64>,
    /// Some(None) 表示清空重量
    pub weight: Option<Option<f64>>,
    pub sku: Option<String>,
    /// 元数据写入 (meta_key, meta_value)，按顺序执行
    pub meta: Vec<(String, String)>,
}

impl ProductChanges {
    pub fn set_meta(&mut self, key: &str, value: impl Into<String>) {
        self.meta.push((key.to_string(), value.into()));
    }
}

// ==========================================
// ProductUpdate - 绑定到具体商品的变更
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub product_id: i64,
    pub changes: ProductChanges,
}

impl ProductUpdate {
    pub fn new(product_id: i64, changes: ProductChanges) -> Self {
        Self {
            product_id,
            changes,
        }
    }
}
