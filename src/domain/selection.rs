// ==========================================
// 选品请求 / 导出请求 / 导入请求
// ==========================================

use crate::domain::types::MarketplaceTarget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

// ==========================================
// SelectionRequest - 选品请求
// ==========================================
// 红线: 分类与商品 ID 均为空 = 全部商品（仅受发布状态过滤）
//       商品 ID 集合只收窄，不扩大
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub category_ids: BTreeSet<i64>,
    pub product_ids: BTreeSet<i64>,
    pub exclude_non_published: bool,
}

impl SelectionRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids.extend(ids);
        self
    }

    pub fn with_products(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.product_ids.extend(ids);
        self
    }

    pub fn published_only(mut self, flag: bool) -> Self {
        self.exclude_non_published = flag;
        self
    }
}

// ==========================================
// ExportRequest - 导出请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub selection: SelectionRequest,
    pub target: MarketplaceTarget,
}

impl ExportRequest {
    pub fn new(target: MarketplaceTarget, selection: SelectionRequest) -> Self {
        Self { selection, target }
    }
}

// ==========================================
// ImportSource / ImportRequest - 导入请求
// ==========================================
/// 上传文件来源：内存字节或本地路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// None = 未上传文件
    pub file: Option<ImportSource>,
    pub target: MarketplaceTarget,
}

impl ImportRequest {
    pub fn from_bytes(target: MarketplaceTarget, bytes: Vec<u8>) -> Self {
        Self {
            file: Some(ImportSource::Bytes(bytes)),
            target,
        }
    }

    pub fn from_path(target: MarketplaceTarget, path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(ImportSource::Path(path.into())),
            target,
        }
    }

    pub fn without_file(target: MarketplaceTarget) -> Self {
        Self { file: None, target }
    }
}
