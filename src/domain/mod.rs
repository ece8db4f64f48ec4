// ==========================================
// 领域模型层
// ==========================================
// 职责: 定义商品实体、平台类型、请求与结果
// 红线: 不含数据访问逻辑,不含映射规则
// ==========================================

pub mod outcome;
pub mod product;
pub mod selection;
pub mod types;

// 重导出核心类型
pub use outcome::{
    BatchReport, ExportArtifact, ExportOutcome, ImportOutcome, ImportStatus, RowOutcome,
    RowResult, SkipReason,
};
pub use product::{meta_keys, Product, ProductChanges, ProductUpdate};
pub use selection::{ExportRequest, ImportRequest, ImportSource, SelectionRequest};
pub use types::{Marketplace, MarketplaceTarget, ProductStatus};
