// ==========================================
// 导出层
// ==========================================
// 职责: 商品目录 → 平台模板表格文件
// 支持: Tokopedia / Blibli 主表 / Blibli 促销专表
// ==========================================

pub mod error;
pub mod export_orchestrator;

pub use error::{ExportError, ExportResult};
pub use export_orchestrator::{export_file_name, fill_sheet, FillSummary, MarketplaceExporter};
