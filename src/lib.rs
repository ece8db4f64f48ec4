// ==========================================
// 二手商品目录 ⇄ 电商平台表格桥接 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + XLSX
// 平台: Tokopedia / Blibli
// 方向: 导出（上架表格）与导入（平台回传表格）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 选品、定价、行映射
pub mod engine;

// 表格读写
pub mod sheet;

// 导出层
pub mod exporter;

// 导入层
pub mod importer;

// 远程图片
pub mod media;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Marketplace, MarketplaceTarget, ProductStatus};

// 领域实体与请求/结果
pub use domain::{
    BatchReport, ExportArtifact, ExportOutcome, ExportRequest, ImportOutcome, ImportRequest,
    ImportStatus, Product, ProductChanges, ProductUpdate, RowOutcome, SelectionRequest,
};

// 编排器
pub use exporter::MarketplaceExporter;
pub use importer::MarketplaceImporter;

// 仓储与配置
pub use config::{BridgeConfigReader, ConfigManager};
pub use repository::{ProductRepository, ProductRepositoryImpl};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "marketplace-bridge";
