// ==========================================
// 导入层
// ==========================================
// 职责: 平台回传表格 → 商品库存/重量/SKU/平台元数据
// 支持: Tokopedia / Blibli
// ==========================================

pub mod error;
pub mod import_orchestrator;
pub mod row_parser;

pub use error::{ImportError, ImportResult};
pub use import_orchestrator::MarketplaceImporter;
pub use row_parser::{
    parse_numeric, parse_stock, parser_for, BlibliRowParser, ParsedRow, RowParser,
    TokopediaRowParser,
};
