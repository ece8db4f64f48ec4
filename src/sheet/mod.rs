// ==========================================
// 表格读写层
// ==========================================
// 职责: 模板加载、按坐标读写单元格、最高行、序列化
// 模板改写: umya-spreadsheet（保留工作表与样式）   上传读取: umya-spreadsheet / calamine
// ==========================================

pub mod cell;
pub mod error;
pub mod template;
pub mod worksheet;

pub use cell::{column_index, column_letters, CellValue};
pub use error::{SheetError, SheetResult};
pub use template::TemplateWorkbook;
pub use worksheet::Worksheet;
