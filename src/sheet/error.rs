// ==========================================
// 表格读写错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 写出失败: {0}")]
    ExcelWriteError(String),

    #[error("Excel 文件无工作表")]
    NoWorksheet,

    #[error("单元格坐标越界: 列 {col}, 行 {row}")]
    CellOutOfRange { col: u32, row: u32 },
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::ExcelParseError(err.to_string())
    }
}

pub type SheetResult<T> = Result<T, SheetError>;
