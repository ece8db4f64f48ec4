// ==========================================
// 导出模块错误类型
// ==========================================
// 红线: 导出要么完整成功，要么整体中止（不产出半份文件）
// ==========================================

use crate::repository::RepositoryError;
use crate::sheet::SheetError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("目标不支持导出: {0}")]
    UnsupportedTarget(String),

    #[error("选品查询失败: {0}")]
    SelectionFailed(#[from] RepositoryError),

    #[error("模板加载失败 ({path}): {source}")]
    TemplateLoadError { path: PathBuf, source: SheetError },

    #[error("表格写入失败: {0}")]
    SheetWriteError(#[from] SheetError),

    #[error("导出文件保存失败 ({path}): {source}")]
    FileSaveError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("配置读取失败: {0}")]
    ConfigReadError(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
