// ==========================================
// 远程图片模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("图片 URL 无效: {0}")]
    InvalidUrl(String),

    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP 状态异常: {0}")]
    HttpStatus(u16),

    #[error("图片保存失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置读取失败: {0}")]
    ConfigReadError(String),
}

pub type MediaResult<T> = Result<T, MediaError>;
