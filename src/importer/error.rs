// ==========================================
// 导入模块错误类型
// ==========================================
// 说明: 缺文件/解析失败属于批次结果（ImportStatus），不走错误通道
//       行级失败记入 BatchReport，不中断批次
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("目标不支持导入: {0}")]
    UnsupportedTarget(String),
}

pub type ImportResult<T> = Result<T, ImportError>;
