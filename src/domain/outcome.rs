// ==========================================
// 导出 / 导入结果模型
// ==========================================
// 导出: 生成文件 或 “无匹配商品”
// 导入: 批次级结果（success / no-file / parse-error）+ 逐行结果汇总
// ==========================================

use crate::domain::types::{Marketplace, MarketplaceTarget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ==========================================
// ExportArtifact / ExportOutcome
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub target: MarketplaceTarget,
    pub file_name: String,
    pub file_path: PathBuf,
    pub bytes: Vec<u8>,
    pub rows_written: usize,
    pub skipped_listed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Generated(ExportArtifact),
    /// 选品结果为空（不是错误，不生成文件）
    NoProductsMatched,
}

// ==========================================
// RowOutcome - 单行导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    SkuEmpty,
    SkuNotFound(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SkuEmpty => write!(f, "SKU 为空"),
            SkipReason::SkuNotFound(sku) => write!(f, "SKU {} 不存在", sku),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    Updated { product_id: i64 },
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    pub row_number: u32,
    pub outcome: RowOutcome,
}

// ==========================================
// BatchReport - 批次汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub rows: Vec<RowResult>,
}

impl BatchReport {
    pub fn new(batch_id: impl Into<String>) -> Self {
        Self {
            batch_id: batch_id.into(),
            rows: Vec::new(),
        }
    }

    pub fn record(&mut self, row_number: u32, outcome: RowOutcome) {
        self.rows.push(RowResult {
            row_number,
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Updated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.outcome)).count()
    }
}

// ==========================================
// ImportStatus / ImportOutcome - 批次级结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStatus {
    Success,
    NoFile,
    ParseError,
}

impl ImportStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportStatus::Success)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportStatus::Success => "success",
            ImportStatus::NoFile => "no-file",
            ImportStatus::ParseError => "parse-error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub status: ImportStatus,
    pub source: Marketplace,
    pub report: BatchReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_report_counts() {
        let mut report = BatchReport::new("b1");
        report.record(2, RowOutcome::Updated { product_id: 7 });
        report.record(3, RowOutcome::Skipped(SkipReason::SkuEmpty));
        report.record(4, RowOutcome::Skipped(SkipReason::SkuNotFound("X".into())));
        report.record(5, RowOutcome::Failed("disk full".into()));

        assert_eq!(report.total(), 4);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_import_status_display() {
        assert_eq!(ImportStatus::ParseError.to_string(), "parse-error");
        assert!(ImportStatus::Success.is_success());
    }
}
