// ==========================================
// 导入编排器
// ==========================================
// 流程: 加载表格 → 逐行解析 → SKU 匹配 → 应用变更 → 汇总批次
// 红线: 单行失败不中断批次；每个跳过/失败行恰好一条日志
// ==========================================

use crate::domain::{
    BatchReport, ImportOutcome, ImportRequest, ImportSource, ImportStatus, ProductUpdate,
    RowOutcome, SkipReason,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_parser::{parser_for, ParsedRow, RowParser};
use crate::perf::StageTimer;
use crate::repository::ProductRepository;
use crate::sheet::{SheetResult, Worksheet};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// MarketplaceImporter - 导入编排器
// ==========================================
pub struct MarketplaceImporter<R>
where
    R: ProductRepository,
{
    repo: R,
}

impl<R> MarketplaceImporter<R>
where
    R: ProductRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 执行一次导入
    ///
    /// # 返回
    /// - Ok(ImportOutcome): status 为 success / no-file / parse-error，附带逐行报告
    /// - Err(UnsupportedTarget): 传入了导出目标
    #[instrument(skip(self, request), fields(target = %request.target))]
    pub fn import(&self, request: &ImportRequest) -> ImportResult<ImportOutcome> {
        let mut timer = StageTimer::start("import");
        let target = request.target;
        let parser = parser_for(target)
            .ok_or_else(|| ImportError::UnsupportedTarget(target.to_string()))?;

        let batch_id = Uuid::new_v4().to_string();
        let mut outcome = ImportOutcome {
            status: ImportStatus::Success,
            source: target.marketplace(),
            report: BatchReport::new(batch_id.clone()),
        };

        // === 步骤 1: 加载表格 ===
        let Some(source) = request.file.as_ref() else {
            error!("未上传文件");
            outcome.status = ImportStatus::NoFile;
            return Ok(outcome);
        };

        let sheet = match load_source(source) {
            Ok(sheet) => sheet,
            Err(e) => {
                error!(error = %e, "表格解析失败");
                outcome.status = ImportStatus::ParseError;
                return Ok(outcome);
            }
        };
        timer.mark("load");

        // === 步骤 2: 逐行处理 ===
        let last_row = sheet.highest_row();
        info!(batch_id = %batch_id, first_row = parser.start_row(), last_row, "开始导入");

        for row in parser.start_row()..=last_row {
            let parsed = parser.parse_row(&sheet, row);
            let row_outcome = self.apply_row(parsed);
            outcome.report.record(row, row_outcome);
        }
        timer.mark("rows");

        info!(
            batch_id = %batch_id,
            total = outcome.report.total(),
            updated = outcome.report.updated(),
            skipped = outcome.report.skipped(),
            failed = outcome.report.failed(),
            "导入完成"
        );

        Ok(outcome)
    }

    /// 匹配并应用单行变更
    fn apply_row(&self, parsed: ParsedRow) -> RowOutcome {
        let row = parsed.row_number;

        if parsed.sku.is_empty() {
            warn!(row, name = %parsed.display_name, "跳过: SKU 为空");
            return RowOutcome::Skipped(SkipReason::SkuEmpty);
        }

        let product_id = match self.repo.find_id_by_sku(&parsed.sku) {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(row, sku = %parsed.sku, name = %parsed.display_name, "跳过: 未找到 SKU");
                return RowOutcome::Skipped(SkipReason::SkuNotFound(parsed.sku));
            }
            Err(e) => {
                error!(row, sku = %parsed.sku, error = %e, "SKU 查询失败");
                return RowOutcome::Failed(e.to_string());
            }
        };

        let update = ProductUpdate::new(product_id, parsed.changes);
        match self.repo.apply_update(&update) {
            Ok(()) => {
                info!(row, product_id, sku = %parsed.sku, name = %parsed.display_name, "商品已更新");
                RowOutcome::Updated { product_id }
            }
            Err(e) => {
                error!(row, product_id, sku = %parsed.sku, error = %e, "商品更新失败");
                RowOutcome::Failed(e.to_string())
            }
        }
    }
}

fn load_source(source: &ImportSource) -> SheetResult<Worksheet> {
    match source {
        ImportSource::Bytes(bytes) => Worksheet::load_bytes(bytes),
        ImportSource::Path(path) => Worksheet::load_path(path),
    }
}
