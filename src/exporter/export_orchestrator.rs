// ==========================================
// 导出编排器
// ==========================================
// 流程: 选品 → 跳过判定 → 行映射 → 写入模板 → 序列化 → 保存文件
// 红线: 选品为空时返回 NoProductsMatched，不生成空文件
//       被跳过的商品不占用输出行（输出行连续）
// ==========================================

use crate::config::BridgeConfigReader;
use crate::domain::{ExportArtifact, ExportOutcome, ExportRequest, MarketplaceTarget, Product};
use crate::engine::row_mapper::{mapper_for, RowMapper};
use crate::engine::SelectionFilter;
use crate::exporter::error::{ExportError, ExportResult};
use crate::perf::StageTimer;
use crate::repository::ProductRepository;
use crate::sheet::{SheetResult, TemplateWorkbook};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// 单次写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillSummary {
    pub rows_written: usize,
    pub skipped_listed: usize,
}

// ==========================================
// MarketplaceExporter - 导出编排器
// ==========================================
pub struct MarketplaceExporter<R, C>
where
    R: ProductRepository,
    C: BridgeConfigReader,
{
    repo: R,
    config: C,
    selection: SelectionFilter,
}

impl<R, C> MarketplaceExporter<R, C>
where
    R: ProductRepository,
    C: BridgeConfigReader,
{
    pub fn new(repo: R, config: C) -> Self {
        Self {
            repo,
            config,
            selection: SelectionFilter::new(),
        }
    }

    /// 执行一次导出
    ///
    /// # 返回
    /// - Ok(Generated): 文件已保存，附带字节内容
    /// - Ok(NoProductsMatched): 选品为空
    /// - Err: 目标非法 / 查询失败 / 模板缺失 / 写文件失败
    #[instrument(skip(self, request), fields(target = %request.target))]
    pub fn export(&self, request: &ExportRequest) -> ExportResult<ExportOutcome> {
        let mut timer = StageTimer::start("export");
        let target = request.target;

        let mapper = mapper_for(target)
            .ok_or_else(|| ExportError::UnsupportedTarget(target.to_string()))?;

        // === 步骤 1: 选品 ===
        let products = self.selection.resolve(&self.repo, &request.selection)?;
        if products.is_empty() {
            info!("没有匹配的商品，不生成文件");
            return Ok(ExportOutcome::NoProductsMatched);
        }
        info!(matched = products.len(), "选品完成");
        timer.mark("select");

        // === 步骤 2: 加载模板 ===
        let template_path = self
            .config
            .template_path(target)
            .map_err(|e| ExportError::ConfigReadError(e.to_string()))?
            .ok_or_else(|| ExportError::UnsupportedTarget(target.to_string()))?;
        let mut workbook = TemplateWorkbook::load_path(&template_path).map_err(|source| {
            ExportError::TemplateLoadError {
                path: template_path.clone(),
                source,
            }
        })?;
        debug!(
            template = %template_path.display(),
            sheet = %workbook.active_sheet_name(),
            "模板加载完成"
        );
        timer.mark("load_template");

        // === 步骤 3: 写入数据行（模板活动工作表） ===
        let summary = fill_sheet(&mut workbook, mapper.as_ref(), &products)?;
        timer.mark("fill");

        // === 步骤 4: 序列化并保存 ===
        let bytes = workbook.to_xlsx_bytes()?;
        let output_dir = self
            .config
            .export_output_dir()
            .map_err(|e| ExportError::ConfigReadError(e.to_string()))?;
        let file_name = export_file_name(target, Local::now());
        let file_path = save_unique(&output_dir, &file_name, &bytes)?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(file_name);
        timer.mark("save");

        info!(
            file = %file_path.display(),
            rows = summary.rows_written,
            skipped = summary.skipped_listed,
            "导出完成"
        );

        Ok(ExportOutcome::Generated(ExportArtifact {
            target,
            file_name,
            file_path,
            bytes,
            rows_written: summary.rows_written,
            skipped_listed: summary.skipped_listed,
        }))
    }
}

/// 将商品逐行写入模板活动工作表（从布局起始行开始，跳过已上架商品）
pub fn fill_sheet(
    sheet: &mut TemplateWorkbook,
    mapper: &dyn RowMapper,
    products: &[Product],
) -> SheetResult<FillSummary> {
    let mut row = mapper.layout().start_row;
    let mut summary = FillSummary {
        rows_written: 0,
        skipped_listed: 0,
    };

    for product in products {
        if mapper.should_skip(product) {
            debug!(product_id = product.id, sku = ?product.sku, "已上架，跳过");
            summary.skipped_listed += 1;
            continue;
        }

        sheet.write_row(row, &mapper.map_row(product))?;
        row += 1;
        summary.rows_written += 1;
    }

    Ok(summary)
}

/// `<marketplace>_export[_sale]_<YYYY-MM-DD_HH-MM-SS>.xlsx`
pub fn export_file_name(target: MarketplaceTarget, at: DateTime<Local>) -> String {
    format!(
        "{}_{}.xlsx",
        target.file_prefix(),
        at.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// 保存到输出目录；同名文件已存在时追加序号（_1, _2 ...）
fn save_unique(dir: &Path, file_name: &str, bytes: &[u8]) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| ExportError::FileSaveError {
        path: dir.to_path_buf(),
        source,
    })?;

    let stem = file_name.trim_end_matches(".xlsx");
    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            dir.join(file_name)
        } else {
            dir.join(format!("{}_{}.xlsx", stem, attempt))
        };

        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut file) => {
                write_or_discard(&mut file, &candidate, bytes)?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < 1000 => {
                attempt += 1;
            }
            Err(source) => {
                return Err(ExportError::FileSaveError {
                    path: candidate,
                    source,
                })
            }
        }
    }
}

/// 写入失败时删除已创建的文件，不留下半份导出
fn write_or_discard<W: Write>(file: &mut W, path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let result = file.write_all(bytes).and_then(|_| file.flush());
    if let Err(source) = result {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "残留文件删除失败");
        }
        return Err(ExportError::FileSaveError {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
