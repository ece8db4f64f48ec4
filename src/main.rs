// ==========================================
// 二手商品目录 ⇄ 电商平台表格桥接 - 命令行入口
// ==========================================
// 子命令: init-db / export / import / fetch-image / config
// 数据库: --db 或环境变量 MARKETPLACE_BRIDGE_DB
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use marketplace_bridge::config::ConfigManager;
use marketplace_bridge::db::{get_default_db_path, init_schema, open_sqlite_connection};
use marketplace_bridge::domain::{
    ExportOutcome, ExportRequest, ImportRequest, MarketplaceTarget, SelectionRequest,
};
use marketplace_bridge::media::ImageFetcher;
use marketplace_bridge::repository::ProductRepositoryImpl;
use marketplace_bridge::{logging, MarketplaceExporter, MarketplaceImporter};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(name = "marketplace-bridge")]
#[command(author, version, about = "Tokopedia / Blibli 表格导出导入工具")]
struct Cli {
    /// 数据库文件路径（默认读取 MARKETPLACE_BRIDGE_DB）
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 初始化数据库表结构
    InitDb,
    /// 生成平台上架表格
    Export {
        /// TOKOPEDIA_EXPORT / BLIBLI_EXPORT / BLIBLI_EXPORT_SALE_ONLY
        #[arg(short, long)]
        target: MarketplaceTarget,

        /// 限定分类（可重复）
        #[arg(long = "category")]
        categories: Vec<i64>,

        /// 限定商品（可重复）
        #[arg(long = "product")]
        products: Vec<i64>,

        /// 只导出已发布商品
        #[arg(long)]
        published_only: bool,
    },
    /// 导入平台回传表格
    Import {
        /// TOKOPEDIA_IMPORT / BLIBLI_IMPORT
        #[arg(short, long)]
        target: MarketplaceTarget,

        /// 上传的表格文件
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// 下载远程图片到上传目录
    FetchImage {
        #[arg(short, long)]
        url: String,
    },
    /// 查看或修改配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 打印配置；不带 key 时输出全部生效配置
    Get { key: Option<String> },
    /// 写入配置
    Set { key: String, value: String },
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("命令执行失败: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(get_default_db_path);
    tracing::debug!(db = %db_path, "使用数据库");

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    init_schema(&conn).context("建表失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let repo = ProductRepositoryImpl::from_connection(conn.clone());
    let config = ConfigManager::from_connection(conn);

    match cli.command {
        Commands::InitDb => {
            println!("数据库已就绪: {}", db_path);
        }
        Commands::Export {
            target,
            categories,
            products,
            published_only,
        } => {
            let selection = SelectionRequest::all()
                .with_categories(categories)
                .with_products(products)
                .published_only(published_only);
            let exporter = MarketplaceExporter::new(repo, config);
            match exporter.export(&ExportRequest::new(target, selection))? {
                ExportOutcome::Generated(artifact) => {
                    println!(
                        "{} ({} 行, 跳过已上架 {})",
                        artifact.file_path.display(),
                        artifact.rows_written,
                        artifact.skipped_listed
                    );
                }
                ExportOutcome::NoProductsMatched => println!("没有匹配的商品"),
            }
        }
        Commands::Import { target, file } => {
            let request = match file {
                Some(path) => ImportRequest::from_path(target, path),
                None => ImportRequest::without_file(target),
            };
            let outcome = MarketplaceImporter::new(repo).import(&request)?;
            println!(
                "{}: 共 {} 行, 更新 {}, 跳过 {}, 失败 {} (批次 {})",
                outcome.status,
                outcome.report.total(),
                outcome.report.updated(),
                outcome.report.skipped(),
                outcome.report.failed(),
                outcome.report.batch_id
            );
            if !outcome.status.is_success() {
                bail!("导入未执行: {}", outcome.status);
            }
        }
        Commands::FetchImage { url } => {
            let fetcher = ImageFetcher::from_config(&config)?;
            let stored = fetcher.fetch_to_upload_dir(&url)?;
            println!("{} ({})", stored.path.display(), stored.mime_type);
        }
        Commands::Config { action } => match action {
            ConfigAction::Get { key: None } => {
                println!("{}", config.get_config_snapshot().map_err(to_anyhow)?);
            }
            ConfigAction::Get { key: Some(key) } => {
                let value = config.get_global_config_value(&key).map_err(to_anyhow)?;
                println!("{}", value.unwrap_or_default());
            }
            ConfigAction::Set { key, value } => {
                config
                    .set_global_config_value(&key, &value)
                    .map_err(to_anyhow)?;
                println!("{} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Box<dyn Error>（非 Send）→ anyhow
fn to_anyhow(err: Box<dyn std::error::Error>) -> anyhow::Error {
    anyhow::anyhow!(err.to_string())
}
