// ==========================================
// 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::config::bridge_config_trait::BridgeConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::MarketplaceTarget;
use rusqlite::{params, Connection};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 读取配置值，带默认值（空字符串视为未配置）
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_global_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 所有生效配置的快照（JSON，含默认值）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let mut templates = serde_json::Map::new();
        for target in MarketplaceTarget::ALL {
            if let Some(path) = self.template_path(target)? {
                templates.insert(target.to_string(), json!(path.display().to_string()));
            }
        }

        let snapshot = json!({
            "templates": templates,
            "export_output_dir": self.export_output_dir()?.display().to_string(),
            "media_upload_dir": self.media_upload_dir()?.display().to_string(),
            "image_fetch_timeout_secs": self.image_fetch_timeout()?.as_secs(),
        });
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

impl BridgeConfigReader for ConfigManager {
    fn template_path(&self, target: MarketplaceTarget) -> Result<Option<PathBuf>, Box<dyn Error>> {
        let (key, default) = match target {
            MarketplaceTarget::TokopediaExport => {
                (config_keys::TEMPLATE_TOKOPEDIA, "templates/sample_tokped.xlsx")
            }
            MarketplaceTarget::BlibliExport => {
                (config_keys::TEMPLATE_BLIBLI, "templates/sample_blibli.xlsx")
            }
            MarketplaceTarget::BlibliExportSaleOnly => (
                config_keys::TEMPLATE_BLIBLI_SALE,
                "templates/sample_sale_blibli.xlsx",
            ),
            MarketplaceTarget::TokopediaImport | MarketplaceTarget::BlibliImport => {
                return Ok(None)
            }
        };
        Ok(Some(PathBuf::from(self.get_config_or_default(key, default)?)))
    }

    fn export_output_dir(&self) -> Result<PathBuf, Box<dyn Error>> {
        Ok(PathBuf::from(
            self.get_config_or_default(config_keys::EXPORT_OUTPUT_DIR, "exports")?,
        ))
    }

    fn media_upload_dir(&self) -> Result<PathBuf, Box<dyn Error>> {
        Ok(PathBuf::from(
            self.get_config_or_default(config_keys::MEDIA_UPLOAD_DIR, "uploads")?,
        ))
    }

    fn image_fetch_timeout(&self) -> Result<Duration, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::IMAGE_FETCH_TIMEOUT_SECS, "10")?;
        let secs = value.trim().parse::<u64>().unwrap_or(10).clamp(1, 120);
        Ok(Duration::from_secs(secs))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导出模板
    pub const TEMPLATE_TOKOPEDIA: &str = "template_tokopedia";
    pub const TEMPLATE_BLIBLI: &str = "template_blibli";
    pub const TEMPLATE_BLIBLI_SALE: &str = "template_blibli_sale";

    // 输出目录
    pub const EXPORT_OUTPUT_DIR: &str = "export_output_dir";

    // 远程图片
    pub const MEDIA_UPLOAD_DIR: &str = "media_upload_dir";
    pub const IMAGE_FETCH_TIMEOUT_SECS: &str = "image_fetch_timeout_secs";
}
