// ==========================================
// 导出/导入配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::MarketplaceTarget;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// BridgeConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait BridgeConfigReader: Send + Sync {
    /// 导出模板路径
    ///
    /// # 默认值
    /// - TOKOPEDIA_EXPORT: templates/sample_tokped.xlsx
    /// - BLIBLI_EXPORT: templates/sample_blibli.xlsx
    /// - BLIBLI_EXPORT_SALE_ONLY: templates/sample_sale_blibli.xlsx
    ///
    /// 导入目标无模板，返回 None
    fn template_path(&self, target: MarketplaceTarget) -> Result<Option<PathBuf>, Box<dyn Error>>;

    /// 导出文件输出目录
    ///
    /// # 默认值
    /// - exports
    fn export_output_dir(&self) -> Result<PathBuf, Box<dyn Error>>;

    /// 远程图片保存目录
    ///
    /// # 默认值
    /// - uploads
    fn media_upload_dir(&self) -> Result<PathBuf, Box<dyn Error>>;

    /// 远程图片抓取超时
    ///
    /// # 默认值
    /// - 10 秒
    fn image_fetch_timeout(&self) -> Result<Duration, Box<dyn Error>>;
}
