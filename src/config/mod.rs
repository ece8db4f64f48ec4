// ==========================================
// 配置层
// ==========================================
// 职责: 模板路径、输出目录、图片抓取参数
// 存储: config_kv 表
// 说明: 品牌编码表与列布局是静态常量，不在此层
// ==========================================

pub mod bridge_config_trait;
pub mod config_manager;

pub use bridge_config_trait::BridgeConfigReader;
pub use config_manager::{config_keys, ConfigManager};
