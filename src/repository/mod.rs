// ==========================================
// 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 商品目录查询、标量字段与元数据读写
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod product_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::{ProductQuery, ProductRepository, ProductRepositoryImpl};
