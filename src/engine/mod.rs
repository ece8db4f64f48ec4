// ==========================================
// 引擎层
// ==========================================
// 职责: 选品、定价、品牌编码、列布局、行映射
// 红线: Engine 不拼 SQL，查询条件交给仓储层
// ==========================================

pub mod brand_codes;
pub mod layout;
pub mod pricing;
pub mod row_mapper;
pub mod selection_filter;

// 重导出核心引擎
pub use brand_codes::{brand_code, normalize_brand};
pub use layout::{import_start_row, layout_for, ColumnLayout};
pub use pricing::{
    blibli_effective_price, blibli_regular_price, blibli_sale_price, tokopedia_price,
    BlibliSaleRule,
};
pub use row_mapper::{
    mapper_for, BlibliRowMapper, BlibliSaleRowMapper, RowMapper, TokopediaRowMapper,
};
pub use selection_filter::SelectionFilter;
