// ==========================================
// 选品过滤器
// ==========================================
// 输入: SelectionRequest
// 输出: 有序商品序列（创建时间倒序，ID 倒序打破平局）
// 红线: 空结果是合法结果（Ok(vec![])），与查询失败（Err）区分
// ==========================================

use crate::domain::{Product, ProductStatus, SelectionRequest};
use crate::repository::{ProductQuery, ProductRepository, RepositoryResult};
use std::cmp::Ordering;
use tracing::{debug, instrument};

pub struct SelectionFilter;

impl SelectionFilter {
    pub fn new() -> Self {
        Self
    }

    /// 选品请求 → 仓储查询条件
    pub fn build_query(&self, request: &SelectionRequest) -> ProductQuery {
        ProductQuery {
            category_ids: request.category_ids.iter().copied().collect(),
            product_ids: request.product_ids.iter().copied().collect(),
            statuses: if request.exclude_non_published {
                vec![ProductStatus::Publish]
            } else {
                Vec::new()
            },
        }
    }

    /// 解析选品请求为有序商品序列
    #[instrument(skip(self, repo, request), fields(
        categories = request.category_ids.len(),
        products = request.product_ids.len(),
        published_only = request.exclude_non_published,
    ))]
    pub fn resolve<R: ProductRepository + ?Sized>(
        &self,
        repo: &R,
        request: &SelectionRequest,
    ) -> RepositoryResult<Vec<Product>> {
        let query = self.build_query(request);
        let mut products = repo.query_products(&query)?;

        // 仓储只负责取数；再过一遍条件并固定顺序，保证结果与实现无关
        products.retain(|p| self.matches(request, p));
        products.sort_by(listing_order);
        products.dedup_by_key(|p| p.id);

        debug!(matched = products.len(), "选品完成");
        Ok(products)
    }

    /// 单个商品是否满足选品请求
    pub fn matches(&self, request: &SelectionRequest, product: &Product) -> bool {
        if request.exclude_non_published && product.status != ProductStatus::Publish {
            return false;
        }
        if !request.category_ids.is_empty()
            && !product
                .category_ids
                .iter()
                .any(|c| request.category_ids.contains(c))
        {
            return false;
        }
        if !request.product_ids.is_empty() && !request.product_ids.contains(&product.id) {
            return false;
        }
        true
    }
}

impl Default for SelectionFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// 创建时间倒序；相同时间按 ID 倒序
fn listing_order(a: &Product, b: &Product) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
