//! Запросы товаров через кэш: ключи и политики

use super::api::{get_product_detail, list_products};
use crate::shared::query::policy::{product_detail_policy, products_policy};
use crate::shared::query::{use_query, QueryHandle, QueryKey};
use contracts::domain::a001_product::aggregate::{ProductDetail, ProductId, ProductSummary};
use contracts::domain::a001_product::request::ProductListQuery;
use contracts::domain::common::PaginatedResult;

pub const PRODUCTS_QUERY: &str = "products";
pub const PRODUCT_DETAIL_QUERY: &str = "product-detail";

pub fn products_key(query: &ProductListQuery) -> QueryKey {
    QueryKey::new(PRODUCTS_QUERY, query)
}

pub fn product_detail_key(id: &ProductId) -> QueryKey {
    QueryKey::new(PRODUCT_DETAIL_QUERY, id)
}

/// Страница списка товаров
pub fn use_products(
    query: impl Fn() -> Option<ProductListQuery> + 'static,
) -> QueryHandle<PaginatedResult<ProductSummary>> {
    use_query(PRODUCTS_QUERY, products_policy(), query, |query, cancel| async move {
        list_products(&query, &cancel).await
    })
}

/// Карточка товара; без id запрос выключен
pub fn use_product(
    id: impl Fn() -> Option<ProductId> + 'static,
) -> QueryHandle<ProductDetail> {
    use_query(PRODUCT_DETAIL_QUERY, product_detail_policy(), id, |id, cancel| async move {
        get_product_detail(&id, &cancel).await
    })
}
