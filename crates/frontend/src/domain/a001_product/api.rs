use crate::shared::api_utils::{get_json, request_json, ApiError, HttpMethod};
use contracts::domain::a001_product::aggregate::{ProductDetail, ProductId, ProductSummary};
use contracts::domain::a001_product::request::ProductListQuery;
use contracts::domain::common::PaginatedResult;
use tokio_util::sync::CancellationToken;

const LIST_PATH: &str = "/api/products/list";

/// Страница списка товаров; пустой поиск не уходит в query
pub async fn list_products(
    query: &ProductListQuery,
    cancel: &CancellationToken,
) -> Result<PaginatedResult<ProductSummary>, ApiError> {
    get_json(LIST_PATH, query, cancel).await
}

/// Карточка товара по id (или SKU).
///
/// Если товара нет, бэкенд отвечает 404 с `detail`, и он приходит через
/// `ApiError::Http`.
pub async fn get_product_detail(
    id: &ProductId,
    cancel: &CancellationToken,
) -> Result<ProductDetail, ApiError> {
    request_json(HttpMethod::Get, &detail_path(id), "", cancel).await
}

fn detail_path(id: &ProductId) -> String {
    format!("/api/products/detail/{}", urlencoding::encode(id.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::AggregateId;

    #[test]
    fn detail_path_escapes_id() {
        let id = ProductId::from_string(" 100200300 ").unwrap();
        assert_eq!(detail_path(&id), "/api/products/detail/100200300");

        let sku = ProductId::from_string("SKU 1/2").unwrap();
        assert_eq!(detail_path(&sku), "/api/products/detail/SKU%201%2F2");
    }
}
