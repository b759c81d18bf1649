use crate::shared::api_utils::{get_json, ApiError};
use contracts::domain::a001_product::aggregate::ProductId;
use contracts::domain::a002_product_rating::aggregate::RatingPoint;
use contracts::domain::a002_product_rating::request::ProductRatingsQuery;
use tokio_util::sync::CancellationToken;

/// История позиций товара в выдаче за период
pub async fn get_product_ratings(
    product_id: &ProductId,
    query: &ProductRatingsQuery,
    cancel: &CancellationToken,
) -> Result<Vec<RatingPoint>, ApiError> {
    let path = format!(
        "/api/product-ratings/product/{}",
        urlencoding::encode(product_id.value())
    );
    get_json(&path, query, cancel).await
}
