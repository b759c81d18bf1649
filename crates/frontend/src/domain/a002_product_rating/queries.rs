use super::api::get_product_ratings;
use crate::shared::query::policy::product_ratings_policy;
use crate::shared::query::{use_query, QueryHandle, QueryKey};
use contracts::domain::a001_product::aggregate::ProductId;
use contracts::domain::a002_product_rating::aggregate::RatingPoint;
use contracts::domain::a002_product_rating::request::{ProductRatingsQuery, RatingsQueryParams};

pub const PRODUCT_RATINGS_QUERY: &str = "product-ratings";

/// Параметры ключа: даты уже в виде `YYYY-MM-DD`, время суток на ключ не влияет
pub fn ratings_key_params(
    product_id: &ProductId,
    params: &RatingsQueryParams,
) -> (ProductId, ProductRatingsQuery) {
    (product_id.clone(), params.to_query())
}

pub fn product_ratings_key(product_id: &ProductId, params: &RatingsQueryParams) -> QueryKey {
    QueryKey::new(PRODUCT_RATINGS_QUERY, &ratings_key_params(product_id, params))
}

/// История рейтинга; без товара или применённых параметров запрос выключен
pub fn use_product_ratings(
    input: impl Fn() -> Option<(ProductId, RatingsQueryParams)> + 'static,
) -> QueryHandle<Vec<RatingPoint>> {
    use_query(
        PRODUCT_RATINGS_QUERY,
        product_ratings_policy(),
        move || input().map(|(id, params)| ratings_key_params(&id, &params)),
        |(id, query): (ProductId, ProductRatingsQuery), cancel| async move {
            get_product_ratings(&id, &query, &cancel).await
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::common::AggregateId;

    fn params_at(hour: u32, minute: u32) -> RatingsQueryParams {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        RatingsQueryParams {
            city_id: "750000000".into(),
            promoted_card: false,
            date_from: day.and_hms_opt(hour, minute, 0).unwrap(),
            date_till: next.and_hms_opt(hour, minute, 0).unwrap(),
            category_filter_id: None,
        }
    }

    #[test]
    fn time_of_day_does_not_change_key() {
        let id = ProductId::from_string("101").unwrap();
        assert_eq!(
            product_ratings_key(&id, &params_at(0, 0)),
            product_ratings_key(&id, &params_at(23, 59))
        );
    }

    #[test]
    fn product_and_flags_change_key() {
        let a = ProductId::from_string("101").unwrap();
        let b = ProductId::from_string("102").unwrap();
        let base = params_at(0, 0);
        let promoted = RatingsQueryParams {
            promoted_card: true,
            ..base.clone()
        };
        assert_ne!(product_ratings_key(&a, &base), product_ratings_key(&b, &base));
        assert_ne!(product_ratings_key(&a, &base), product_ratings_key(&a, &promoted));
    }
}
