use super::model::{DetailPanelState, Resolution};
use crate::domain::a001_product::queries::{product_detail_key, use_product};
use crate::domain::a002_product_rating::ui::filters::view_model::RatingsFilterViewModel;
use crate::shared::api_utils::{describe, ApiError};
use crate::shared::components::error_banner::ERROR_BANNER_MS;
use crate::shared::date_utils::today;
use crate::shared::query::{QueryHandle, QuerySnapshot, QueryState};
use crate::shared::transient::TransientSignal;
use chrono::NaiveDate;
use contracts::domain::a001_product::aggregate::ProductDetail;
use leptos::prelude::*;

/// ViewModel панели карточки товара
///
/// Карточка грузится через кэш по зафиксированному id. Ошибка не стирает
/// показанную карточку, а всплывает баннером на 3 с.
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub panel: RwSignal<DetailPanelState>,
    pub detail: QueryHandle<ProductDetail>,
    pub banner: TransientSignal<String>,
    pub filters: RatingsFilterViewModel,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        let panel = RwSignal::new(DetailPanelState::default());
        let detail = use_product(move || panel.with(|p| p.committed().cloned()));
        let vm = Self {
            panel,
            detail,
            banner: TransientSignal::new(ERROR_BANNER_MS),
            filters: RatingsFilterViewModel::new(today()),
        };

        Effect::new(move |_| {
            let snapshot = detail.snapshot();
            vm.on_detail_snapshot(snapshot);
        });

        vm
    }

    fn on_detail_snapshot(&self, snapshot: QuerySnapshot<ProductDetail>) {
        settle_detail(self.panel, self.filters, self.banner, snapshot, today());
    }

    /// Зафиксировать id или SKU из поля ввода либо из строки таблицы
    pub fn submit_command(&self, raw: &str) {
        let submitted = self.panel.try_update(|p| p.submit(raw)).flatten();
        if let Some(id) = submitted {
            log::debug!("product {id} submitted");
        }
    }

    pub fn close_command(&self) {
        self.panel.update(|p| p.close());
        self.banner.reset();
    }

    /// Id показанного товара, для подсветки строки в таблице
    pub fn shown_id(&self) -> Option<String> {
        self.panel.with(|p| p.persisted_id().map(|id| id.value().to_string()))
    }
}

/// Разобрать снимок запроса карточки.
///
/// Фильтры графика сбрасываются только когда на экране новый товар;
/// ошибка показывает баннер и не трогает применённые параметры.
fn settle_detail(
    panel: RwSignal<DetailPanelState>,
    filters: RatingsFilterViewModel,
    banner: TransientSignal<String>,
    snapshot: QuerySnapshot<ProductDetail>,
    today: NaiveDate,
) {
    let Some(id) = panel.with_untracked(|p| p.committed().cloned()) else {
        return;
    };
    if snapshot.key != Some(product_detail_key(&id)) {
        return;
    }
    let result = match snapshot.state {
        QueryState::Settled(Ok(detail)) => Ok(detail),
        QueryState::Settled(Err(ApiError::Cancelled)) => return,
        QueryState::Settled(Err(e)) => Err(describe(&e)),
        _ => return,
    };

    match panel.try_update(|p| p.resolve(&id, result)) {
        Some(Resolution::Replaced) => {
            log::debug!("product {id} loaded, ratings filters reset");
            filters.reset_command(today);
        }
        Some(Resolution::Failed(message)) => {
            log::warn!("product {id}: {message}");
            banner.show(message);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product_rating::ui::filters::model::RatingsFilterDraft;
    use contracts::domain::a001_product::aggregate::ProductId;
    use contracts::domain::a002_product_rating::request::RatingsQueryParams;
    use contracts::domain::common::AggregateId;
    use std::sync::Arc;

    struct Wiring {
        panel: RwSignal<DetailPanelState>,
        filters: RatingsFilterViewModel,
        banner: TransientSignal<String>,
    }

    impl Wiring {
        fn new() -> Self {
            Self {
                panel: RwSignal::new(DetailPanelState::default()),
                filters: RatingsFilterViewModel::new(day()),
                banner: TransientSignal::new(ERROR_BANNER_MS),
            }
        }

        fn submit(&self, raw: &str) -> ProductId {
            self.panel.update(|p| {
                p.submit(raw);
            });
            ProductId::from_string(raw).unwrap()
        }

        fn settle(&self, id: &ProductId, result: Result<ProductDetail, ApiError>) {
            let snapshot = QuerySnapshot {
                key: Some(product_detail_key(id)),
                state: QueryState::Settled(result.map(Arc::new)),
                latest: None,
            };
            settle_detail(self.panel, self.filters, self.banner, snapshot, day());
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn detail(id: &str) -> ProductDetail {
        ProductDetail {
            id: id.to_string(),
            config_sku: None,
            title: format!("Товар {id}"),
            brand: None,
            category_id: "Smartphones".to_string(),
            shop_link: format!("/p/{id}/"),
            images: vec![],
            category_codes: vec![],
            categories: vec![],
        }
    }

    fn custom_params() -> RatingsQueryParams {
        let from = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        RatingsQueryParams::for_days("710000000", true, from, to, Some(3))
    }

    fn not_found() -> ApiError {
        ApiError::Http {
            status: 404,
            body: Some(serde_json::json!({"detail": "Product not found"})),
        }
    }

    #[test]
    fn new_product_resets_applied_filters() {
        Owner::new().with(|| {
            let vm = Wiring::new();
            vm.filters.applied.set(Some(custom_params()));
            vm.filters.city_id.set("710000000".to_string());

            let id = vm.submit("101");
            vm.settle(&id, Ok(detail("101")));

            assert_eq!(
                vm.filters.applied.get_untracked(),
                RatingsFilterDraft::defaults(day()).to_params()
            );
            assert_eq!(
                vm.filters.city_id.get_untracked(),
                RatingsFilterDraft::defaults(day()).city_id
            );
            assert!(!vm.banner.is_shown());
        });
    }

    #[test]
    fn failed_lookup_keeps_applied_filters() {
        Owner::new().with(|| {
            let vm = Wiring::new();
            let shown = vm.submit("101");
            vm.settle(&shown, Ok(detail("101")));
            vm.filters.applied.set(Some(custom_params()));

            let missing = vm.submit("999");
            vm.settle(&missing, Err(not_found()));

            assert_eq!(vm.filters.applied.get_untracked(), Some(custom_params()));
            assert_eq!(vm.banner.get(), Some("Product not found".to_string()));
            assert_eq!(vm.panel.with_untracked(|p| p.committed().cloned()), Some(shown));
        });
    }

    #[test]
    fn failed_refetch_of_shown_product_raises_no_second_banner() {
        Owner::new().with(|| {
            let vm = Wiring::new();
            let shown = vm.submit("101");
            vm.settle(&shown, Ok(detail("101")));

            let missing = vm.submit("999");
            vm.settle(&missing, Err(not_found()));
            vm.banner.reset();

            vm.settle(&shown, Err(ApiError::Timeout));
            assert!(!vm.banner.is_shown());
            assert_eq!(vm.panel.with_untracked(|p| p.detail()).unwrap().id, "101");
        });
    }

    #[test]
    fn snapshot_for_other_key_or_cancelled_is_ignored() {
        Owner::new().with(|| {
            let vm = Wiring::new();
            let a = vm.submit("A");
            let b = vm.submit("B");

            vm.settle(&a, Ok(detail("A")));
            vm.settle(&b, Err(ApiError::Cancelled));

            assert!(vm.panel.with_untracked(|p| p.detail()).is_none());
            assert_eq!(vm.filters.applied.get_untracked(), None);
            assert!(!vm.banner.is_shown());
        });
    }
}
