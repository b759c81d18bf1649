use super::model::{parse_category_filter, RatingsFilterDraft};
use chrono::NaiveDate;
use contracts::domain::a002_product_rating::request::RatingsQueryParams;
use leptos::prelude::*;

/// ViewModel фильтров графика рейтинга
///
/// Поля формы правятся напрямую через сигналы. `applied` меняется только
/// командами `apply` и `reset`.
#[derive(Clone, Copy)]
pub struct RatingsFilterViewModel {
    pub city_id: RwSignal<String>,
    pub promoted_card: RwSignal<bool>,
    pub date_from: RwSignal<Option<NaiveDate>>,
    pub date_to: RwSignal<Option<NaiveDate>>,
    pub category_filter: RwSignal<String>,
    /// Параметры, по которым строится график; `None` до первого применения
    pub applied: RwSignal<Option<RatingsQueryParams>>,
}

impl RatingsFilterViewModel {
    pub fn new(today: NaiveDate) -> Self {
        let draft = RatingsFilterDraft::defaults(today);
        Self {
            city_id: RwSignal::new(draft.city_id),
            promoted_card: RwSignal::new(draft.promoted_card),
            date_from: RwSignal::new(draft.date_from),
            date_to: RwSignal::new(draft.date_to),
            category_filter: RwSignal::new(draft.category_filter),
            applied: RwSignal::new(None),
        }
    }

    pub fn draft(&self) -> RatingsFilterDraft {
        RatingsFilterDraft {
            city_id: self.city_id.get(),
            promoted_card: self.promoted_card.get(),
            date_from: self.date_from.get(),
            date_to: self.date_to.get(),
            category_filter: self.category_filter.get(),
        }
    }

    pub fn can_apply(&self) -> bool {
        self.draft().can_apply()
    }

    pub fn category_error(&self) -> Option<String> {
        self.category_filter
            .with(|raw| parse_category_filter(raw).err())
    }

    pub fn set_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from.set(from);
        self.date_to.set(to);
    }

    /// Применить черновик
    pub fn apply_command(&self) {
        let draft = self.draft();
        match draft.to_params() {
            Some(params) => {
                log::debug!("ratings filters applied: {:?}", params);
                self.applied.set(Some(params));
            }
            None => log::warn!("ratings filters not applicable: {:?}", draft),
        }
    }

    /// Сбросить черновик к значениям по умолчанию и сразу применить
    pub fn reset_command(&self, today: NaiveDate) {
        let draft = RatingsFilterDraft::defaults(today);
        self.city_id.set(draft.city_id.clone());
        self.promoted_card.set(draft.promoted_card);
        self.set_range(draft.date_from, draft.date_to);
        self.category_filter.set(draft.category_filter.clone());
        self.applied.set(draft.to_params());
    }

    pub fn clear_category(&self) {
        self.category_filter.set(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn apply_is_refused_for_incomplete_draft() {
        Owner::new().with(|| {
            let vm = RatingsFilterViewModel::new(day());
            vm.apply_command();
            let applied = vm.applied.get_untracked();
            assert!(applied.is_some());

            vm.city_id.set("  ".to_string());
            assert!(!vm.can_apply());
            vm.apply_command();
            assert_eq!(vm.applied.get_untracked(), applied);

            vm.city_id.set("710000000".to_string());
            vm.category_filter.set("abc".to_string());
            assert!(vm.category_error().is_some());
            vm.apply_command();
            assert_eq!(vm.applied.get_untracked(), applied);
        });
    }

    #[test]
    fn apply_commits_reversed_range_in_order() {
        Owner::new().with(|| {
            let vm = RatingsFilterViewModel::new(day());
            let early = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
            let late = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
            vm.set_range(Some(late), Some(early));
            vm.apply_command();

            let applied = vm.applied.get_untracked().unwrap();
            assert_eq!(applied.date_from, early.and_hms_opt(0, 0, 0).unwrap());
            assert!(applied.date_till > applied.date_from);
        });
    }

    #[test]
    fn reset_commits_defaults_immediately() {
        Owner::new().with(|| {
            let vm = RatingsFilterViewModel::new(day());
            vm.city_id.set("710000000".to_string());
            vm.promoted_card.set(true);
            vm.category_filter.set("abc".to_string());
            assert_eq!(vm.applied.get_untracked(), None);

            vm.reset_command(day());

            let defaults = RatingsFilterDraft::defaults(day());
            assert_eq!(vm.applied.get_untracked(), defaults.to_params());
            assert_eq!(vm.city_id.get_untracked(), defaults.city_id);
            assert!(!vm.promoted_card.get_untracked());
            assert!(vm.category_error().is_none());
        });
    }
}
