use chrono::NaiveDate;
use contracts::domain::a002_product_rating::request::{
    default_day_range, RatingsQueryParams, DEFAULT_CITY_ID,
};

/// Разобрать поле категории; `Err` если введено не число
pub fn parse_category_filter(raw: &str) -> Result<Option<i64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| format!("Категория должна быть числом: {raw}"))
}

/// Черновик фильтров графика, пока пользователь его редактирует
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingsFilterDraft {
    pub city_id: String,
    pub promoted_card: bool,
    pub date_from: Option<NaiveDate>,
    /// Последний день периода, включительно
    pub date_to: Option<NaiveDate>,
    /// Текст поля категории; пусто значит «не задан»
    pub category_filter: String,
}

impl RatingsFilterDraft {
    pub fn defaults(today: NaiveDate) -> Self {
        let (from, to) = default_day_range(today);
        Self {
            city_id: DEFAULT_CITY_ID.to_string(),
            promoted_card: false,
            date_from: Some(from),
            date_to: Some(to),
            category_filter: String::new(),
        }
    }

    pub fn category_filter_id(&self) -> Result<Option<i64>, String> {
        parse_category_filter(&self.category_filter)
    }

    /// «Применить» доступно при непустом городе, обеих датах и корректной категории
    pub fn can_apply(&self) -> bool {
        !self.city_id.trim().is_empty()
            && self.date_from.is_some()
            && self.date_to.is_some()
            && self.category_filter_id().is_ok()
    }

    /// Собрать новые применённые параметры. Перевёрнутый период
    /// разворачивается.
    pub fn to_params(&self) -> Option<RatingsQueryParams> {
        if !self.can_apply() {
            return None;
        }
        let (from, to) = match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if from <= to => (from, to),
            (Some(from), Some(to)) => (to, from),
            _ => return None,
        };
        let category = self.category_filter_id().ok()?;
        Some(RatingsQueryParams::for_days(
            &self.city_id,
            self.promoted_card,
            from,
            to,
            category,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn empty_city_blocks_apply_regardless_of_dates() {
        let mut draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        draft.city_id = "   ".into();
        assert!(!draft.can_apply());
        assert_eq!(draft.to_params(), None);

        draft.city_id = String::new();
        draft.date_from = None;
        assert!(!draft.can_apply());
    }

    #[test]
    fn missing_date_blocks_apply() {
        let mut draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        draft.date_to = None;
        assert!(!draft.can_apply());
    }

    #[test]
    fn defaults_cover_last_month_through_tomorrow() {
        let draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        let params = draft.to_params().unwrap();
        assert_eq!(params, RatingsQueryParams::defaults(day(2024, 3, 15)));
        assert_eq!(params.date_from, midnight(day(2024, 2, 15)));
        assert_eq!(params.date_till, midnight(day(2024, 3, 16)));
        assert_eq!(params.city_id, DEFAULT_CITY_ID);
    }

    #[test]
    fn apply_trims_city_and_parses_category() {
        let mut draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        draft.city_id = " 710000000 ".into();
        draft.category_filter = " 42 ".into();
        let params = draft.to_params().unwrap();
        assert_eq!(params.city_id, "710000000");
        assert_eq!(params.category_filter_id, Some(42));
    }

    #[test]
    fn non_numeric_category_blocks_apply() {
        let mut draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        draft.category_filter = "abc".into();
        assert!(draft.category_filter_id().is_err());
        assert!(!draft.can_apply());
    }

    #[test]
    fn reversed_range_is_swapped() {
        let mut draft = RatingsFilterDraft::defaults(day(2024, 3, 15));
        draft.date_from = Some(day(2024, 3, 10));
        draft.date_to = Some(day(2024, 3, 1));
        let params = draft.to_params().unwrap();
        assert_eq!(params.date_from, midnight(day(2024, 3, 1)));
        assert_eq!(params.date_till, midnight(day(2024, 3, 11)));
    }
}
