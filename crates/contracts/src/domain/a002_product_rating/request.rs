use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Город сессии по умолчанию (Алматы)
pub const DEFAULT_CITY_ID: &str = "750000000";

/// Формат дат в query-параметрах
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Применённые параметры графика рейтинга
///
/// Значение неизменяемо после применения: каждое «Применить»/«Сбросить»
/// создаёт новый экземпляр.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingsQueryParams {
    pub city_id: String,
    pub promoted_card: bool,
    pub date_from: NaiveDateTime,
    pub date_till: NaiveDateTime,
    pub category_filter_id: Option<i64>,
}

impl RatingsQueryParams {
    /// Параметры для диапазона дней `[from, to]` включительно
    ///
    /// `date_till` указывает на полночь следующего дня, чтобы последний
    /// день попадал в выборку целиком.
    pub fn for_days(
        city_id: &str,
        promoted_card: bool,
        from: NaiveDate,
        to_inclusive: NaiveDate,
        category_filter_id: Option<i64>,
    ) -> Self {
        let next_day = to_inclusive
            .checked_add_days(Days::new(1))
            .unwrap_or(to_inclusive);
        Self {
            city_id: city_id.trim().to_string(),
            promoted_card,
            date_from: from.and_time(NaiveTime::MIN),
            date_till: next_day.and_time(NaiveTime::MIN),
            category_filter_id,
        }
    }

    /// Параметры по умолчанию: последний месяц до «завтра 00:00»
    pub fn defaults(today: NaiveDate) -> Self {
        let (from, to) = default_day_range(today);
        Self::for_days(DEFAULT_CITY_ID, false, from, to, None)
    }

    /// Параметры в виде, который уходит на бэкенд
    pub fn to_query(&self) -> ProductRatingsQuery {
        ProductRatingsQuery {
            session_city_id: self.city_id.clone(),
            promoted_card: self.promoted_card,
            date_from: self.date_from.format(WIRE_DATE_FORMAT).to_string(),
            date_till: self.date_till.format(WIRE_DATE_FORMAT).to_string(),
            session_category_filter_id: self.category_filter_id,
        }
    }
}

/// Диапазон дней по умолчанию: месяц назад … сегодня (включительно)
pub fn default_day_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today.checked_sub_months(Months::new(1)).unwrap_or(today);
    (from, today)
}

/// Query-параметры `GET /api/product-ratings/product/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRatingsQuery {
    pub session_city_id: String,
    pub promoted_card: bool,
    pub date_from: String,
    pub date_till: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_category_filter_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_different_time_serializes_identically() {
        let mut morning = RatingsQueryParams::defaults(day(2024, 1, 15));
        morning.date_from = day(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let mut evening = morning.clone();
        evening.date_from = day(2024, 1, 1).and_hms_opt(23, 59, 0).unwrap();

        assert_ne!(morning, evening);
        assert_eq!(morning.to_query(), evening.to_query());
        assert_eq!(morning.to_query().date_from, "2024-01-01");
    }

    #[test]
    fn defaults_end_tomorrow_midnight() {
        let params = RatingsQueryParams::defaults(day(2024, 3, 31));
        assert_eq!(params.city_id, DEFAULT_CITY_ID);
        assert!(!params.promoted_card);
        assert_eq!(params.date_from, day(2024, 2, 29).and_time(NaiveTime::MIN));
        assert_eq!(params.date_till, day(2024, 4, 1).and_time(NaiveTime::MIN));
        assert_eq!(params.to_query().date_till, "2024-04-01");
    }

    #[test]
    fn city_is_trimmed_and_category_passed_through() {
        let params = RatingsQueryParams::for_days(" 710000000 ", true, day(2024, 1, 1), day(2024, 1, 7), Some(42));
        let query = params.to_query();
        assert_eq!(query.session_city_id, "710000000");
        assert!(query.promoted_card);
        assert_eq!(query.date_till, "2024-01-08");
        assert_eq!(query.session_category_filter_id, Some(42));
    }
}
