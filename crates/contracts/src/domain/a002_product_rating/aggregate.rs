use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Количество карточек на одной странице выдачи площадки.
///
/// Позиция товара в выдаче считается как `page * SLOTS_PER_PAGE + place + 1`.
pub const SLOTS_PER_PAGE: i64 = 12;

/// Снимок позиции товара в выдаче (одна сессия парсинга)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    /// Время сессии (UTC)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub session_created_at: NaiveDateTime,
    /// Страница выдачи, с 0
    pub page: i64,
    /// Место на странице, с 0
    pub place: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_before_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedbacks_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_card: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_merchant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_campaign_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_city_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_category_filter_id: Option<i64>,
}

impl RatingPoint {
    /// Сквозная позиция в выдаче (1 = первое место на первой странице)
    pub fn rank(&self) -> i64 {
        rank(self.page, self.place)
    }
}

/// Сквозная позиция по странице и месту на ней
pub fn rank(page: i64, place: i64) -> i64 {
    page * SLOTS_PER_PAGE + (place + 1)
}

/// Бэкенд отдаёт время то с часовым поясом, то без него.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp: {raw}")))
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
