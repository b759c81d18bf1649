/// Utilities for date and time formatting
///
/// Даты графика и фильтров: подписи оси, поля `<input type="date">`.
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Формат значения `<input type="date">`
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS_SHORT_RU: [&str; 12] = [
    "янв", "фев", "мар", "апр", "мая", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// Сегодня по локальным часам браузера
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Подпись оси графика: "05 мар"
pub fn format_day_month(at: NaiveDateTime) -> String {
    let month = MONTHS_SHORT_RU[at.month0() as usize];
    format!("{:02} {}", at.day(), month)
}

/// Format datetime to DD.MM.YYYY HH:MM
/// Example: 2024-03-15T14:02:26 -> "15.03.2024 14:02"
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

/// Значение для `<input type="date">`; пустая строка, если даты нет
pub fn format_input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Разбор значения `<input type="date">`; очищенное поле даёт `None`
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_day_month() {
        assert_eq!(format_day_month(at(2024, 3, 5, 14, 2)), "05 мар");
        assert_eq!(format_day_month(at(2024, 12, 31, 0, 0)), "31 дек");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(at(2024, 3, 15, 14, 2)), "15.03.2024 14:02");
    }

    #[test]
    fn test_input_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(format_input_date(Some(date)), "2024-01-09");
        assert_eq!(format_input_date(None), "");
        assert_eq!(parse_input_date("2024-01-09"), Some(date));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("09.01.2024"), None);
    }
}
