use chrono::Duration;

/// Политика записи кэша для одной операции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Сколько результат считается свежим и отдаётся без запроса
    pub stale_time: Duration,
    /// Сколько запись без наблюдателей живёт до удаления
    pub gc_time: Duration,
    /// Сколько раз повторять упавший запрос
    pub retry: u32,
}

impl QueryPolicy {
    pub fn new(stale_time: Duration, gc_time: Duration, retry: u32) -> Self {
        Self {
            stale_time,
            gc_time,
            retry,
        }
    }
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self::new(Duration::zero(), Duration::minutes(5), 1)
    }
}

/// Список товаров: страница свежая минуту
pub fn products_policy() -> QueryPolicy {
    QueryPolicy::new(Duration::seconds(60), Duration::minutes(5), 1)
}

/// Карточка товара меняется редко
pub fn product_detail_policy() -> QueryPolicy {
    QueryPolicy::new(Duration::minutes(5), Duration::minutes(10), 1)
}

pub fn product_ratings_policy() -> QueryPolicy {
    QueryPolicy::new(Duration::seconds(60), Duration::minutes(5), 1)
}
