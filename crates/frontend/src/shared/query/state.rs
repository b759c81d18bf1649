use super::key::QueryKey;
use crate::shared::api_utils::{describe, ApiError};
use std::sync::Arc;

/// Состояние загрузки для наблюдателя
///
/// `Stale` держит предыдущие данные на экране, пока грузится новый ключ.
#[derive(Debug)]
pub enum QueryState<T> {
    /// Запрос выключен: нет идентификатора или параметров
    Idle,
    /// Идёт загрузка, показать нечего
    Loading,
    /// Идёт загрузка, на экране прежние данные
    Stale(Arc<T>),
    /// Загрузка завершилась
    Settled(Result<Arc<T>, ApiError>),
}

impl<T> QueryState<T> {
    /// Данные, которые можно показать прямо сейчас
    pub fn data(&self) -> Option<Arc<T>> {
        match self {
            Self::Stale(data) | Self::Settled(Ok(data)) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Loading | Self::Stale(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Settled(Err(e)) => Some(e),
            _ => None,
        }
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Stale(data) => Self::Stale(data.clone()),
            Self::Settled(result) => Self::Settled(result.clone()),
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// То, что наблюдатель отдаёт в UI после каждого изменения
#[derive(Debug)]
pub struct QuerySnapshot<T> {
    /// Ключ, к которому относится `state`
    pub key: Option<QueryKey>,
    pub state: QueryState<T>,
    /// Последние успешно загруженные данные (по любому ключу)
    pub latest: Option<Arc<T>>,
}

impl<T> QuerySnapshot<T> {
    /// Данные текущего ключа, иначе последние успешные
    pub fn display_data(&self) -> Option<Arc<T>> {
        self.state.data().or_else(|| self.latest.clone())
    }

    pub fn error_message(&self) -> Option<String> {
        match self.state.error() {
            Some(ApiError::Cancelled) | None => None,
            Some(e) => Some(describe(e)),
        }
    }
}

impl<T> Clone for QuerySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            state: self.state.clone(),
            latest: self.latest.clone(),
        }
    }
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self {
            key: None,
            state: QueryState::Idle,
            latest: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_state_shows_previous_data() {
        let state = QueryState::Stale(Arc::new(5));
        assert!(state.is_fetching());
        assert_eq!(state.data().as_deref(), Some(&5));
        assert!(state.error().is_none());
    }

    #[test]
    fn failed_snapshot_falls_back_to_latest() {
        let snapshot = QuerySnapshot {
            key: None,
            state: QueryState::<i32>::Settled(Err(ApiError::Timeout)),
            latest: Some(Arc::new(7)),
        };
        assert_eq!(snapshot.display_data().as_deref(), Some(&7));
        assert_eq!(snapshot.error_message().as_deref(), Some("Request timed out"));
    }

    #[test]
    fn cancellation_is_not_reported() {
        let snapshot = QuerySnapshot {
            key: None,
            state: QueryState::<i32>::Settled(Err(ApiError::Cancelled)),
            latest: None,
        };
        assert_eq!(snapshot.error_message(), None);
    }
}
