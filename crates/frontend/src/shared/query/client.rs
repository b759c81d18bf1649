use super::clock::{Clock, SystemClock};
use super::key::QueryKey;
use super::policy::QueryPolicy;
use crate::shared::api_utils::ApiError;
use chrono::{DateTime, Duration, Utc};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type ErasedData = Arc<dyn Any + Send + Sync>;

struct InFlight {
    id: u64,
    cancel: CancellationToken,
}

struct CacheEntry {
    data: Option<ErasedData>,
    updated_at: Option<DateTime<Utc>>,
    error: Option<ApiError>,
    in_flight: Option<InFlight>,
    observers: usize,
    inactive_since: Option<DateTime<Utc>>,
    gc_time: Duration,
}

impl CacheEntry {
    fn new(gc_time: Duration) -> Self {
        Self {
            data: None,
            updated_at: None,
            error: None,
            in_flight: None,
            observers: 0,
            inactive_since: None,
            gc_time,
        }
    }
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<QueryKey, CacheEntry>,
    next_fetch_id: u64,
}

/// Кэш запросов: записи по ключу (операция + параметры).
///
/// Отвечает за свежесть, удаление неиспользуемых записей, отмену
/// устаревших запросов и повтор после ошибки. Клонирование даёт тот же кэш.
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<RefCell<CacheInner>>,
    clock: Rc<dyn Clock>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CacheInner::default())),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Данные записи независимо от свежести
    pub fn get_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let inner = self.inner.borrow();
        let data = inner.entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    /// Последняя ошибка записи (сбрасывается успешной загрузкой)
    pub fn get_error(&self, key: &QueryKey) -> Option<ApiError> {
        self.inner.borrow().entries.get(key)?.error.clone()
    }

    /// Свежи ли данные записи для данной политики
    pub fn is_fresh(&self, key: &QueryKey, policy: &QueryPolicy) -> bool {
        let now = self.clock.now();
        let inner = self.inner.borrow();
        match inner.entries.get(key) {
            Some(CacheEntry {
                data: Some(_),
                updated_at: Some(at),
                ..
            }) => now - *at < policy.stale_time,
            _ => false,
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .is_some_and(|e| e.in_flight.is_some())
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map_or(0, |e| e.observers)
    }

    /// Экран начал показывать запись
    pub fn observe(&self, key: &QueryKey, policy: &QueryPolicy) {
        let mut inner = self.inner.borrow_mut();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(policy.gc_time));
        entry.observers += 1;
        entry.inactive_since = None;
        entry.gc_time = entry.gc_time.max(policy.gc_time);
    }

    /// Экран перестал показывать запись.
    ///
    /// Когда уходит последний наблюдатель, незавершённый запрос отменяется
    /// и начинается отсчёт времени хранения.
    pub fn unobserve(&self, key: &QueryKey) {
        let now = self.clock.now();
        let abandoned = {
            let mut inner = self.inner.borrow_mut();
            let Some(entry) = inner.entries.get_mut(key) else {
                return;
            };
            entry.observers = entry.observers.saturating_sub(1);
            if entry.observers > 0 {
                return;
            }
            entry.inactive_since = Some(now);
            entry.in_flight.take()
        };
        if let Some(in_flight) = abandoned {
            log::debug!("query {key}: no observers left, cancelling fetch");
            in_flight.cancel.cancel();
        }
    }

    /// Пометить данные устаревшими: следующий fetch пойдёт на бэкенд
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(key) {
            entry.updated_at = None;
        }
    }

    /// Удалить записи без наблюдателей, пролежавшие дольше времени хранения.
    ///
    /// Возвращает число удалённых записей.
    pub fn collect_garbage(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|key, entry| {
            let expired = entry.observers == 0
                && entry.in_flight.is_none()
                && entry
                    .inactive_since
                    .is_some_and(|since| now - since >= entry.gc_time);
            if expired {
                log::debug!("query {key}: evicted");
            }
            !expired
        });
        before - inner.entries.len()
    }

    /// Получить данные по ключу: из кэша, если они свежие, иначе с бэкенда.
    ///
    /// Новый запрос по ключу отменяет предыдущий незавершённый запрос по
    /// тому же ключу; результат отменённого запроса в кэш не попадает.
    /// Ошибки, допускающие повтор, повторяются не более `policy.retry` раз.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: &QueryPolicy,
        fetcher: F,
    ) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if self.is_fresh(key, policy) {
            if let Some(data) = self.get_data::<T>(key) {
                log::debug!("query {key}: fresh cache hit");
                return Ok(data);
            }
        }

        let (fetch_id, cancel) = self.begin_fetch(key, policy);
        log::debug!("query {key}: fetch #{fetch_id} started");

        let mut retries_left = policy.retry;
        let result = loop {
            let outcome = fetcher(cancel.clone()).await;
            if cancel.is_cancelled() {
                break Err(ApiError::Cancelled);
            }
            match outcome {
                Ok(value) => break Ok(value),
                Err(e) if retries_left > 0 && e.is_retryable() => {
                    retries_left -= 1;
                    log::warn!("query {key}: {e}, retrying");
                }
                Err(e) => break Err(e),
            }
        };

        self.finish_fetch(key, fetch_id, result)
    }

    fn begin_fetch(&self, key: &QueryKey, policy: &QueryPolicy) -> (u64, CancellationToken) {
        let cancel = CancellationToken::new();
        let superseded = {
            let mut inner = self.inner.borrow_mut();
            inner.next_fetch_id += 1;
            let id = inner.next_fetch_id;
            let entry = inner
                .entries
                .entry(key.clone())
                .or_insert_with(|| CacheEntry::new(policy.gc_time));
            let previous = entry.in_flight.replace(InFlight {
                id,
                cancel: cancel.clone(),
            });
            (id, previous)
        };
        let (id, previous) = superseded;
        if let Some(previous) = previous {
            log::debug!("query {key}: fetch #{} superseded", previous.id);
            previous.cancel.cancel();
        }
        (id, cancel)
    }

    fn finish_fetch<T: Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        fetch_id: u64,
        result: Result<T, ApiError>,
    ) -> Result<Arc<T>, ApiError> {
        let now = self.clock.now();
        let mut inner = self.inner.borrow_mut();
        let Some(entry) = inner.entries.get_mut(key) else {
            return Err(ApiError::Cancelled);
        };
        if entry.in_flight.as_ref().map(|f| f.id) != Some(fetch_id) {
            log::debug!("query {key}: dropping result of fetch #{fetch_id}");
            return Err(ApiError::Cancelled);
        }
        entry.in_flight = None;

        match result {
            Ok(value) => {
                let data = Arc::new(value);
                entry.data = Some(data.clone() as ErasedData);
                entry.updated_at = Some(now);
                entry.error = None;
                Ok(data)
            }
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(e) => {
                entry.error = Some(e.clone());
                Err(e)
            }
        }
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}
