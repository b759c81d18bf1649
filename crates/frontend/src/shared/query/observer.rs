use super::client::QueryClient;
use super::key::QueryKey;
use super::policy::QueryPolicy;
use super::state::{QuerySnapshot, QueryState};
use crate::shared::api_utils::ApiError;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type BoxedFetch<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>>>>;
type Fetcher<T> = Rc<dyn Fn(CancellationToken) -> BoxedFetch<T>>;
type Listener<T> = Box<dyn Fn(QuerySnapshot<T>)>;

struct ObserverInner<T: 'static> {
    client: QueryClient,
    policy: QueryPolicy,
    ticket: Cell<u64>,
    current: RefCell<Option<(QueryKey, Fetcher<T>)>>,
    latest: RefCell<Option<Arc<T>>>,
    listener: Listener<T>,
}

impl<T: 'static> ObserverInner<T> {
    fn publish(&self, key: Option<QueryKey>, state: QueryState<T>) {
        let latest = self.latest.borrow().clone();
        (self.listener)(QuerySnapshot { key, state, latest });
    }

    fn current_key(&self) -> Option<QueryKey> {
        self.current.borrow().as_ref().map(|(key, _)| key.clone())
    }
}

impl<T: 'static> Drop for ObserverInner<T> {
    fn drop(&mut self) {
        if let Some((key, _)) = self.current.get_mut().take() {
            self.client.unobserve(&key);
        }
    }
}

/// Наблюдатель одной «ячейки» экрана за записями кэша.
///
/// Держит текущий ключ, переключается между ключами и отдаёт слушателю
/// снимки состояния. Применяется только результат последнего запроса.
pub struct QueryObserver<T: 'static> {
    inner: Rc<ObserverInner<T>>,
}

impl<T: 'static> Clone for QueryObserver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> QueryObserver<T> {
    pub fn new(
        client: QueryClient,
        policy: QueryPolicy,
        listener: impl Fn(QuerySnapshot<T>) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(ObserverInner {
                client,
                policy,
                ticket: Cell::new(0),
                current: RefCell::new(None),
                latest: RefCell::new(None),
                listener: Box::new(listener),
            }),
        }
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.inner.current_key()
    }

    /// Показать данные по ключу, при необходимости загрузив их.
    ///
    /// Пока идёт загрузка, на экране остаются закэшированные данные ключа
    /// или данные предыдущего ключа (`Stale`).
    pub async fn set_key<F, Fut>(&self, key: QueryKey, fetcher: F)
    where
        F: Fn(CancellationToken) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let fetcher: Fetcher<T> = Rc::new(move |cancel: CancellationToken| {
            Box::pin(fetcher(cancel)) as BoxedFetch<T>
        });
        self.switch_to(key.clone(), fetcher.clone());
        self.run(key, fetcher).await;
    }

    /// Загрузить текущий ключ заново, минуя свежесть
    pub async fn refetch(&self) {
        let current = self.inner.current.borrow().clone();
        if let Some((key, fetcher)) = current {
            self.inner.client.invalidate(&key);
            self.run(key, fetcher).await;
        }
    }

    /// Выключить наблюдателя: нет идентификатора или параметров
    pub fn clear(&self) {
        self.bump_ticket();
        if let Some((key, _)) = self.inner.current.borrow_mut().take() {
            self.inner.client.unobserve(&key);
        }
        self.inner.latest.replace(None);
        self.inner.publish(None, QueryState::Idle);
    }

    fn bump_ticket(&self) -> u64 {
        let ticket = self.inner.ticket.get() + 1;
        self.inner.ticket.set(ticket);
        ticket
    }

    fn switch_to(&self, key: QueryKey, fetcher: Fetcher<T>) {
        let previous = self.inner.current.replace(Some((key.clone(), fetcher)));
        match previous {
            Some((old, _)) if old == key => {}
            Some((old, _)) => {
                self.inner.client.observe(&key, &self.inner.policy);
                self.inner.client.unobserve(&old);
            }
            None => self.inner.client.observe(&key, &self.inner.policy),
        }
    }

    async fn run(&self, key: QueryKey, fetcher: Fetcher<T>) {
        let ticket = self.bump_ticket();
        let inner = &self.inner;
        let client = &inner.client;

        if client.is_fresh(&key, &inner.policy) {
            if let Some(data) = client.get_data::<T>(&key) {
                inner.latest.replace(Some(data.clone()));
                inner.publish(Some(key), QueryState::Settled(Ok(data)));
                return;
            }
        }

        let placeholder = client
            .get_data::<T>(&key)
            .or_else(|| inner.latest.borrow().clone());
        let pending = match placeholder {
            Some(data) => QueryState::Stale(data),
            None => QueryState::Loading,
        };
        inner.publish(Some(key.clone()), pending);

        let result = client
            .fetch(&key, &inner.policy, move |cancel| fetcher(cancel))
            .await;

        if inner.ticket.get() != ticket {
            log::debug!("query {key}: observer moved on, result dropped");
            return;
        }

        let state = match result {
            Ok(data) => {
                inner.latest.replace(Some(data.clone()));
                QueryState::Settled(Ok(data))
            }
            // другой наблюдатель перезапустил тот же ключ
            Err(ApiError::Cancelled) => match client.get_data::<T>(&key) {
                Some(data) => QueryState::Settled(Ok(data)),
                None => QueryState::Settled(Err(ApiError::Cancelled)),
            },
            Err(e) => QueryState::Settled(Err(e)),
        };
        inner.publish(Some(key), state);
    }
}
