use super::client::QueryClient;
use super::key::QueryKey;
use super::observer::QueryObserver;
use super::policy::QueryPolicy;
use super::state::QuerySnapshot;
use crate::shared::api_utils::ApiError;
use crate::shared::timer::Ticker;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Как часто кэш выметает записи без наблюдателей
const GC_INTERVAL_MS: u32 = 60_000;

type ClientSlot = StoredValue<QueryClient, LocalStorage>;

/// Положить кэш запросов в контекст приложения и запустить сборку мусора
pub fn provide_query_client(client: QueryClient) {
    let gc = client.clone();
    Ticker::new(GC_INTERVAL_MS, move || {
        let evicted = gc.collect_garbage();
        if evicted > 0 {
            log::debug!("query cache: {evicted} entries evicted, {} left", gc.len());
        }
    })
    .forget();
    provide_context::<ClientSlot>(StoredValue::new_local(client));
}

pub fn use_query_client() -> QueryClient {
    expect_context::<ClientSlot>().get_value()
}

/// Реактивная ручка запроса для компонентов
pub struct QueryHandle<T: Send + Sync + 'static> {
    snapshot: RwSignal<QuerySnapshot<T>>,
    observer: StoredValue<QueryObserver<T>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryHandle<T> {}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        self.snapshot.get()
    }

    /// Данные для показа: текущие или предыдущие, пока грузятся новые
    pub fn data(&self) -> Option<Arc<T>> {
        self.snapshot.with(|s| s.display_data())
    }

    pub fn is_idle(&self) -> bool {
        self.snapshot.with(|s| s.state.is_idle())
    }

    pub fn is_fetching(&self) -> bool {
        self.snapshot.with(|s| s.state.is_fetching())
    }

    /// Текст ошибки для UI; отмена ошибкой не считается
    pub fn error_message(&self) -> Option<String> {
        self.snapshot.with(|s| s.error_message())
    }

    pub fn refetch(&self) {
        let Some(observer) = self.observer.try_get_value() else {
            return;
        };
        spawn_local(async move { observer.refetch().await });
    }
}

/// Подписать компонент на запрос.
///
/// `params` читается реактивно: `None` выключает запрос (`Idle`), новое
/// значение переключает наблюдателя на другой ключ. Повторное то же
/// значение ничего не делает.
pub fn use_query<P, T, F, Fut>(
    operation: &'static str,
    policy: QueryPolicy,
    params: impl Fn() -> Option<P> + 'static,
    fetcher: F,
) -> QueryHandle<T>
where
    P: Serialize + Clone + PartialEq + 'static,
    T: Send + Sync + 'static,
    F: Fn(P, CancellationToken) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let snapshot = RwSignal::new(QuerySnapshot::<T>::default());
    let observer = QueryObserver::new(client, policy, move |next| {
        let _ = snapshot.try_set(next);
    });
    let observer = StoredValue::new_local(observer);
    let fetcher = Rc::new(fetcher);

    Effect::new(move |prev: Option<Option<P>>| {
        let next = params();
        if prev.as_ref() == Some(&next) {
            return next;
        }
        let Some(observer) = observer.try_get_value() else {
            return next;
        };
        match next.clone() {
            None => observer.clear(),
            Some(p) => {
                let key = QueryKey::new(operation, &p);
                let fetcher = fetcher.clone();
                spawn_local(async move {
                    observer
                        .set_key(key, move |cancel| fetcher(p.clone(), cancel))
                        .await
                });
            }
        }
        next
    });

    QueryHandle { snapshot, observer }
}
