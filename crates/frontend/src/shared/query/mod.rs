//! Кэш запросов к бэкенду: записи по ключу (операция + параметры),
//! свежесть, удаление неиспользуемых записей, отмена и повтор.

pub mod client;
pub mod clock;
pub mod hook;
pub mod key;
pub mod observer;
pub mod policy;
pub mod state;

pub use client::QueryClient;
pub use clock::{Clock, SystemClock};
pub use hook::{provide_query_client, use_query, use_query_client, QueryHandle};
pub use key::QueryKey;
pub use observer::QueryObserver;
pub use policy::QueryPolicy;
pub use state::{QuerySnapshot, QueryState};
