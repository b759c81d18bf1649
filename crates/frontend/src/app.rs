use crate::routes::routes::AppRoutes;
use crate::shared::query::{provide_query_client, QueryClient};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Один кэш запросов на всё приложение
    provide_query_client(QueryClient::new());

    view! {
        <AppRoutes />
    }
}
