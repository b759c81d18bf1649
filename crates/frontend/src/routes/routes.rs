use crate::domain::a001_product::ui::page::ProductsPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <h2>"Страница не найдена"</h2>
            <a href="/">"К списку товаров"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=ProductsPage />
                <Route path=path!("/products") view=ProductsPage />
            </Routes>
        </Router>
    }
}
