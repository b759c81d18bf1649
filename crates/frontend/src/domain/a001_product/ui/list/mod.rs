pub mod state;
pub mod table;

use crate::domain::a001_product::queries::use_products;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::app_config;
use crate::shared::list_utils::SearchInput;
use contracts::domain::a001_product::request::PAGE_SIZE_OPTIONS;
use leptos::prelude::*;
use state::create_state;
use table::{ProductTable, TableMode};
use thaw::*;

/// Список товаров: поиск, таблица, пейджер
#[component]
pub fn ProductList(
    #[prop(into)] selected_id: Signal<Option<String>>,
    on_select: Callback<String>,
    #[prop(optional)] truncate_to: Option<usize>,
) -> impl IntoView {
    let state = create_state();
    let mode = truncate_to.map_or(TableMode::Paged, TableMode::Truncated);
    let products = use_products(move || Some(state.with(|s| s.to_query())));

    let rows = Signal::derive(move || {
        products
            .data()
            .map(|page| page.data.clone())
            .unwrap_or_default()
    });
    let total_count = Signal::derive(move || products.data().map_or(0, |p| p.total));
    let total_pages = Signal::derive(move || products.data().map_or(0, |p| p.total_pages()));
    let loading = Signal::derive(move || products.is_fetching());
    let search = Signal::derive(move || state.with(|s| s.search.clone()));

    view! {
        <div class="product-list">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 8px;">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |text: String| state.update(|s| s.set_search(text)))
                    placeholder="Поиск"
                />
                <Flex gap=FlexGap::Small style="align-items: center;">
                    <Show when=move || loading.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                    {move || products.error_message().map(|message| view! {
                        <span class="text-error" title=message.clone()>{message.clone()}</span>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| products.refetch()>
                            "Повторить"
                        </Button>
                    })}
                </Flex>
            </Flex>

            <ProductTable
                rows=rows
                loading=loading
                search=search
                selected_id=selected_id
                on_select=on_select
                shop_url=app_config().shop_url.clone()
                mode=mode
            />

            <Show when=move || mode.shows_pager()>
                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=total_pages
                    total_count=total_count
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_change=Callback::new(move |page: u32| state.update(|s| s.set_page(page)))
                    on_page_size_change=Callback::new(move |size: u32| state.update(|s| s.set_page_size(size)))
                    page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                />
            </Show>
        </div>
    }
}
