use super::details::view::ProductDetailsPanel;
use super::details::view_model::ProductDetailsViewModel;
use super::list::ProductList;
use crate::shared::components::page_header::PageHeader;
use leptos::prelude::*;
use thaw::*;

/// Страница товаров: список сверху, карточка с графиком под ним
#[component]
pub fn ProductsPage() -> impl IntoView {
    let details = ProductDetailsViewModel::new();
    let selected_id = Signal::derive(move || details.shown_id());

    view! {
        <div class="page">
            <PageHeader title="Товары" subtitle="Позиции товаров в выдаче площадки".to_string() icon_name="products" />

            <div class="page-content">
                <Flex vertical=true gap=FlexGap::Medium>
                    <Card>
                        <ProductList
                            selected_id=selected_id
                            on_select=Callback::new(move |id: String| details.submit_command(&id))
                        />
                    </Card>
                    <Card>
                        <ProductDetailsPanel vm=details />
                    </Card>
                </Flex>
            </div>
        </div>
    }
}
