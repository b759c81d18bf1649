use super::model::DetailPhase;
use super::view_model::ProductDetailsViewModel;
use crate::domain::a002_product_rating::ui::chart::view::RatingsChart;
use crate::domain::a002_product_rating::ui::filters::view::RatingsFilters;
use crate::shared::components::copy_button::CopyButton;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::config::app_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use contracts::domain::a001_product::aggregate::ProductDetail;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        log::error!("failed to open {url}: {e:?}");
    }
}

/// Панель карточки товара с графиком рейтинга
#[component]
pub fn ProductDetailsPanel(vm: ProductDetailsViewModel) -> impl IntoView {
    let query_text = RwSignal::new(String::new());
    let product_id = Signal::derive(move || vm.panel.with(|p| p.persisted_id().cloned()));
    let applied = Signal::derive(move || vm.filters.applied.get());
    let phase = Memo::new(move |_| vm.panel.with(|p| p.phase()));
    let detail = Memo::new(move |_| vm.panel.with(|p| p.detail()));

    view! {
        <div class="product-details">
            <ErrorBanner banner=vm.banner />

            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 8px;">
                <Flex gap=FlexGap::Small style="align-items: center;">
                    <Label>"Товар (ID / SKU):"</Label>
                    <SearchInput
                        value=query_text
                        on_change=Callback::new(move |text: String| query_text.set(text))
                        on_submit=Callback::new(move |text: String| vm.submit_command(&text))
                        placeholder="Введите ID или SKU и нажмите Enter"
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit_command(&query_text.get_untracked())
                    >
                        {icon("search")}
                        " Найти"
                    </Button>
                </Flex>
                <Show when=move || phase.get() != DetailPhase::Idle>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.close_command()>
                        "Закрыть"
                    </Button>
                </Show>
            </Flex>

            {move || match phase.get() {
                DetailPhase::Idle => view! {
                    <div class="text-muted" style="display: flex; align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        "Выберите товар в списке"
                    </div>
                }.into_any(),
                DetailPhase::Loading => view! {
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner />
                    </Flex>
                }.into_any(),
                DetailPhase::Ready => view! {
                    <Flex vertical=true gap=FlexGap::Medium>
                        <Show when=move || vm.panel.with(|p| p.is_switching())>
                            <Flex gap=FlexGap::Small style="align-items: center;">
                                <Spinner size=SpinnerSize::Tiny />
                                <span class="text-muted">"Загрузка…"</span>
                            </Flex>
                        </Show>
                        {move || detail.get().map(|detail| view! { <ProductDetailView detail=detail /> })}
                        <RatingsFilters vm=vm.filters />
                        <RatingsChart product_id=product_id params=applied />
                    </Flex>
                }.into_any(),
            }}
        </div>
    }
}

/// Карточка товара: галерея, реквизиты, категории
#[component]
pub fn ProductDetailView(detail: Arc<ProductDetail>) -> impl IntoView {
    let shop_url = detail.shop_url(&app_config().shop_url);
    let sku = detail.config_sku.clone();

    let gallery = if detail.images.is_empty() {
        view! { <span class="text-muted">"Нет изображений"</span> }.into_any()
    } else {
        detail
            .images
            .iter()
            .map(|src| view! {
                <img src=src.clone() alt="" width="120" height="120" style="object-fit: cover; border-radius: 8px;" />
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="product-detail" style="display: grid; grid-template-columns: 1fr 2fr; gap: 16px;">
            <div style="display: flex; gap: 8px; overflow-x: auto; padding-bottom: 8px;">
                {gallery}
            </div>

            <Flex vertical=true gap=FlexGap::Small>
                <h2 style="margin: 0;">{detail.title.clone()}</h2>

                <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 8px 16px;">
                    <div>
                        <Label>"ID:"</Label>
                        <div>{detail.id.clone()}</div>
                    </div>
                    <div>
                        <Label>"SKU:"</Label>
                        <div style="display: flex; align-items: center; gap: 8px;">
                            <span>{sku.clone().unwrap_or_else(|| "—".to_string())}</span>
                            {sku.map(|sku| view! { <CopyButton text=sku title="Копировать SKU" /> })}
                        </div>
                    </div>
                    <div>
                        <Label>"Бренд:"</Label>
                        <div>{detail.brand.clone().unwrap_or_else(|| "—".to_string())}</div>
                    </div>
                    <div>
                        <Label>"Категория (ID):"</Label>
                        <div>{detail.category_id.clone()}</div>
                    </div>
                </div>

                <div>
                    <Label>"Категории:"</Label>
                    <div style="display: flex; flex-wrap: wrap; gap: 6px; margin-top: 4px;">
                        {detail.categories.clone().into_iter().map(|c| view! {
                            <Badge appearance=BadgeAppearance::Outline>{c}</Badge>
                        }).collect_view()}
                    </div>
                </div>

                <div>
                    <Label>"Коды категорий:"</Label>
                    <div style="display: flex; flex-wrap: wrap; gap: 6px; margin-top: 4px;">
                        {detail.category_codes.clone().into_iter().map(|c| view! {
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>{c}</Badge>
                        }).collect_view()}
                    </div>
                </div>

                {shop_url.map(|url| view! {
                    <div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_in_new_tab(&url)
                        >
                            {icon("external-link")}
                            " Открыть на площадке"
                        </Button>
                    </div>
                })}
            </Flex>
        </div>
    }
}
