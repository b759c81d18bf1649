use crate::shared::icons::icon;
use leptos::prelude::*;

/// Подпись пейджера: "9-16 из 40"
pub fn range_label(page: u32, size: u32, total: u64) -> String {
    if total == 0 || size == 0 {
        return "0 из 0".to_string();
    }
    let from = (u64::from(page.max(1)) - 1) * u64::from(size) + 1;
    if from > total {
        return format!("0 из {}", total);
    }
    let to = (from + u64::from(size) - 1).min(total);
    format!("{}-{} из {}", from, to, total)
}

/// Варианты размера страницы; текущий размер добавляется, если его нет в списке
pub fn page_size_choices(options: &[u32], current: u32) -> Vec<u32> {
    let mut choices = options.to_vec();
    if !choices.contains(&current) {
        choices.push(current);
        choices.sort_unstable();
    }
    choices
}

/// PaginationControls component - reusable pagination controls
///
/// Страницы нумеруются с 1, как у бэкенда.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<u64>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<u32>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,

    /// Available page size options
    #[prop(into)]
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || range_label(current_page.get(), page_size.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=is_last
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {move || page_size_choices(&page_size_options, page_size.get()).into_iter().map(|size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {format!("{} / стр.", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
