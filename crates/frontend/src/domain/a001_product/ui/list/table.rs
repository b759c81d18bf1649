use crate::shared::components::copy_button::CopyButton;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use contracts::domain::a001_product::aggregate::ProductSummary;
use leptos::prelude::*;
use thaw::*;

/// Как таблица обходится с лишними строками
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Все строки страницы, под таблицей пейджер
    Paged,
    /// Без пейджера, только первые `n` строк
    Truncated(usize),
}

impl TableMode {
    pub fn shows_pager(self) -> bool {
        matches!(self, Self::Paged)
    }
}

pub fn visible_rows<T: Clone>(rows: &[T], mode: TableMode) -> Vec<T> {
    match mode {
        TableMode::Paged => rows.to_vec(),
        TableMode::Truncated(limit) => rows.iter().take(limit).cloned().collect(),
    }
}

#[component]
pub fn ProductTable(
    #[prop(into)] rows: Signal<Vec<ProductSummary>>,
    #[prop(into)] loading: Signal<bool>,
    /// Текст поиска для подсветки
    #[prop(into)]
    search: Signal<String>,
    /// Выбранный товар (подсвечивается)
    #[prop(into)]
    selected_id: Signal<Option<String>>,
    on_select: Callback<String>,
    #[prop(into)] shop_url: String,
    mode: TableMode,
) -> impl IntoView {
    let shop_url = StoredValue::new(shop_url);

    view! {
        <div style="width: 100%; overflow-x: auto;">
            <Table attr:style="width: 100%;" class="product-table">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=80.0>"Фото"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=320.0>"Название"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=140.0>"ID"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Ссылка"</TableHeaderCell>
                    </TableRow>
                </TableHeader>

                <TableBody>
                    {move || {
                        let data = visible_rows(&rows.get(), mode);
                        if data.is_empty() {
                            let text = if loading.get() { "Загрузка…" } else { "Нет данных" };
                            return vec![view! {
                                <TableRow>
                                    <TableCell attr:colspan="4">
                                        <TableCellLayout>
                                            <span class="text-muted">{text}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }.into_any()];
                        }

                        let filter = search.get();
                        let selected = selected_id.get();
                        data.into_iter()
                            .enumerate()
                            .map(|(index, row)| {
                                let id = row.id.clone();
                                let class = row_class(index, selected.as_deref() == Some(id.as_str()));
                                let href = shop_url.with_value(|base| format!("{}{}", base.trim_end_matches('/'), row.shop_link));
                                let photo = match row.first_image() {
                                    Some(src) => view! {
                                        <img src=src.to_string() alt="" width="48" height="48" style="object-fit: cover; border-radius: 6px;" />
                                    }.into_any(),
                                    None => view! {
                                        <span class="product-table__no-photo">{icon("image")}</span>
                                    }.into_any(),
                                };
                                let sku = row.config_sku.clone();
                                let id_for_click = id.clone();
                                let title = highlight_matches(&row.title, &filter);
                                let title_href = href.clone();

                                view! {
                                    <TableRow class=class on:click=move |_| on_select.run(id_for_click.clone())>
                                        <TableCell><TableCellLayout>{photo}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <div style="display: flex; flex-direction: column;">
                                                    <a href=title_href target="_blank" rel="noopener noreferrer" on:click=|ev| ev.stop_propagation()>
                                                        {title}
                                                    </a>
                                                    {sku.map(|sku| view! { <span class="text-muted" style="font-size: 12px;">{format!("SKU: {}", sku)}</span> })}
                                                </div>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <span>{id.clone()}</span>
                                                <CopyButton text=id.clone() title="Копировать ID" />
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <a href=href target="_blank" rel="noopener noreferrer" on:click=|ev| ev.stop_propagation()>
                                                    {icon("external-link")}
                                                    " Открыть"
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any()
                            })
                            .collect::<Vec<_>>()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}

/// Зебра и выбранная строка
fn row_class(index: usize, selected: bool) -> &'static str {
    match (selected, index % 2) {
        (true, _) => "product-table__row product-table__row--selected",
        (false, 1) => "product-table__row product-table__row--odd",
        _ => "product-table__row",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_mode_cuts_to_limit() {
        let rows = vec![1, 2, 3, 4, 5];
        assert_eq!(visible_rows(&rows, TableMode::Truncated(3)), vec![1, 2, 3]);
        assert_eq!(visible_rows(&rows, TableMode::Truncated(10)).len(), 5);
        assert_eq!(visible_rows(&rows, TableMode::Paged).len(), 5);
        assert!(!TableMode::Truncated(3).shows_pager());
    }

    #[test]
    fn rows_are_striped() {
        assert_eq!(row_class(0, false), "product-table__row");
        assert_eq!(row_class(1, false), "product-table__row product-table__row--odd");
        assert!(row_class(1, true).ends_with("--selected"));
    }
}
