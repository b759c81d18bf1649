/// Утилиты для списков: поле поиска, подсветка совпадений
use crate::shared::icons::icon;
use crate::shared::timer::Delay;
use leptos::prelude::*;

/// Задержка перед отправкой набранного текста
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let parts = split_matches(text, filter);
    if !parts.iter().any(|(_, hit)| *hit) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    parts
        .into_iter()
        .map(|(part, hit)| {
            if hit {
                view! {
                    <span style="background-color: #ff9800; color: white; padding: 1px 2px; border-radius: 2px; font-weight: 500;">
                        {part}
                    </span>
                }
                .into_any()
            } else {
                view! { <span>{part}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Разбить текст на куски (кусок, совпал ли с фильтром).
///
/// Сравнение без учёта регистра. Если нижний регистр меняет длину строки
/// (редкие символы), совпадения не ищутся.
fn split_matches(text: &str, filter: &str) -> Vec<(String, bool)> {
    let text_lower = text.to_lowercase();
    let filter_lower = filter.to_lowercase();
    if filter_lower.is_empty() || text_lower.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let start = last_pos + pos;
        let end = start + filter_lower.len();
        if start > last_pos {
            parts.push((text[last_pos..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push((text[last_pos..].to_string(), false));
    }
    parts
}

/// Компонент поиска с debounce и кнопкой очистки
///
/// `on_change` получает текст после паузы в наборе, `on_submit` (если задан)
/// срабатывает сразу по Enter.
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Отправка по Enter
    #[prop(optional)]
    on_submit: Option<Callback<String>>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());
    let debounce = StoredValue::new_local(None::<Delay>);

    // внешнее значение сменилось (сброс фильтра)
    Effect::new(move |_| {
        let external = value.get();
        if external != input_value.get_untracked() {
            input_value.set(external);
        }
    });

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        // новый Delay заменяет старый, старый при этом отменяется
        let delay = Delay::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        debounce.set_value(Some(delay));
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        debounce.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        if let Some(on_submit) = on_submit {
                            debounce.set_value(None);
                            let text = input_value.get_untracked();
                            on_change.run(text.clone());
                            on_submit.run(text);
                        }
                    }
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Очистить"
                    >
                        {icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_case_insensitive_matches() {
        let parts = split_matches("Смартфон Apple iPhone", "iphone");
        assert_eq!(
            parts,
            vec![
                ("Смартфон Apple ".to_string(), false),
                ("iPhone".to_string(), true),
            ]
        );
    }

    #[test]
    fn no_match_keeps_text_whole() {
        assert_eq!(
            split_matches("Samsung", "xiaomi"),
            vec![("Samsung".to_string(), false)]
        );
    }
}
