use crate::shared::date_utils::{format_input_date, parse_input_date};
use chrono::NaiveDate;
use leptos::prelude::*;

/// DateInput component with native date picker
/// Browser automatically displays dates in locale format (dd.mm.yyyy for RU locale)
#[component]
pub fn DateInput(
    #[prop(into)] value: Signal<Option<NaiveDate>>,
    /// Очищенное поле приходит как `None`
    on_change: Callback<Option<NaiveDate>>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            prop:value=move || format_input_date(value.get())
            on:input=move |ev| {
                on_change.run(parse_input_date(&event_target_value(&ev)));
            }
            style="padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem; background: #fff; width: 140px;"
        />
    }
}
