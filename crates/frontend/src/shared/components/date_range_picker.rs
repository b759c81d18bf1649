use super::date_input::DateInput;
use chrono::NaiveDate;
use leptos::prelude::*;
use thaw::*;

/// DateRangePicker component - период из двух дат (включительно)
#[component]
pub fn DateRangePicker(
    #[prop(into)] date_from: Signal<Option<NaiveDate>>,
    #[prop(into)] date_to: Signal<Option<NaiveDate>>,
    /// Callback при изменении диапазона дат (from, to)
    on_change: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let on_from_change = Callback::new(move |from: Option<NaiveDate>| {
        on_change.run((from, date_to.get_untracked()));
    });
    let on_to_change = Callback::new(move |to: Option<NaiveDate>| {
        on_change.run((date_from.get_untracked(), to));
    });

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|text| view! { <Label>{text}</Label> })}
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <DateInput value=date_from on_change=on_from_change />
                <span>"-"</span>
                <DateInput value=date_to on_change=on_to_change />
            </Flex>
        </Flex>
    }
}
