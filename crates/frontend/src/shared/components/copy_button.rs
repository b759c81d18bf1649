use crate::shared::clipboard::{copy_to_clipboard_with_callback, is_acknowledged, COPY_ACK_MS};
use crate::shared::icons::icon;
use crate::shared::transient::TransientSignal;
use leptos::prelude::*;

/// Кнопка копирования с галочкой на 1.6 с
///
/// Галочка привязана к скопированному значению: при смене `text` она
/// сбрасывается сразу.
#[component]
pub fn CopyButton(
    #[prop(into)] text: Signal<String>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let ack = TransientSignal::<String>::new(COPY_ACK_MS);

    Effect::new(move |prev: Option<String>| {
        let current = text.get();
        if prev.is_some_and(|p| p != current) {
            ack.reset();
        }
        current
    });

    let copied = move || {
        let current = text.get();
        ack.with_state(|state| is_acknowledged(state, &current))
    };

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let value = text.get_untracked();
        if value.is_empty() {
            return;
        }
        let copied_value = value.clone();
        copy_to_clipboard_with_callback(&value, move || ack.show(copied_value));
    };

    view! {
        <button
            class="copy-button"
            style="background: none; border: none; cursor: pointer; padding: 2px 4px; display: inline-flex; align-items: center; color: #666;"
            title=title.unwrap_or_else(|| "Копировать".to_string())
            on:click=on_click
        >
            {move || if copied() { icon("check") } else { icon("copy") }}
        </button>
    }
}
