use crate::shared::icons::icon;
use crate::shared::transient::TransientSignal;
use leptos::prelude::*;
use thaw::*;

/// Сколько висит всплывающая ошибка
pub const ERROR_BANNER_MS: u32 = 3000;

/// Всплывающая ошибка поверх страницы, скрывается сама.
///
/// Не заменяет содержимое страницы: то, что было на экране, остаётся.
#[component]
pub fn ErrorBanner(banner: TransientSignal<String>) -> impl IntoView {
    view! {
        <Show when=move || banner.is_shown()>
            <div
                class="error-banner"
                style="position: fixed; top: 16px; right: 16px; z-index: 1000; max-width: 420px; box-shadow: 0 4px 12px rgba(0,0,0,0.15);"
            >
                <MessageBar intent=MessageBarIntent::Error>
                    <div style="display: flex; align-items: center; gap: var(--spacing-sm);">
                        <span>{move || banner.get().unwrap_or_default()}</span>
                        <button
                            style="background: none; border: none; cursor: pointer; padding: 2px; display: inline-flex; color: inherit;"
                            title="Закрыть"
                            on:click=move |_| banner.reset()
                        >
                            {icon("x")}
                        </button>
                    </div>
                </MessageBar>
            </div>
        </Show>
    }
}
