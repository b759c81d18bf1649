use crate::shared::icons::icon;
use leptos::prelude::*;

/// Шапка страницы: иконка, заголовок, подзаголовок и действия справа
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    #[prop(optional)] icon_name: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                {icon_name.map(|name| view! { <span class="page-header__icon">{icon(name)}</span> })}
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children.map(|children| children())}
            </div>
        </div>
    }
}
