use super::view_model::RatingsFilterViewModel;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::date_utils::today;
use chrono::NaiveDate;
use leptos::prelude::*;
use thaw::*;

/// Панель параметров графика рейтинга
#[component]
pub fn RatingsFilters(vm: RatingsFilterViewModel) -> impl IntoView {
    let cannot_apply = Signal::derive(move || !vm.can_apply());

    view! {
        <div class="ratings-filters">
            <Label>"Параметры рейтинга"</Label>
            <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                <div style="min-width: 160px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Город (session_city_id):"</Label>
                        <Input value=vm.city_id placeholder="Введите ID города" />
                    </Flex>
                </div>

                <div>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Продвигаемая карточка:"</Label>
                        <Switch checked=vm.promoted_card label="promoted_card" />
                    </Flex>
                </div>

                <DateRangePicker
                    date_from=vm.date_from
                    date_to=vm.date_to
                    on_change=Callback::new(move |(from, to): (Option<NaiveDate>, Option<NaiveDate>)| {
                        vm.set_range(from, to)
                    })
                    label="Период:"
                />

                <div style="min-width: 160px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Категория (filter id):"</Label>
                        <Flex gap=FlexGap::Small>
                            <Input value=vm.category_filter placeholder="Не задан" />
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| vm.clear_category()
                            >
                                "Очистить"
                            </Button>
                        </Flex>
                        {move || vm.category_error().map(|message| view! {
                            <span class="text-error" style="font-size: 12px;">{message}</span>
                        })}
                    </Flex>
                </div>

                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.apply_command()
                        disabled=cannot_apply
                    >
                        "Применить"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.reset_command(today())
                    >
                        "Сбросить"
                    </Button>
                </Flex>
            </Flex>
        </div>
    }
}
