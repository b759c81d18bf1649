use super::model::{chart_points, ChartLayout};
use crate::domain::a002_product_rating::queries::use_product_ratings;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use contracts::domain::a001_product::aggregate::ProductId;
use contracts::domain::a002_product_rating::request::RatingsQueryParams;
use leptos::prelude::*;
use thaw::*;

/// Кружки на линии рисуются, пока точек немного
const MAX_MARKED_POINTS: usize = 60;

/// График позиции товара в выдаче
#[component]
pub fn RatingsChart(
    #[prop(into)] product_id: Signal<Option<ProductId>>,
    #[prop(into)] params: Signal<Option<RatingsQueryParams>>,
) -> impl IntoView {
    let ratings = use_product_ratings(move || Some((product_id.get()?, params.get()?)));
    let layout = ChartLayout::default();

    view! {
        <div class="ratings-chart">
            {move || {
                if params.with(|p| p.is_none()) {
                    return view! {
                        <MessageBar intent=MessageBarIntent::Info>
                            <span style="display: inline-flex; align-items: center; gap: 6px;">
                                {icon("info")}
                                "Укажите параметры и нажмите «Применить», чтобы увидеть график рейтинга."
                            </span>
                        </MessageBar>
                    }
                    .into_any();
                }

                let snapshot = ratings.snapshot();
                let points = snapshot
                    .state
                    .data()
                    .map(|data| chart_points(&data))
                    .unwrap_or_default();

                if snapshot.state.is_fetching() && points.is_empty() {
                    return view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; height: 280px;">
                            <Spinner />
                        </Flex>
                    }
                    .into_any();
                }

                if points.is_empty() {
                    return view! {
                        <div class="ratings-chart__empty text-muted" style="display: flex; align-items: center; justify-content: center; height: 120px;">
                            "Нет данных для графика"
                        </div>
                    }
                    .into_any();
                }

                let geometry = layout.project(&points);
                let polyline = geometry.polyline();
                let bottom = layout.height - layout.padding_bottom;
                let marks = if points.len() <= MAX_MARKED_POINTS {
                    points
                        .iter()
                        .zip(geometry.coords.iter())
                        .map(|(p, (x, y))| {
                            let hint = format!("{}: {}", format_datetime(p.at), p.rank);
                            view! {
                                <circle cx={*x} cy={*y} r="3" fill="#2a93b1">
                                    <title>{hint}</title>
                                </circle>
                            }
                        })
                        .collect::<Vec<_>>()
                } else {
                    vec![]
                };

                view! {
                    <div style="width: 100%; overflow-x: auto; position: relative;">
                        <Show when=move || ratings.is_fetching()>
                            <div style="position: absolute; top: 4px; right: 4px;">
                                <Spinner size=SpinnerSize::Tiny />
                            </div>
                        </Show>
                        <svg
                            width={layout.width}
                            height={layout.height}
                            viewBox=format!("0 0 {} {}", layout.width, layout.height)
                            role="img"
                        >
                            <line
                                x1={layout.padding_left} y1={layout.padding_top}
                                x2={layout.padding_left} y2={bottom}
                                stroke="#ccc"
                            />
                            <line
                                x1={layout.padding_left} y1={bottom}
                                x2={layout.width - layout.padding_right} y2={bottom}
                                stroke="#ccc"
                            />
                            {geometry.y_ticks.into_iter().map(|tick| view! {
                                <text x={layout.padding_left - 6.0} y={tick.pos + 4.0} text-anchor="end" font-size="11" fill="#666">
                                    {tick.label}
                                </text>
                            }).collect::<Vec<_>>()}
                            {geometry.x_ticks.into_iter().map(|tick| view! {
                                <text x={tick.pos} y={bottom + 18.0} text-anchor="middle" font-size="11" fill="#666">
                                    {tick.label}
                                </text>
                            }).collect::<Vec<_>>()}
                            <polyline points=polyline fill="none" stroke="#2a93b1" stroke-width="2" />
                            {marks}
                        </svg>
                        <div class="text-muted" style="font-size: 12px;">"Позиция в выдаче (Rating)"</div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
