//! Подготовка точек графика рейтинга и раскладка SVG

use crate::shared::date_utils::format_day_month;
use chrono::NaiveDateTime;
use contracts::domain::a002_product_rating::aggregate::RatingPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub at: NaiveDateTime,
    /// Позиция в выдаче, начиная с 1
    pub rank: i64,
}

/// Точки графика по возрастанию времени
pub fn chart_points(points: &[RatingPoint]) -> Vec<ChartPoint> {
    let mut out: Vec<ChartPoint> = points
        .iter()
        .map(|p| ChartPoint {
            at: p.session_created_at,
            rank: p.rank(),
        })
        .collect();
    out.sort_by_key(|p| p.at);
    out
}

/// Размеры области рисования
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 860.0,
            height: 280.0,
            padding_left: 48.0,
            padding_right: 16.0,
            padding_top: 16.0,
            padding_bottom: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub pos: f64,
    pub label: String,
}

/// Готовая к отрисовке серия
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub coords: Vec<(f64, f64)>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl ChartGeometry {
    /// Значение атрибута `points` у `<polyline>`
    pub fn polyline(&self) -> String {
        self.coords
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const MAX_X_TICKS: usize = 6;

impl ChartLayout {
    fn plot_width(&self) -> f64 {
        self.width - self.padding_left - self.padding_right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.padding_top - self.padding_bottom
    }

    /// Разложить точки: x по времени, y по рейтингу (больше значит выше)
    pub fn project(&self, points: &[ChartPoint]) -> ChartGeometry {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return ChartGeometry {
                coords: vec![],
                x_ticks: vec![],
                y_ticks: vec![],
            };
        };

        let t0 = first.at.and_utc().timestamp() as f64;
        let span_t = last.at.and_utc().timestamp() as f64 - t0;
        let min_rank = points.iter().map(|p| p.rank).min().unwrap_or(0);
        let max_rank = points.iter().map(|p| p.rank).max().unwrap_or(0);
        let span_r = (max_rank - min_rank) as f64;

        let x_of = |at: NaiveDateTime| {
            if span_t <= 0.0 {
                self.padding_left + self.plot_width() / 2.0
            } else {
                let t = at.and_utc().timestamp() as f64 - t0;
                self.padding_left + t / span_t * self.plot_width()
            }
        };
        let y_of = |rank: i64| {
            if span_r <= 0.0 {
                self.padding_top + self.plot_height() / 2.0
            } else {
                let share = (rank - min_rank) as f64 / span_r;
                self.padding_top + (1.0 - share) * self.plot_height()
            }
        };

        let coords = points.iter().map(|p| (x_of(p.at), y_of(p.rank))).collect();

        let step = points.len().div_ceil(MAX_X_TICKS).max(1);
        let mut x_ticks: Vec<AxisTick> = points
            .iter()
            .step_by(step)
            .map(|p| AxisTick {
                pos: x_of(p.at),
                label: format_day_month(p.at),
            })
            .collect();
        x_ticks.dedup_by(|a, b| a.label == b.label);

        let mut y_ticks = vec![AxisTick {
            pos: y_of(max_rank),
            label: max_rank.to_string(),
        }];
        if max_rank != min_rank {
            y_ticks.push(AxisTick {
                pos: y_of(min_rank),
                label: min_rank.to_string(),
            });
        }

        ChartGeometry {
            coords,
            x_ticks,
            y_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, hour: u32, page: i64, place: i64) -> RatingPoint {
        let at = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        serde_json::from_value(serde_json::json!({
            "session_created_at": at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "page": page,
            "place": place,
        }))
        .unwrap()
    }

    #[test]
    fn points_are_sorted_by_time_with_rank() {
        let raw = vec![point(3, 10, 0, 0), point(1, 9, 2, 3), point(2, 8, 1, 11)];
        let points = chart_points(&raw);

        let ranks: Vec<i64> = points.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![28, 24, 1]);
        assert!(points.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn projection_stays_inside_plot() {
        let layout = ChartLayout::default();
        let points = chart_points(&[point(1, 0, 0, 0), point(2, 0, 3, 5), point(5, 0, 1, 0)]);
        let geometry = layout.project(&points);

        assert_eq!(geometry.coords.len(), 3);
        let (x0, _) = geometry.coords[0];
        let (xn, _) = geometry.coords[2];
        assert!((x0 - layout.padding_left).abs() < 1e-9);
        assert!((xn - (layout.width - layout.padding_right)).abs() < 1e-9);
        for (x, y) in &geometry.coords {
            assert!(*x >= layout.padding_left && *x <= layout.width - layout.padding_right);
            assert!(*y >= layout.padding_top && *y <= layout.height - layout.padding_bottom);
        }
        // самый большой рейтинг наверху
        let top = geometry.coords[1].1;
        assert!((top - layout.padding_top).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_centered() {
        let layout = ChartLayout::default();
        let geometry = layout.project(&chart_points(&[point(1, 0, 0, 4)]));
        assert_eq!(geometry.coords.len(), 1);
        assert_eq!(geometry.y_ticks.len(), 1);
        assert_eq!(geometry.x_ticks[0].label, "01 мар");
    }

    #[test]
    fn empty_series_has_no_geometry() {
        let geometry = ChartLayout::default().project(&[]);
        assert!(geometry.coords.is_empty());
        assert_eq!(geometry.polyline(), "");
    }

    #[test]
    fn x_labels_are_thinned_out() {
        let raw: Vec<RatingPoint> = (1..=20).map(|d| point(d, 12, 0, 0)).collect();
        let geometry = ChartLayout::default().project(&chart_points(&raw));
        assert!(geometry.x_ticks.len() <= MAX_X_TICKS);
        assert_eq!(geometry.x_ticks[0].label, "01 мар");
    }
}
