//! Chart geometry shared by the bar, line and scatter components.
//!
//! Line charts draw straight from a [`PivotTable`]: a series that has no value
//! for a row breaks its line there instead of dipping to zero.

use super::derive::PivotTable;

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub bars: Vec<BarDatum>,
    pub domain: (f64, f64),
}

impl BarChart {
    pub fn new(bars: Vec<BarDatum>, domain: (f64, f64)) -> Self {
        Self { bars, domain }
    }

    /// Domain from zero up to the largest bar.
    pub fn from_zero(bars: Vec<BarDatum>) -> Self {
        let max = bars
            .iter()
            .map(|bar| bar.value)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        Self::new(bars, (0.0, max))
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bar length as a share of the domain, clamped to `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        let span = hi - lo;
        if !value.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value - lo) / span).clamp(0.0, 1.0)
    }
}

/// Contiguous runs of `(row key, value)` where `series` is present.
pub fn line_segments(table: &PivotTable, series: &str) -> Vec<Vec<(i64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(i64, f64)> = Vec::new();

    for row in &table.rows {
        match row.get(series) {
            Some(value) => current.push((row.key, value)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPath {
    pub name: String,
    pub primary: bool,
    /// One polyline per contiguous run, already in SVG coordinates.
    pub polylines: Vec<Vec<(f64, f64)>>,
}

impl SeriesPath {
    pub fn points_attr(polyline: &[(f64, f64)]) -> String {
        polyline
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maps a pivot table into an SVG viewport. Rows are spaced evenly (category
/// axis); values scale linearly inside `value_domain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlot {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for LinePlot {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
            padding: 32.0,
        }
    }
}

impl LinePlot {
    pub fn x(&self, index: usize, count: usize) -> f64 {
        let inner = self.width - 2.0 * self.padding;
        if count <= 1 {
            return self.padding + inner / 2.0;
        }
        self.padding + inner * index as f64 / (count - 1) as f64
    }

    pub fn y(&self, value: f64, domain: (f64, f64)) -> f64 {
        let inner = self.height - 2.0 * self.padding;
        let (lo, hi) = domain;
        let share = if hi > lo {
            ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.height - self.padding - inner * share
    }

    /// One path per series in the table's series order; the first series is primary.
    pub fn paths(&self, table: &PivotTable, value_domain: (f64, f64)) -> Vec<SeriesPath> {
        let count = table.rows.len();
        table
            .series
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let mut polylines = Vec::new();
                let mut current = Vec::new();
                for (index, row) in table.rows.iter().enumerate() {
                    match row.get(name) {
                        Some(value) => current.push((self.x(index, count), self.y(value, value_domain))),
                        None if !current.is_empty() => polylines.push(std::mem::take(&mut current)),
                        None => {}
                    }
                }
                if !current.is_empty() {
                    polylines.push(current);
                }
                SeriesPath {
                    name: name.clone(),
                    primary: position == 0,
                    polylines,
                }
            })
            .collect()
    }

    /// X positions and labels for each row key.
    pub fn ticks(&self, table: &PivotTable) -> Vec<(f64, String)> {
        let count = table.rows.len();
        table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (self.x(index, count), row.key.to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

/// Bounds of a scatter's x and y values, `None` when there are no finite points.
pub fn scatter_bounds(points: &[ScatterPoint]) -> Option<((f64, f64), (f64, f64))> {
    let finite = points.iter().filter(|p| p.x.is_finite() && p.y.is_finite());
    finite.fold(None, |bounds, p| match bounds {
        None => Some(((p.x, p.x), (p.y, p.y))),
        Some(((x_lo, x_hi), (y_lo, y_hi))) => Some((
            (x_lo.min(p.x), x_hi.max(p.x)),
            (y_lo.min(p.y), y_hi.max(p.y)),
        )),
    })
}

/// Linear map of `value` from `domain` onto `range`; a flat domain maps to the range midpoint.
pub fn scale_linear(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if d1 == d0 || !value.is_finite() {
        return (r0 + r1) / 2.0;
    }
    r0 + (value - d0) / (d1 - d0) * (r1 - r0)
}

/// Circle radius for a scatter point, growing with the square root of its weight.
pub fn bubble_radius(weight: f64, max_weight: f64) -> f64 {
    const MIN: f64 = 4.0;
    const MAX: f64 = 18.0;
    if !(weight > 0.0) || !(max_weight > 0.0) {
        return MIN;
    }
    MIN + (MAX - MIN) * (weight / max_weight).sqrt().min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derive::pivot;

    fn sparse_table() -> PivotTable {
        let rows = vec![
            (1, "Drama", 8.0),
            (2, "Drama", 8.5),
            (3, "Comedy", 7.0),
            (4, "Drama", 9.0),
            (1, "Comedy", 6.5),
        ];
        pivot(
            &rows,
            "seasonNumber",
            |r| r.0,
            |r| r.1,
            |r| r.2,
            &["Drama", "Comedy"],
        )
    }

    #[test]
    fn gaps_break_lines_instead_of_dropping_to_zero() {
        let table = sparse_table();
        assert_eq!(
            line_segments(&table, "Drama"),
            vec![vec![(1, 8.0), (2, 8.5)], vec![(4, 9.0)]]
        );
        assert_eq!(
            line_segments(&table, "Comedy"),
            vec![vec![(1, 6.5)], vec![(3, 7.0)]]
        );
        assert!(line_segments(&table, "Western").is_empty());
    }

    #[test]
    fn plot_paths_follow_segments() {
        let table = sparse_table();
        let plot = LinePlot::default();
        let paths = plot.paths(&table, (6.0, 10.0));
        assert_eq!(paths.len(), 2);
        assert!(paths[0].primary);
        assert!(!paths[1].primary);
        assert_eq!(paths[0].polylines.len(), 2);
        assert_eq!(paths[0].polylines[0].len(), 2);

        let first = paths[0].polylines[0][0];
        assert_eq!(first.0, plot.padding);
        assert!(first.1 < plot.height - plot.padding);
    }

    #[test]
    fn bar_fraction_clamps_to_domain() {
        let chart = BarChart::new(vec![BarDatum::new("A", 9.0)], (7.0, 10.0));
        assert!((chart.fraction(8.5) - 0.5).abs() < 1e-9);
        assert_eq!(chart.fraction(6.0), 0.0);
        assert_eq!(chart.fraction(11.0), 1.0);
        assert_eq!(chart.fraction(f64::NAN), 0.0);
    }

    #[test]
    fn bar_from_zero_uses_max() {
        let chart = BarChart::from_zero(vec![BarDatum::new("A", 4.0), BarDatum::new("B", 8.0)]);
        assert_eq!(chart.domain, (0.0, 8.0));
        assert_eq!(chart.fraction(4.0), 0.5);
    }

    #[test]
    fn scatter_bounds_cover_points() {
        let points = vec![
            ScatterPoint {
                label: "Drama".into(),
                x: 110.0,
                y: 7.1,
                weight: 10.0,
            },
            ScatterPoint {
                label: "Horror".into(),
                x: 90.0,
                y: 5.9,
                weight: 4.0,
            },
        ];
        assert_eq!(scatter_bounds(&points), Some(((90.0, 110.0), (5.9, 7.1))));
        assert_eq!(scatter_bounds(&[]), None);
    }

    #[test]
    fn linear_scale_maps_and_inverts() {
        assert_eq!(scale_linear(5.0, (0.0, 10.0), (0.0, 100.0)), 50.0);
        assert_eq!(scale_linear(10.0, (0.0, 10.0), (300.0, 20.0)), 20.0);
        assert_eq!(scale_linear(3.0, (3.0, 3.0), (0.0, 100.0)), 50.0);
    }

    #[test]
    fn bubble_radius_is_bounded() {
        assert_eq!(bubble_radius(0.0, 10.0), 4.0);
        assert_eq!(bubble_radius(10.0, 10.0), 18.0);
        assert!(bubble_radius(2.5, 10.0) > 4.0);
    }

    #[test]
    fn points_attr_formats_pairs() {
        assert_eq!(
            SeriesPath::points_attr(&[(1.0, 2.0), (3.26, 4.0)]),
            "1.0,2.0 3.3,4.0"
        );
    }
}
