//! Page models: what each dashboard page loads and the view it derives.
//!
//! Every page has a `*Data` bundle with an async `load` that fans out its
//! dataset reads, and a pure `derive(&data, &translator)` producing a `*View`
//! of already formatted strings, tables and chart geometry. Views re-derive
//! on locale changes without reloading.

pub mod genres;
pub mod overview;
pub mod series;
pub mod top_titles;

use crate::core::chart::{BarChart, ScatterPoint};
use crate::core::derive::PivotTable;
use crate::core::format::{format_date, format_number, format_rating};
use crate::core::table::{Column, TableView};
use crate::core::Locale;
use crate::i18n::Translator;
use crate::t;

pub use genres::{GenresData, GenresView};
pub use overview::{OverviewData, OverviewView};
pub use series::{SeriesData, SeriesView};
pub use top_titles::{TopTitlesData, TopTitlesView};

/// Page banner with a headline statistic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hero {
    pub meta: Option<String>,
    pub eyebrow: String,
    pub title: String,
    pub subtitle: String,
    pub stat_label: String,
    pub stat_value: String,
    pub stat_title: String,
    pub stat_meta: String,
}

/// Heading text for a card or a section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardText {
    pub title: String,
    pub eyebrow: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
}

impl CardText {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn eyebrow(mut self, eyebrow: impl Into<String>) -> Self {
        self.eyebrow = Some(eyebrow.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCard {
    pub text: CardText,
    pub table: TableView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub text: CardText,
    pub chart: BarChart,
    /// Name of the plotted value, shown on hover.
    pub value_label: String,
}

/// Multi-series line chart with pre-labelled value ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub text: CardText,
    pub table: PivotTable,
    pub domain: (f64, f64),
    pub value_ticks: Vec<(f64, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub text: CardText,
    pub points: Vec<ScatterPoint>,
    pub x_label: String,
    pub y_label: String,
}

/// `Snapshot <date>` banner meta, only when the dataset carries a date.
pub(crate) fn snapshot_meta(snapshot: Option<&str>, tr: &Translator) -> Option<String> {
    snapshot.map(|date| {
        let value = format_date(Some(date), tr.locale());
        t!(tr, "common-snapshot", value = value)
    })
}

/// Evenly spaced ticks across `domain`, labelled by `label`.
pub(crate) fn value_ticks(
    domain: (f64, f64),
    steps: usize,
    label: impl Fn(f64) -> String,
) -> Vec<(f64, String)> {
    let (lo, hi) = domain;
    if steps == 0 || lo.is_nan() || hi.is_nan() || hi <= lo {
        return vec![(lo, label(lo))];
    }
    (0..=steps)
        .map(|step| {
            let value = lo + (hi - lo) * step as f64 / steps as f64;
            (value, label(value))
        })
        .collect()
}

pub(crate) fn rating_column<'a, T>(
    key: &'static str,
    label: impl Into<String>,
    locale: Locale,
    value: impl Fn(&T) -> f64 + 'a,
) -> Column<'a, T> {
    Column::new(key, label, move |row: &T| format_rating(Some(value(row)), locale)).right()
}

pub(crate) fn votes_column<'a, T>(
    key: &'static str,
    label: impl Into<String>,
    locale: Locale,
    value: impl Fn(&T) -> f64 + 'a,
) -> Column<'a, T> {
    Column::new(key, label, move |row: &T| format_number(Some(value(row)), locale)).right()
}
