use crate::core::chart::{BarChart, BarDatum};
use crate::core::dataset::{DatasetLoader, Envelope};
use crate::core::derive::{group_sum, pivot, top_n};
use crate::core::format::{
    format_date, format_datetime, format_millions, format_number, format_percent_change,
    format_rating, PLACEHOLDER,
};
use crate::core::records::{GenrePopularity, GenreWeighted, RisingTitle, TopTitle};
use crate::core::table::{Column, TableOptions, TableView};
use crate::i18n::Translator;
use crate::t;

use super::{
    rating_column, value_ticks, votes_column, BarPanel, CardText, Hero, Kpi, LinePanel, TableCard,
};

const TOP_TABLE_LIMIT: usize = 10;
const GENRE_BAR_COUNT: usize = 8;
const POPULARITY_GENRES: usize = 5;
const RISING_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub top_titles: Envelope<TopTitle>,
    pub genre_weighted: Envelope<GenreWeighted>,
    pub rising: Envelope<RisingTitle>,
    pub genre_popularity: Envelope<GenrePopularity>,
}

impl OverviewData {
    pub async fn load(loader: &DatasetLoader) -> Self {
        let (top_titles, genre_weighted, rising, genre_popularity) = futures::join!(
            loader.load_dataset::<TopTitle>(),
            loader.load_dataset::<GenreWeighted>(),
            loader.load_dataset::<RisingTitle>(),
            loader.load_dataset::<GenrePopularity>(),
        );
        tracing::debug!(
            top_titles = top_titles.data.len(),
            genres = genre_weighted.data.len(),
            rising = rising.data.len(),
            "overview datasets loaded"
        );
        Self {
            top_titles,
            genre_weighted,
            rising,
            genre_popularity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub hero: Hero,
    pub snapshot_section: CardText,
    pub kpis: Vec<Kpi>,
    pub top_titles: TableCard,
    pub top_genres: BarPanel,
    pub popularity: LinePanel,
    pub rising: TableCard,
    pub empty_label: String,
}

pub fn derive(data: &OverviewData, tr: &Translator) -> OverviewView {
    let locale = tr.locale();

    let snapshot = data
        .top_titles
        .snapshot()
        .or_else(|| data.genre_weighted.snapshot());
    let updated_at = data
        .top_titles
        .generated()
        .or_else(|| data.genre_weighted.generated());
    let updated_hint =
        updated_at.map(|raw| t!(tr, "common-updated-at", value = format_datetime(Some(raw), locale)));

    let headline = data.top_titles.data.first();
    let hero = Hero {
        meta: updated_hint.clone(),
        eyebrow: t!(tr, "overview-hero-eyebrow"),
        title: t!(tr, "overview-hero-title"),
        subtitle: t!(tr, "overview-hero-subtitle"),
        stat_label: t!(tr, "overview-hero-stat-label"),
        stat_value: format_rating(headline.map(|h| h.average_rating), locale),
        stat_title: headline
            .map(|h| h.primary_title.clone())
            .unwrap_or_else(|| t!(tr, "overview-hero-stat-fallback-title")),
        stat_meta: t!(
            tr,
            "overview-hero-stat-meta",
            votes = headline
                .map(|h| format_number(Some(h.num_votes as f64), locale))
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        ),
    };

    let kpis = vec![
        Kpi {
            label: t!(tr, "overview-kpi-snapshot"),
            value: snapshot
                .map(|date| format_date(Some(date), locale))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            hint: Some(updated_hint.unwrap_or_else(|| t!(tr, "common-refresh-pending"))),
        },
        Kpi {
            label: t!(tr, "overview-kpi-top-titles"),
            value: data.top_titles.display_count().to_string(),
            hint: None,
        },
        Kpi {
            label: t!(tr, "overview-kpi-genres"),
            value: data.genre_weighted.data.len().to_string(),
            hint: None,
        },
        Kpi {
            label: t!(tr, "overview-kpi-rising"),
            value: data.rising.data.len().to_string(),
            hint: None,
        },
    ];

    let top_columns: Vec<Column<'_, TopTitle>> = vec![
        Column::new("primaryTitle", t!(tr, "common-title"), |row: &TopTitle| {
            row.primary_title.clone()
        }),
        rating_column("averageRating", t!(tr, "common-rating"), locale, |row: &TopTitle| {
            row.average_rating
        }),
        votes_column("numVotes", t!(tr, "common-votes"), locale, |row: &TopTitle| {
            row.num_votes as f64
        }),
    ];
    let top_titles = TableCard {
        text: CardText::new(t!(tr, "overview-top10-title"))
            .eyebrow(t!(tr, "overview-top10-eyebrow"))
            .caption(t!(tr, "overview-top10-caption")),
        table: TableView::build(
            &data.top_titles.data,
            &top_columns,
            &TableOptions::ranked(TOP_TABLE_LIMIT),
        ),
    };

    let genre_bars = top_n(&data.genre_weighted.data, GENRE_BAR_COUNT, |g| g.weighted_rating)
        .into_iter()
        .map(|g| BarDatum::new(g.genre, g.weighted_rating))
        .collect();
    let top_genres = BarPanel {
        text: CardText::new(t!(tr, "overview-top-genres-title"))
            .eyebrow(t!(tr, "common-genres"))
            .caption(t!(tr, "overview-top-genres-caption")),
        chart: BarChart::from_zero(genre_bars),
        value_label: t!(tr, "chart-weighted-rating"),
    };

    let popularity = popularity_panel(
        &data.genre_popularity.data,
        POPULARITY_GENRES,
        CardText::new(t!(tr, "overview-popularity-title"))
            .eyebrow(t!(tr, "overview-popularity-eyebrow"))
            .caption(t!(tr, "overview-popularity-caption")),
    );

    let rising_columns: Vec<Column<'_, RisingTitle>> = vec![
        Column::new("primaryTitle", t!(tr, "common-title"), |row: &RisingTitle| {
            row.primary_title.clone()
        }),
        Column::new("titleType", t!(tr, "common-type"), |row: &RisingTitle| {
            row.title_type.clone()
        }),
        votes_column(
            "deltaVotes",
            t!(tr, "overview-table-plus-votes"),
            locale,
            |row: &RisingTitle| row.delta_votes as f64,
        ),
        Column::new("pctChange", t!(tr, "overview-table-change"), |row: &RisingTitle| {
            format_percent_change(row.pct_change)
        })
        .right(),
    ];
    let rising = TableCard {
        text: CardText::new(t!(tr, "overview-rising-title"))
            .eyebrow(t!(tr, "overview-rising-eyebrow")),
        table: TableView::build(
            &data.rising.data,
            &rising_columns,
            &TableOptions::ranked(RISING_LIMIT),
        ),
    };

    OverviewView {
        hero,
        snapshot_section: CardText::new(t!(tr, "overview-snapshot-title"))
            .description(t!(tr, "overview-snapshot-description")),
        kpis,
        top_titles,
        top_genres,
        popularity,
        rising,
        empty_label: t!(tr, "table-empty"),
    }
}

/// Vote totals per decade for the `genres` most voted genres overall.
pub(crate) fn popularity_panel(
    records: &[GenrePopularity],
    genres: usize,
    text: CardText,
) -> LinePanel {
    let totals = group_sum(records, |r| r.genre.as_str(), |r| r.total_votes as f64);
    let top = totals.top_keys(genres);
    let table = pivot(
        records,
        "decade",
        |r| i64::from(r.decade),
        |r| r.genre.as_str(),
        |r| r.total_votes as f64,
        &top,
    );
    let max = table.value_range().map(|(_, hi)| hi).unwrap_or(0.0);
    let domain = (0.0, max);
    LinePanel {
        text,
        value_ticks: value_ticks(domain, 4, format_millions),
        table,
        domain,
    }
}
