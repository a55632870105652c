use crate::core::chart::{BarChart, BarDatum};
use crate::core::dataset::{DatasetLoader, Envelope};
use crate::core::derive::{group_rows, split};
use crate::core::format::{format_number, format_rating, format_year, PLACEHOLDER};
use crate::core::records::{Category, MainstreamCult, TopByDecade, TopTitle};
use crate::core::table::{Column, TableOptions, TableView};
use crate::core::Locale;
use crate::i18n::Translator;
use crate::t;

use super::{rating_column, snapshot_meta, votes_column, BarPanel, CardText, Hero, TableCard};

const BAR_COUNT: usize = 10;
const ALL_TIME_LIMIT: usize = 20;
const SPLIT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TopTitlesData {
    pub top_titles: Envelope<TopTitle>,
    pub by_decade: Envelope<TopByDecade>,
    pub mainstream_cult: Envelope<MainstreamCult>,
}

impl TopTitlesData {
    pub async fn load(loader: &DatasetLoader) -> Self {
        let (top_titles, by_decade, mainstream_cult) = futures::join!(
            loader.load_dataset::<TopTitle>(),
            loader.load_dataset::<TopByDecade>(),
            loader.load_dataset::<MainstreamCult>(),
        );
        tracing::debug!(
            top_titles = top_titles.data.len(),
            by_decade = by_decade.data.len(),
            "top titles datasets loaded"
        );
        Self {
            top_titles,
            by_decade,
            mainstream_cult,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopTitlesView {
    pub hero: Hero,
    pub top10_section: CardText,
    pub top10: BarPanel,
    pub all_time_section: CardText,
    pub all_time: TableCard,
    pub by_decade_section: CardText,
    /// One card per decade, ascending.
    pub decades: Vec<TableCard>,
    pub split_section: CardText,
    pub mainstream: TableCard,
    pub cult: TableCard,
    pub empty_label: String,
}

pub fn derive(data: &TopTitlesData, tr: &Translator) -> TopTitlesView {
    let locale = tr.locale();
    let headline = data.top_titles.data.first();

    let hero = Hero {
        meta: snapshot_meta(data.top_titles.snapshot(), tr),
        eyebrow: t!(tr, "top-titles-hero-eyebrow"),
        title: t!(tr, "top-titles-hero-title"),
        subtitle: t!(tr, "top-titles-hero-subtitle"),
        stat_label: t!(tr, "top-titles-hero-stat-label"),
        stat_value: format_rating(headline.map(|h| h.average_rating), locale),
        stat_title: headline
            .map(|h| h.primary_title.clone())
            .unwrap_or_else(|| t!(tr, "top-titles-hero-stat-fallback-title")),
        stat_meta: t!(
            tr,
            "top-titles-hero-stat-meta",
            votes = headline
                .map(|h| format_number(Some(h.num_votes as f64), locale))
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        ),
    };

    // Upstream already ranks the file; the chart shows its head as-is.
    let bars = data
        .top_titles
        .data
        .iter()
        .take(BAR_COUNT)
        .map(|title| BarDatum::new(title.primary_title.clone(), title.average_rating))
        .collect();
    let top10 = BarPanel {
        text: CardText::new(t!(tr, "top-titles-top10-card-title"))
            .eyebrow(t!(tr, "top-titles-top10-card-eyebrow")),
        chart: BarChart::from_zero(bars),
        value_label: t!(tr, "chart-rating"),
    };

    let all_time_columns: Vec<Column<'_, TopTitle>> = vec![
        Column::new("primaryTitle", t!(tr, "common-title"), |row: &TopTitle| {
            row.primary_title.clone()
        }),
        Column::new("startYear", t!(tr, "common-year"), |row: &TopTitle| {
            format_year(row.start_year)
        })
        .right(),
        Column::new("titleType", t!(tr, "common-type"), |row: &TopTitle| {
            row.title_type.clone()
        }),
        rating_column("averageRating", t!(tr, "common-rating"), locale, |row: &TopTitle| {
            row.average_rating
        }),
        votes_column("numVotes", t!(tr, "common-votes"), locale, |row: &TopTitle| {
            row.num_votes as f64
        }),
    ];
    let all_time = TableCard {
        text: CardText::new(t!(tr, "top-titles-all-time-card-title"))
            .eyebrow(t!(tr, "top-titles-all-time-card-eyebrow")),
        table: TableView::build(
            &data.top_titles.data,
            &all_time_columns,
            &TableOptions::ranked(ALL_TIME_LIMIT),
        ),
    };

    let decade_columns: Vec<Column<'_, TopByDecade>> = vec![
        Column::new("primaryTitle", t!(tr, "common-title"), |row: &TopByDecade| {
            row.title.primary_title.clone()
        }),
        rating_column("averageRating", t!(tr, "common-rating"), locale, |row: &TopByDecade| {
            row.title.average_rating
        }),
    ];
    let ranked_unlimited = TableOptions {
        show_rank: true,
        ..TableOptions::default()
    };
    let decades = group_rows(&data.by_decade.data, |row| i64::from(row.decade))
        .into_iter()
        .map(|(decade, rows)| TableCard {
            text: CardText::new(t!(tr, "decade-heading", decade = decade.to_string()))
                .eyebrow(t!(tr, "top-titles-by-decade-card-eyebrow")),
            table: TableView::build(&rows, &decade_columns, &ranked_unlimited),
        })
        .collect();

    let partitions = split(
        &data.mainstream_cult.data,
        |row| row.category,
        &[Category::Mainstream, Category::Cult],
    );
    let split_columns = split_table_columns(tr, locale);
    let mainstream = TableCard {
        text: CardText::new(t!(tr, "top-titles-mainstream-card-title"))
            .eyebrow(t!(tr, "top-titles-mainstream-card-eyebrow")),
        table: TableView::build(
            partitions.get(&Category::Mainstream),
            &split_columns,
            &TableOptions::ranked(SPLIT_LIMIT),
        ),
    };
    let cult = TableCard {
        text: CardText::new(t!(tr, "top-titles-cult-card-title"))
            .eyebrow(t!(tr, "top-titles-cult-card-eyebrow")),
        table: TableView::build(
            partitions.get(&Category::Cult),
            &split_columns,
            &TableOptions::ranked(SPLIT_LIMIT),
        ),
    };

    TopTitlesView {
        hero,
        top10_section: CardText::new(t!(tr, "top-titles-top10-title"))
            .description(t!(tr, "top-titles-top10-description")),
        top10,
        all_time_section: CardText::new(t!(tr, "top-titles-all-time-title"))
            .description(t!(tr, "top-titles-all-time-description")),
        all_time,
        by_decade_section: CardText::new(t!(tr, "top-titles-by-decade-title"))
            .description(t!(tr, "top-titles-by-decade-description")),
        decades,
        split_section: CardText::new(t!(tr, "top-titles-split-title"))
            .description(t!(tr, "top-titles-split-description")),
        mainstream,
        cult,
        empty_label: t!(tr, "table-empty"),
    }
}

fn split_table_columns(tr: &Translator, locale: Locale) -> Vec<Column<'static, MainstreamCult>> {
    vec![
        Column::new("primaryTitle", t!(tr, "common-title"), |row: &MainstreamCult| {
            row.title.primary_title.clone()
        }),
        rating_column("averageRating", t!(tr, "common-rating"), locale, |row: &MainstreamCult| {
            row.title.average_rating
        }),
        votes_column("numVotes", t!(tr, "common-votes"), locale, |row: &MainstreamCult| {
            row.title.num_votes as f64
        }),
    ]
}
