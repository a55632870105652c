use crate::core::chart::{BarChart, BarDatum};
use crate::core::dataset::{DatasetLoader, Envelope};
use crate::core::derive::{group_sum, pivot};
use crate::core::format::{format_rating, PLACEHOLDER};
use crate::core::records::{QualityDrop, SeasonRating, TopEpisode};
use crate::core::table::{Column, TableOptions, TableView};
use crate::i18n::Translator;
use crate::t;

use super::{
    rating_column, snapshot_meta, value_ticks, votes_column, BarPanel, CardText, Hero, LinePanel,
    TableCard,
};

const EPISODE_BAR_COUNT: usize = 10;
const SEASON_SERIES: usize = 3;
const QUALITY_DROP_LIMIT: usize = 12;
const TOP_RATED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub top_episodes: Envelope<TopEpisode>,
    pub season_ratings: Envelope<SeasonRating>,
    pub quality_drop: Envelope<QualityDrop>,
}

impl SeriesData {
    pub async fn load(loader: &DatasetLoader) -> Self {
        let (top_episodes, season_ratings, quality_drop) = futures::join!(
            loader.load_dataset::<TopEpisode>(),
            loader.load_dataset::<SeasonRating>(),
            loader.load_dataset::<QualityDrop>(),
        );
        tracing::debug!(
            episodes = top_episodes.data.len(),
            seasons = season_ratings.data.len(),
            "series datasets loaded"
        );
        Self {
            top_episodes,
            season_ratings,
            quality_drop,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub hero: Hero,
    pub top_episodes: BarPanel,
    pub season_ratings: LinePanel,
    pub quality_drop_section: CardText,
    pub quality_drop: TableCard,
    pub top_rated_section: CardText,
    pub top_rated: TableCard,
    pub empty_label: String,
}

pub fn derive(data: &SeriesData, tr: &Translator) -> SeriesView {
    let locale = tr.locale();
    let headline = data.top_episodes.data.first();

    let hero = Hero {
        meta: snapshot_meta(data.top_episodes.snapshot(), tr),
        eyebrow: t!(tr, "series-hero-eyebrow"),
        title: t!(tr, "series-hero-title"),
        subtitle: t!(tr, "series-hero-subtitle"),
        stat_label: t!(tr, "series-hero-stat-label"),
        stat_value: format_rating(headline.map(|e| e.average_rating), locale),
        stat_title: headline
            .map(|e| e.episode_title.clone())
            .unwrap_or_else(|| t!(tr, "series-hero-stat-fallback-title")),
        stat_meta: headline
            .map(|e| e.series_title.clone())
            .unwrap_or_else(|| t!(tr, "series-hero-stat-fallback-series")),
    };

    let bars = data
        .top_episodes
        .data
        .iter()
        .take(EPISODE_BAR_COUNT)
        .map(|episode| BarDatum::new(episode.chart_label(), episode.average_rating))
        .collect();
    let top_episodes = BarPanel {
        text: CardText::new(t!(tr, "series-top-episodes-title"))
            .eyebrow(t!(tr, "series-top-episodes-eyebrow"))
            .caption(t!(tr, "series-top-episodes-caption")),
        chart: BarChart::from_zero(bars),
        value_label: t!(tr, "chart-rating"),
    };

    let seasons = &data.season_ratings.data;
    let votes = group_sum(seasons, |r| r.series_title.as_str(), |r| r.total_votes as f64);
    let top_series = votes.top_keys(SEASON_SERIES);
    let table = pivot(
        seasons,
        "seasonNumber",
        |r| i64::from(r.season_number),
        |r| r.series_title.as_str(),
        |r| r.avg_rating,
        &top_series,
    );
    let domain = rating_domain(table.value_range());
    let season_ratings = LinePanel {
        text: CardText::new(t!(tr, "series-season-ratings-title"))
            .eyebrow(t!(tr, "series-season-ratings-eyebrow"))
            .caption(t!(tr, "series-season-ratings-caption")),
        value_ticks: value_ticks(domain, 4, |v| format_rating(Some(v), locale)),
        table,
        domain,
    };

    let drop_columns: Vec<Column<'_, QualityDrop>> = vec![
        Column::new("seriesTitle", t!(tr, "common-series"), |row: &QualityDrop| {
            row.series_title.clone()
        }),
        rating_column("season1Rating", "S1", locale, |row: &QualityDrop| row.season1_rating),
        rating_column("lastSeasonRating", t!(tr, "common-latest"), locale, |row: &QualityDrop| {
            row.last_season_rating
        }),
        rating_column("qualityDrop", t!(tr, "common-drop"), locale, |row: &QualityDrop| {
            row.quality_drop
        }),
    ];
    let quality_drop = TableCard {
        text: CardText::new(t!(tr, "series-quality-drop-card-title"))
            .eyebrow(t!(tr, "series-quality-drop-card-eyebrow")),
        table: TableView::build(
            &data.quality_drop.data,
            &drop_columns,
            &TableOptions::ranked(QUALITY_DROP_LIMIT),
        ),
    };

    let episode_columns: Vec<Column<'_, TopEpisode>> = vec![
        Column::new("seriesTitle", t!(tr, "common-series"), |row: &TopEpisode| {
            row.series_title.clone()
        }),
        Column::new("episodeTitle", t!(tr, "common-episode"), |row: &TopEpisode| {
            row.episode_title.clone()
        }),
        Column::new("seasonNumber", t!(tr, "common-season"), |row: &TopEpisode| {
            row.season_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        })
        .right(),
        rating_column("averageRating", t!(tr, "common-rating"), locale, |row: &TopEpisode| {
            row.average_rating
        }),
        votes_column("numVotes", t!(tr, "common-votes"), locale, |row: &TopEpisode| {
            row.num_votes as f64
        }),
    ];
    let top_rated = TableCard {
        text: CardText::new(t!(tr, "series-top-rated-card-title"))
            .eyebrow(t!(tr, "series-top-rated-card-eyebrow")),
        table: TableView::build(
            &data.top_episodes.data,
            &episode_columns,
            &TableOptions::ranked(TOP_RATED_LIMIT),
        ),
    };

    SeriesView {
        hero,
        top_episodes,
        season_ratings,
        quality_drop_section: CardText::new(t!(tr, "series-quality-drop-title"))
            .description(t!(tr, "series-quality-drop-description")),
        quality_drop,
        top_rated_section: CardText::new(t!(tr, "series-top-rated-title"))
            .description(t!(tr, "series-top-rated-description")),
        top_rated,
        empty_label: t!(tr, "table-empty"),
    }
}

/// Observed rating range widened by half a point, kept inside `[0, 10]`.
fn rating_domain(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) => ((lo - 0.5).max(0.0).floor(), (hi + 0.5).min(10.0).ceil()),
        None => (0.0, 10.0),
    }
}
