use crate::core::chart::{BarChart, BarDatum, ScatterPoint};
use crate::core::dataset::{DatasetLoader, Envelope};
use crate::core::derive::top_n;
use crate::core::format::{format_number, format_rating, PLACEHOLDER};
use crate::core::records::{GenrePopularity, GenreWeighted, RuntimeRating};
use crate::i18n::Translator;
use crate::t;

use super::overview::popularity_panel;
use super::{snapshot_meta, BarPanel, CardText, Hero, LinePanel, ScatterPanel};

const WEIGHTED_BAR_COUNT: usize = 12;
const POPULARITY_GENRES: usize = 6;
const SCATTER_POINTS: usize = 12;
const HIGHLIGHT_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct GenresData {
    pub genre_weighted: Envelope<GenreWeighted>,
    pub genre_popularity: Envelope<GenrePopularity>,
    pub runtime_rating: Envelope<RuntimeRating>,
}

impl GenresData {
    pub async fn load(loader: &DatasetLoader) -> Self {
        let (genre_weighted, genre_popularity, runtime_rating) = futures::join!(
            loader.load_dataset::<GenreWeighted>(),
            loader.load_dataset::<GenrePopularity>(),
            loader.load_dataset::<RuntimeRating>(),
        );
        tracing::debug!(
            genres = genre_weighted.data.len(),
            runtime = runtime_rating.data.len(),
            "genre datasets loaded"
        );
        Self {
            genre_weighted,
            genre_popularity,
            runtime_rating,
        }
    }
}

/// Small card summarising one genre.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreHighlight {
    pub genre: String,
    pub eyebrow: String,
    pub lines: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenresView {
    pub hero: Hero,
    pub weighted: BarPanel,
    pub popularity: LinePanel,
    pub runtime: ScatterPanel,
    pub highlights_section: CardText,
    pub highlights: Vec<GenreHighlight>,
    pub empty_label: String,
}

pub fn derive(data: &GenresData, tr: &Translator) -> GenresView {
    let locale = tr.locale();
    let ranked = top_n(
        &data.genre_weighted.data,
        data.genre_weighted.data.len(),
        |g| g.weighted_rating,
    );
    let best = ranked.first();

    let hero = Hero {
        meta: snapshot_meta(data.genre_weighted.snapshot(), tr),
        eyebrow: t!(tr, "genres-hero-eyebrow"),
        title: t!(tr, "genres-hero-title"),
        subtitle: t!(tr, "genres-hero-subtitle"),
        stat_label: t!(tr, "genres-hero-stat-label"),
        stat_value: format_rating(best.map(|g| g.weighted_rating), locale),
        stat_title: best
            .map(|g| g.genre.clone())
            .unwrap_or_else(|| t!(tr, "genres-hero-stat-fallback-title")),
        stat_meta: t!(
            tr,
            "genres-hero-stat-meta",
            votes = best
                .map(|g| format_number(Some(g.total_votes as f64), locale))
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        ),
    };

    let bars = ranked
        .iter()
        .take(WEIGHTED_BAR_COUNT)
        .map(|g| BarDatum::new(g.genre.clone(), g.weighted_rating))
        .collect();
    let weighted = BarPanel {
        text: CardText::new(t!(tr, "genres-weighted-title"))
            .eyebrow(t!(tr, "genres-weighted-eyebrow"))
            .caption(t!(tr, "genres-weighted-caption")),
        chart: BarChart::from_zero(bars),
        value_label: t!(tr, "chart-weighted-rating"),
    };

    let popularity = popularity_panel(
        &data.genre_popularity.data,
        POPULARITY_GENRES,
        CardText::new(t!(tr, "genres-popularity-title"))
            .eyebrow(t!(tr, "genres-popularity-eyebrow"))
            .caption(t!(tr, "genres-popularity-caption")),
    );

    let points = data
        .runtime_rating
        .data
        .iter()
        .take(SCATTER_POINTS)
        .map(|row| ScatterPoint {
            label: row.genre.clone(),
            x: row.avg_runtime_minutes,
            y: row.avg_rating,
            weight: row.title_count as f64,
        })
        .collect();
    let runtime = ScatterPanel {
        text: CardText::new(t!(tr, "genres-runtime-title"))
            .eyebrow(t!(tr, "genres-runtime-eyebrow"))
            .description(t!(tr, "genres-runtime-description"))
            .caption(t!(tr, "genres-runtime-caption")),
        points,
        x_label: t!(tr, "chart-avg-runtime"),
        y_label: t!(tr, "chart-avg-rating"),
    };

    let highlights = ranked
        .iter()
        .take(HIGHLIGHT_COUNT)
        .map(|g| GenreHighlight {
            genre: g.genre.clone(),
            eyebrow: t!(tr, "genres-highlights-eyebrow"),
            lines: vec![
                (
                    t!(tr, "genres-highlight-weighted"),
                    format_rating(Some(g.weighted_rating), locale),
                ),
                (
                    t!(tr, "genres-highlight-votes"),
                    format_number(Some(g.total_votes as f64), locale),
                ),
                (
                    t!(tr, "genres-highlight-titles"),
                    format_number(Some(g.title_count as f64), locale),
                ),
            ],
        })
        .collect();

    GenresView {
        hero,
        weighted,
        popularity,
        runtime,
        highlights_section: CardText::new(t!(tr, "genres-highlights-title"))
            .description(t!(tr, "genres-highlights-description")),
        highlights,
        empty_label: t!(tr, "table-empty"),
    }
}
