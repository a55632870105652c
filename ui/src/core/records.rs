//! Typed record schemas, one per upstream dataset file.
//!
//! Field names follow the upstream JSON exactly (camelCase); chart and table
//! consumers key on them, so there is no renaming layer.

use serde::{Deserialize, Serialize};

use super::dataset::DatasetRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTitle {
    pub tconst: String,
    pub primary_title: String,
    pub title_type: String,
    #[serde(default, deserialize_with = "whole_number::option")]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub genres: Option<String>,
    pub average_rating: f64,
    #[serde(deserialize_with = "whole_number::count")]
    pub num_votes: u64,
}

impl DatasetRecord for TopTitle {
    const FILE: &'static str = "top_titles_all_time.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopByDecade {
    #[serde(deserialize_with = "whole_number::int")]
    pub decade: i32,
    #[serde(deserialize_with = "whole_number::int")]
    pub rank: i32,
    #[serde(flatten)]
    pub title: TopTitle,
}

impl DatasetRecord for TopByDecade {
    const FILE: &'static str = "top_titles_by_decade.json";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mainstream,
    Cult,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainstreamCult {
    #[serde(flatten)]
    pub title: TopTitle,
    pub category: Category,
}

impl DatasetRecord for MainstreamCult {
    const FILE: &'static str = "mainstream_vs_cult.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreWeighted {
    pub genre: String,
    #[serde(deserialize_with = "whole_number::count")]
    pub title_count: u64,
    #[serde(deserialize_with = "whole_number::count")]
    pub total_votes: u64,
    pub weighted_rating: f64,
}

impl DatasetRecord for GenreWeighted {
    const FILE: &'static str = "genre_weighted_ratings.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenrePopularity {
    #[serde(deserialize_with = "whole_number::int")]
    pub decade: i32,
    pub genre: String,
    #[serde(deserialize_with = "whole_number::count")]
    pub title_count: u64,
    #[serde(deserialize_with = "whole_number::count")]
    pub total_votes: u64,
}

impl DatasetRecord for GenrePopularity {
    const FILE: &'static str = "genre_popularity_by_decade.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeRating {
    pub genre: String,
    #[serde(deserialize_with = "whole_number::count")]
    pub title_count: u64,
    pub avg_runtime_minutes: f64,
    pub median_runtime_minutes: f64,
    pub avg_rating: f64,
    pub median_rating: f64,
}

impl DatasetRecord for RuntimeRating {
    const FILE: &'static str = "runtime_vs_rating_by_genre.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RisingTitle {
    pub primary_title: String,
    pub title_type: String,
    #[serde(default, deserialize_with = "whole_number::option")]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(deserialize_with = "whole_number::count")]
    pub num_votes_current: u64,
    #[serde(deserialize_with = "whole_number::count")]
    pub num_votes_previous: u64,
    #[serde(deserialize_with = "whole_number::signed")]
    pub delta_votes: i64,
    #[serde(default)]
    pub pct_change: Option<f64>,
}

impl DatasetRecord for RisingTitle {
    const FILE: &'static str = "rising_titles_votes_week_over_week.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEpisode {
    pub tconst: String,
    pub series_title: String,
    pub episode_title: String,
    #[serde(default, deserialize_with = "whole_number::option")]
    pub season_number: Option<i32>,
    #[serde(default, deserialize_with = "whole_number::option")]
    pub episode_number: Option<i32>,
    pub average_rating: f64,
    #[serde(deserialize_with = "whole_number::count")]
    pub num_votes: u64,
}

impl TopEpisode {
    /// `Series S1E5`, with `?` standing in for unknown season/episode numbers.
    pub fn chart_label(&self) -> String {
        let season = self
            .season_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".into());
        let episode = self
            .episode_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".into());
        format!("{} S{season}E{episode}", self.series_title)
    }
}

impl DatasetRecord for TopEpisode {
    const FILE: &'static str = "top_episodes.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRating {
    pub series_tconst: String,
    pub series_title: String,
    #[serde(deserialize_with = "whole_number::int")]
    pub season_number: i32,
    pub avg_rating: f64,
    #[serde(deserialize_with = "whole_number::count")]
    pub total_votes: u64,
    #[serde(deserialize_with = "whole_number::count")]
    pub episode_count: u64,
}

impl DatasetRecord for SeasonRating {
    const FILE: &'static str = "series_season_ratings.json";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDrop {
    pub series_tconst: String,
    pub series_title: String,
    #[serde(rename = "season1Rating")]
    pub season1_rating: f64,
    pub last_season_rating: f64,
    #[serde(deserialize_with = "whole_number::int")]
    pub last_season: i32,
    pub quality_drop: f64,
}

impl DatasetRecord for QualityDrop {
    const FILE: &'static str = "series_quality_drop.json";
}

/// Integer columns can arrive as `1994.0` or `9000000.0` once upstream has
/// promoted them to floats; accept any whole JSON number in range.
mod whole_number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    fn whole<E: Error>(raw: f64, min: f64, max: f64) -> Result<f64, E> {
        if raw.fract() == 0.0 && raw >= min && raw <= max {
            Ok(raw)
        } else {
            Err(E::custom(format!("expected a whole number, got {raw}")))
        }
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        whole(raw, 0.0, u64::MAX as f64).map(|v| v as u64)
    }

    pub fn signed<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        whole(raw, i64::MIN as f64, i64::MAX as f64).map(|v| v as i64)
    }

    pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        whole(raw, f64::from(i32::MIN), f64::from(i32::MAX)).map(|v| v as i32)
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|raw| whole(raw, f64::from(i32::MIN), f64::from(i32::MAX)).map(|v| v as i32))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_title_accepts_null_and_float_years() {
        let with_float: TopTitle = serde_json::from_value(json!({
            "tconst": "tt0111161",
            "primaryTitle": "The Shawshank Redemption",
            "titleType": "movie",
            "startYear": 1994.0,
            "genres": "Drama",
            "averageRating": 9.3,
            "numVotes": 2900000
        }))
        .unwrap();
        assert_eq!(with_float.start_year, Some(1994));

        let with_null: TopTitle = serde_json::from_value(json!({
            "tconst": "tt1",
            "primaryTitle": "Unknown",
            "titleType": "movie",
            "startYear": null,
            "genres": null,
            "averageRating": 8.0,
            "numVotes": 10
        }))
        .unwrap();
        assert_eq!(with_null.start_year, None);
        assert_eq!(with_null.genres, None);
    }

    #[test]
    fn fractional_year_is_rejected() {
        let parsed = serde_json::from_value::<TopTitle>(json!({
            "tconst": "tt1",
            "primaryTitle": "Odd",
            "titleType": "movie",
            "startYear": 1994.5,
            "averageRating": 8.0,
            "numVotes": 10
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn float_aggregates_are_read_as_counts() {
        let genre: GenreWeighted = serde_json::from_value(json!({
            "genre": "Drama",
            "titleCount": 1200.0,
            "totalVotes": 9000000.0,
            "weightedRating": 7.4
        }))
        .unwrap();
        assert_eq!(genre.total_votes, 9_000_000);
        assert_eq!(genre.title_count, 1200);

        let season: SeasonRating = serde_json::from_value(json!({
            "seriesTconst": "tt0903747",
            "seriesTitle": "Breaking Bad",
            "seasonNumber": 5.0,
            "avgRating": 9.2,
            "totalVotes": 350000.0,
            "episodeCount": 16
        }))
        .unwrap();
        assert_eq!(season.season_number, 5);
        assert_eq!(season.total_votes, 350_000);

        let rising: RisingTitle = serde_json::from_value(json!({
            "primaryTitle": "Breakout",
            "titleType": "movie",
            "numVotesCurrent": 1500.0,
            "numVotesPrevious": 1000.0,
            "deltaVotes": -500.0
        }))
        .unwrap();
        assert_eq!(rising.delta_votes, -500);
    }

    #[test]
    fn negative_or_fractional_counts_are_rejected() {
        let fractional = serde_json::from_value::<GenrePopularity>(json!({
            "decade": 1990,
            "genre": "Drama",
            "titleCount": 3,
            "totalVotes": 100.5
        }));
        assert!(fractional.is_err());

        let negative = serde_json::from_value::<GenrePopularity>(json!({
            "decade": 1990,
            "genre": "Drama",
            "titleCount": -1,
            "totalVotes": 100
        }));
        assert!(negative.is_err());
    }

    #[test]
    fn flattened_records_read_shared_title_fields() {
        let row: MainstreamCult = serde_json::from_value(json!({
            "tconst": "tt2",
            "primaryTitle": "Cult Pick",
            "titleType": "movie",
            "startYear": 1999,
            "genres": "Horror",
            "averageRating": 8.1,
            "numVotes": 12000.0,
            "category": "cult"
        }))
        .unwrap();
        assert_eq!(row.category, Category::Cult);
        assert_eq!(row.title.primary_title, "Cult Pick");
        assert_eq!(row.title.num_votes, 12_000);

        let unknown: MainstreamCult = serde_json::from_value(json!({
            "tconst": "tt3",
            "primaryTitle": "Other",
            "titleType": "movie",
            "averageRating": 7.0,
            "numVotes": 1,
            "category": "arthouse"
        }))
        .unwrap();
        assert_eq!(unknown.category, Category::Other);
    }

    #[test]
    fn quality_drop_keeps_upstream_key() {
        let row = QualityDrop {
            series_tconst: "tt9".into(),
            series_title: "Show".into(),
            season1_rating: 8.9,
            last_season_rating: 6.1,
            last_season: 8,
            quality_drop: 2.8,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("season1Rating").is_some());
        assert!(value.get("lastSeasonRating").is_some());
    }

    #[test]
    fn episode_label_marks_unknown_numbers() {
        let episode = TopEpisode {
            tconst: "tt5".into(),
            series_title: "Breaking Bad".into(),
            episode_title: "Ozymandias".into(),
            season_number: Some(5),
            episode_number: None,
            average_rating: 10.0,
            num_votes: 250_000,
        };
        assert_eq!(episode.chart_label(), "Breaking Bad S5E?");
    }
}
