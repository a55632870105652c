//! View derivation: turns flat dataset records into the shapes ranked
//! tables and multi-series charts consume.
//!
//! Everything here is pure and synchronous. Fields are reached through
//! accessor closures over typed records, never by dynamic key lookup.
//!
//! - [`top_n`]: stable descending prefix (ties keep input order).
//! - [`group_sum`]: per-key totals in first-occurrence key order.
//! - [`pivot`]: sparse row-keyed table; a missing (row, series) pair is
//!   omitted, never zero-filled.
//! - [`split`]: order-preserving partition by a discriminant.
//! - [`group_rows`]: records bucketed by an integer key.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::{Map, Number, Value};

/// Stable sort by `field` descending, then keep the first `n`.
///
/// NaN values sort after every number and keep their input order among
/// themselves.
pub fn top_n<T, F>(records: &[T], n: usize, field: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    if n == 0 || records.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&T> = records.iter().collect();
    ranked.sort_by(|a, b| descending(field(a), field(b)));
    ranked.into_iter().take(n).cloned().collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Summed values per group key, iterated in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTotals {
    totals: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl GroupTotals {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&position| self.totals[position].1)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.totals.iter().map(|(key, total)| (key.as_str(), *total))
    }

    /// The `k` keys with the largest totals. Equal totals keep first-occurrence order.
    pub fn top_keys(&self, k: usize) -> Vec<String> {
        let entries: Vec<(&String, f64)> = self.totals.iter().map(|(key, v)| (key, *v)).collect();
        top_n(&entries, k, |(_, total)| *total)
            .into_iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

pub fn group_sum<T, K, V>(records: &[T], key: K, value: V) -> GroupTotals
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let mut out = GroupTotals::default();
    for record in records {
        let group = key(record);
        match out.index.get(group) {
            Some(&position) => out.totals[position].1 += value(record),
            None => {
                out.index.insert(group.to_string(), out.totals.len());
                out.totals.push((group.to_string(), value(record)));
            }
        }
    }
    out
}

/// One row of a [`PivotTable`]: the row key plus each series observed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub key: i64,
    /// Observed series in first-seen order.
    values: Vec<(String, f64)>,
}

impl PivotRow {
    pub fn get(&self, series: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == series)
            .map(|(_, v)| *v)
    }

    pub fn has(&self, series: &str) -> bool {
        self.values.iter().any(|(name, _)| name == series)
    }

    fn insert(&mut self, series: &str, value: f64) {
        match self.values.iter_mut().find(|(name, _)| name == series) {
            Some(slot) => slot.1 = value,
            None => self.values.push((series.to_string(), value)),
        }
    }

    pub fn series(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(name, v)| (name.as_str(), *v))
    }
}

/// Sparse multi-series table keyed by an integer row field (decade, season...).
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub row_field: String,
    /// Series requested for the table, in the caller's order (chart legend order).
    pub series: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Chart-ready objects: `{<row_field>: key, <series>: value, ...}`.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert(self.row_field.clone(), Value::from(row.key));
                for (series, value) in row.series() {
                    let number = Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null);
                    object.insert(series.to_string(), number);
                }
                Value::Object(object)
            })
            .collect()
    }

    /// Smallest and largest value present across all rows.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|row| row.series().map(|(_, v)| v))
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Build a sparse pivot over the `allowed` series.
///
/// Rows are sorted ascending by `row_key`. When the same (row, series) pair
/// appears more than once the last value wins.
pub fn pivot<T, S, R, K, V>(
    records: &[T],
    row_field: &str,
    row_key: R,
    series_key: K,
    value: V,
    allowed: &[S],
) -> PivotTable
where
    S: AsRef<str>,
    R: Fn(&T) -> i64,
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let allowed_set: HashSet<&str> = allowed.iter().map(AsRef::as_ref).collect();
    let mut grouped: BTreeMap<i64, PivotRow> = BTreeMap::new();

    for record in records {
        let series = series_key(record);
        if !allowed_set.contains(series) {
            continue;
        }
        let key = row_key(record);
        grouped
            .entry(key)
            .or_insert_with(|| PivotRow {
                key,
                values: Vec::new(),
            })
            .insert(series, value(record));
    }

    let rows: Vec<PivotRow> = grouped.into_values().collect();

    PivotTable {
        row_field: row_field.to_string(),
        series: allowed.iter().map(|s| s.as_ref().to_string()).collect(),
        rows,
    }
}

/// Disjoint, order-preserving partitions in requested category order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySplit<C, T> {
    partitions: Vec<(C, Vec<T>)>,
}

impl<C: PartialEq, T> CategorySplit<C, T> {
    /// Records for `category`; empty when the category was not requested.
    pub fn get(&self, category: &C) -> &[T] {
        self.partitions
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &[T])> + '_ {
        self.partitions.iter().map(|(c, records)| (c, records.as_slice()))
    }

    pub fn into_partitions(self) -> Vec<(C, Vec<T>)> {
        self.partitions
    }
}

/// Partition `records` by `discriminant` into one sequence per category.
///
/// Records matching no category are dropped. A category listed twice only
/// receives records at its first position.
pub fn split<T, C, D>(records: &[T], discriminant: D, categories: &[C]) -> CategorySplit<C, T>
where
    T: Clone,
    C: PartialEq + Clone,
    D: Fn(&T) -> C,
{
    let mut partitions: Vec<(C, Vec<T>)> =
        categories.iter().map(|c| (c.clone(), Vec::new())).collect();

    for record in records {
        let value = discriminant(record);
        if let Some((_, bucket)) = partitions.iter_mut().find(|(c, _)| *c == value) {
            bucket.push(record.clone());
        }
    }

    CategorySplit { partitions }
}

/// Bucket records by an integer key; buckets ascend, input order is kept inside each.
pub fn group_rows<T, K>(records: &[T], key: K) -> Vec<(i64, Vec<T>)>
where
    T: Clone,
    K: Fn(&T) -> i64,
{
    let mut buckets: BTreeMap<i64, Vec<T>> = BTreeMap::new();
    for record in records {
        buckets.entry(key(record)).or_default().push(record.clone());
    }
    buckets.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Rated {
        title: &'static str,
        rating: f64,
    }

    fn rated(title: &'static str, rating: f64) -> Rated {
        Rated { title, rating }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Popularity {
        decade: i64,
        genre: &'static str,
        votes: f64,
    }

    fn pop(decade: i64, genre: &'static str, votes: f64) -> Popularity {
        Popularity {
            decade,
            genre,
            votes,
        }
    }

    #[test]
    fn top_n_ties_keep_input_order() {
        let input = vec![rated("A", 9.1), rated("B", 9.1), rated("C", 8.0)];
        let top = top_n(&input, 2, |r| r.rating);
        let titles: Vec<_> = top.iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn top_n_puts_nan_last() {
        let input = vec![
            rated("nan-1", f64::NAN),
            rated("low", 5.0),
            rated("nan-2", f64::NAN),
            rated("high", 9.0),
            rated("inf", f64::INFINITY),
        ];
        let titles: Vec<_> = top_n(&input, 5, |r| r.rating)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["inf", "high", "low", "nan-1", "nan-2"]);

        let top: Vec<_> = top_n(&input, 2, |r| r.rating).into_iter().map(|r| r.title).collect();
        assert_eq!(top, vec!["inf", "high"]);
    }

    #[test]
    fn top_n_sorts_descending_and_bounds_length() {
        let input = vec![
            rated("low", 6.0),
            rated("high", 9.5),
            rated("mid", 7.7),
            rated("mid-2", 7.7),
        ];
        for n in 0..6 {
            let top = top_n(&input, n, |r| r.rating);
            assert_eq!(top.len(), n.min(input.len()));
            assert!(top.windows(2).all(|w| w[0].rating >= w[1].rating));
        }
        let all: Vec<_> = top_n(&input, 10, |r| r.rating)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(all, vec!["high", "mid", "mid-2", "low"]);
    }

    #[test]
    fn top_n_zero_or_empty_is_empty() {
        assert!(top_n(&[rated("A", 1.0)], 0, |r| r.rating).is_empty());
        assert!(top_n::<Rated, _>(&[], 3, |r| r.rating).is_empty());
    }

    #[test]
    fn top_n_does_not_mutate_input() {
        let input = vec![rated("C", 1.0), rated("B", 2.0), rated("A", 3.0)];
        let before = input.clone();
        let _ = top_n(&input, 2, |r| r.rating);
        assert_eq!(input, before);
    }

    #[test]
    fn group_sum_totals_in_first_occurrence_order() {
        let rows = vec![
            pop(1990, "Drama", 100.0),
            pop(1990, "Comedy", 50.0),
            pop(2000, "Drama", 200.0),
            pop(2000, "Action", 10.0),
        ];
        let totals = group_sum(&rows, |r| r.genre, |r| r.votes);
        let keys: Vec<_> = totals.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Drama", "Comedy", "Action"]);
        assert_eq!(totals.get("Drama"), Some(300.0));
        assert_eq!(totals.get("Missing"), None);
    }

    #[test]
    fn group_sum_totals_ignore_row_order() {
        let rows = vec![
            pop(1990, "Drama", 100.0),
            pop(1990, "Comedy", 50.0),
            pop(2000, "Drama", 200.0),
            pop(2010, "Comedy", 25.0),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = group_sum(&rows, |r| r.genre, |r| r.votes);
        let backward = group_sum(&reversed, |r| r.genre, |r| r.votes);
        for (key, total) in forward.iter() {
            assert_eq!(backward.get(key), Some(total));
        }
        assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn top_keys_is_stable_for_equal_sums() {
        let rows = vec![
            pop(1990, "Western", 10.0),
            pop(1990, "Drama", 30.0),
            pop(1990, "Noir", 10.0),
            pop(2000, "Comedy", 20.0),
        ];
        let totals = group_sum(&rows, |r| r.genre, |r| r.votes);
        assert_eq!(totals.top_keys(3), vec!["Drama", "Comedy", "Western"]);
        assert_eq!(totals.top_keys(10).len(), 4);
        assert!(totals.top_keys(0).is_empty());
    }

    #[test]
    fn pivot_omits_missing_combinations() {
        let rows = vec![
            pop(1990, "Drama", 100.0),
            pop(2000, "Drama", 200.0),
            pop(1990, "Comedy", 50.0),
        ];
        let table = pivot(
            &rows,
            "decade",
            |r| r.decade,
            |r| r.genre,
            |r| r.votes,
            &["Drama", "Comedy"],
        );
        assert_eq!(
            table.to_records(),
            vec![
                json!({"decade": 1990, "Drama": 100.0, "Comedy": 50.0}),
                json!({"decade": 2000, "Drama": 200.0}),
            ]
        );
        assert!(!table.rows[1].has("Comedy"));
        assert_eq!(table.rows[1].get("Comedy"), None);
    }

    #[test]
    fn pivot_filters_sorts_and_keeps_one_row_per_key() {
        let rows = vec![
            pop(2010, "Drama", 5.0),
            pop(1980, "Horror", 7.0),
            pop(1980, "Drama", 1.0),
            pop(2010, "Drama", 6.0),
            pop(1950, "Western", 3.0),
        ];
        let table = pivot(
            &rows,
            "decade",
            |r| r.decade,
            |r| r.genre,
            |r| r.votes,
            &["Drama".to_string(), "Horror".to_string()],
        );
        let keys: Vec<_> = table.rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1980, 2010]);
        assert_eq!(table.rows[1].get("Drama"), Some(6.0));
        assert!(table
            .rows
            .iter()
            .all(|row| row.series().all(|(s, _)| s != "Western")));
        assert_eq!(table.series, vec!["Drama", "Horror"]);
        assert_eq!(table.value_range(), Some((1.0, 7.0)));
    }

    #[test]
    fn pivot_with_nothing_allowed_is_empty() {
        let rows = vec![pop(1990, "Drama", 1.0)];
        let table = pivot(&rows, "decade", |r| r.decade, |r| r.genre, |r| r.votes, &[] as &[&str]);
        assert!(table.is_empty());
        assert_eq!(table.value_range(), None);
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Mainstream,
        Cult,
        Other,
    }

    #[test]
    fn split_preserves_order_and_drops_unmatched() {
        let rows = vec![
            (1, Kind::Cult),
            (2, Kind::Mainstream),
            (3, Kind::Other),
            (4, Kind::Cult),
            (5, Kind::Mainstream),
        ];
        let parts = split(&rows, |r| r.1, &[Kind::Mainstream, Kind::Cult]);
        let ids = |kind: Kind| parts.get(&kind).iter().map(|r| r.0).collect::<Vec<_>>();
        assert_eq!(ids(Kind::Mainstream), vec![2, 5]);
        assert_eq!(ids(Kind::Cult), vec![1, 4]);
        assert!(parts.get(&Kind::Other).is_empty());

        let covered: usize = parts.iter().map(|(_, records)| records.len()).sum();
        assert_eq!(covered, 4);
    }

    #[test]
    fn split_duplicate_category_fills_first_only() {
        let rows = vec![(1, Kind::Cult), (2, Kind::Cult)];
        let parts = split(&rows, |r| r.1, &[Kind::Cult, Kind::Cult]).into_partitions();
        assert_eq!(parts[0].1.len(), 2);
        assert!(parts[1].1.is_empty());
    }

    #[test]
    fn group_rows_buckets_ascending() {
        let rows = vec![(2000, "a"), (1990, "b"), (2000, "c"), (1980, "d")];
        let grouped = group_rows(&rows, |r| r.0);
        let keys: Vec<_> = grouped.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1980, 1990, 2000]);
        let names: Vec<_> = grouped[2].1.iter().map(|r| r.1).collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
