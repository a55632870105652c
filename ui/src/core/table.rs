//! Declarative table description and the rendered cell grid.
//!
//! Pages describe a table as a list of [`Column`]s (`key`, `label`, `align`,
//! `render`) over typed rows. [`TableView::build`] applies limit and rank
//! options once, producing plain strings the `DataTable` component renders.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

impl Align {
    pub fn css_class(self) -> &'static str {
        match self {
            Align::Left => "",
            Align::Right => "align-right",
        }
    }
}

pub struct Column<'a, T> {
    /// Upstream field the column shows; also the cell identity.
    pub key: &'static str,
    pub label: String,
    pub align: Align,
    pub render: Box<dyn Fn(&T) -> String + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(
        key: &'static str,
        label: impl Into<String>,
        render: impl Fn(&T) -> String + 'a,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            align: Align::Left,
            render: Box::new(render),
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub limit: Option<usize>,
    pub show_rank: bool,
    pub rank_label: String,
    pub rank_start: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            limit: None,
            show_rank: false,
            rank_label: "#".to_string(),
            rank_start: 1,
        }
    }
}

impl TableOptions {
    /// Ranked table showing at most `limit` rows.
    pub fn ranked(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            show_rank: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: String,
    pub rank: Option<usize>,
    pub cells: Vec<(String, Align)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub rank_label: Option<String>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build<T>(rows: &[T], columns: &[Column<'_, T>], options: &TableOptions) -> Self {
        let visible = match options.limit {
            Some(limit) => &rows[..limit.min(rows.len())],
            None => rows,
        };

        let headers = columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.to_string(),
                label: column.label.clone(),
                align: column.align,
            })
            .collect();

        let rows = visible
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells: Vec<(String, Align)> = columns
                    .iter()
                    .map(|column| ((column.render)(row), column.align))
                    .collect();
                let first = cells.first().map(|(text, _)| text.as_str()).unwrap_or("");
                let key = format!("{index}-{first}");
                TableRow {
                    key,
                    rank: options.show_rank.then_some(index + options.rank_start),
                    cells,
                }
            })
            .collect();

        Self {
            rank_label: options.show_rank.then(|| options.rank_label.clone()),
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
