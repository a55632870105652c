use dioxus::prelude::*;

use crate::core::table::TableView;
use crate::pages::TableCard;

use super::cards::Card;

/// Renders a prepared [`TableView`]; shows `empty_label` when it has no rows.
#[component]
pub fn DataTable(table: TableView, empty_label: String) -> Element {
    if table.is_empty() {
        return rsx! {
            p { class: "table-empty", "{empty_label}" }
        };
    }

    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        if let Some(rank_label) = table.rank_label.as_ref() {
                            th { class: "data-table__rank", "{rank_label}" }
                        }
                        for header in table.headers.iter() {
                            th { key: "{header.key}", class: header.align.css_class(), "{header.label}" }
                        }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        tr { key: "{row.key}",
                            if let Some(rank) = row.rank {
                                td { class: "data-table__rank", "{rank}" }
                            }
                            for (index, (text, align)) in row.cells.iter().enumerate() {
                                td { key: "{index}", class: align.css_class(), "{text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn TableCardView(card: TableCard, empty_label: String) -> Element {
    rsx! {
        Card { text: card.text.clone(),
            DataTable { table: card.table.clone(), empty_label }
        }
    }
}
