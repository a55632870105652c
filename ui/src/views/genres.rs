use dioxus::prelude::*;

use crate::components::{
    BarChartView, ChartCard, HeroBanner, LineChartView, ScatterView, SectionHeader,
};
use crate::context::{use_dashboard, use_translator};
use crate::pages::genres::{self, GenreHighlight, GenresData, GenresView};

use super::PageLoading;

#[component]
pub fn Genres() -> Element {
    let ctx = use_dashboard();
    let tr = use_translator();
    let data = use_resource(move || {
        let loader = ctx.loader();
        async move { GenresData::load(&loader).await }
    });
    let view = use_memo(move || match &*data.read() {
        Some(data) => Some(genres::derive(data, &tr.read())),
        None => None,
    });

    let Some(GenresView {
        hero,
        weighted,
        popularity,
        runtime,
        highlights_section,
        highlights,
        empty_label,
    }) = view()
    else {
        return rsx! { PageLoading {} };
    };

    rsx! {
        section { class: "page page-genres",
            HeroBanner { hero }

            div { class: "page__grid page__grid--two",
                ChartCard { text: weighted.text.clone(),
                    BarChartView { panel: weighted, empty_label: empty_label.clone() }
                }
                ChartCard { text: runtime.text.clone(),
                    ScatterView { panel: runtime, empty_label: empty_label.clone() }
                }
            }

            ChartCard { text: popularity.text.clone(),
                LineChartView { panel: popularity, empty_label: empty_label.clone() }
            }

            SectionHeader { text: highlights_section }
            if highlights.is_empty() {
                p { class: "table-empty", "{empty_label}" }
            }
            div { class: "highlight-grid",
                for highlight in highlights {
                    HighlightCard { key: "{highlight.genre}", highlight: highlight.clone() }
                }
            }
        }
    }
}

#[component]
fn HighlightCard(highlight: GenreHighlight) -> Element {
    rsx! {
        article { class: "highlight-card",
            p { class: "highlight-card__eyebrow", "{highlight.eyebrow}" }
            h3 { class: "highlight-card__title", "{highlight.genre}" }
            dl { class: "highlight-card__stats",
                for (label, value) in highlight.lines.iter() {
                    div { key: "{label}", class: "highlight-card__stat",
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
        }
    }
}
