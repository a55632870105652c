use dioxus::prelude::*;

use crate::components::{BarChartView, ChartCard, HeroBanner, SectionHeader, TableCardView};
use crate::context::{use_dashboard, use_translator};
use crate::pages::top_titles::{self, TopTitlesData, TopTitlesView};

use super::PageLoading;

#[component]
pub fn TopTitles() -> Element {
    let ctx = use_dashboard();
    let tr = use_translator();
    let data = use_resource(move || {
        let loader = ctx.loader();
        async move { TopTitlesData::load(&loader).await }
    });
    let view = use_memo(move || match &*data.read() {
        Some(data) => Some(top_titles::derive(data, &tr.read())),
        None => None,
    });

    let Some(TopTitlesView {
        hero,
        top10_section,
        top10,
        all_time_section,
        all_time,
        by_decade_section,
        decades,
        split_section,
        mainstream,
        cult,
        empty_label,
    }) = view()
    else {
        return rsx! { PageLoading {} };
    };

    rsx! {
        section { class: "page page-top-titles",
            HeroBanner { hero }

            SectionHeader { text: top10_section }
            ChartCard { text: top10.text.clone(),
                BarChartView { panel: top10, empty_label: empty_label.clone() }
            }

            SectionHeader { text: all_time_section }
            TableCardView { card: all_time, empty_label: empty_label.clone() }

            SectionHeader { text: by_decade_section }
            if decades.is_empty() {
                p { class: "table-empty", "{empty_label}" }
            }
            div { class: "page__grid page__grid--two",
                for card in decades {
                    TableCardView {
                        key: "{card.text.title}",
                        card: card.clone(),
                        empty_label: empty_label.clone(),
                    }
                }
            }

            SectionHeader { text: split_section }
            div { class: "page__grid page__grid--two",
                TableCardView { card: mainstream, empty_label: empty_label.clone() }
                TableCardView { card: cult, empty_label }
            }
        }
    }
}
