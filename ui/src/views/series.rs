use dioxus::prelude::*;

use crate::components::{
    BarChartView, ChartCard, HeroBanner, LineChartView, SectionHeader, TableCardView,
};
use crate::context::{use_dashboard, use_translator};
use crate::pages::series::{self, SeriesData, SeriesView};

use super::PageLoading;

#[component]
pub fn Series() -> Element {
    let ctx = use_dashboard();
    let tr = use_translator();
    let data = use_resource(move || {
        let loader = ctx.loader();
        async move { SeriesData::load(&loader).await }
    });
    let view = use_memo(move || match &*data.read() {
        Some(data) => Some(series::derive(data, &tr.read())),
        None => None,
    });

    let Some(SeriesView {
        hero,
        top_episodes,
        season_ratings,
        quality_drop_section,
        quality_drop,
        top_rated_section,
        top_rated,
        empty_label,
    }) = view()
    else {
        return rsx! { PageLoading {} };
    };

    rsx! {
        section { class: "page page-series",
            HeroBanner { hero }

            div { class: "page__grid page__grid--two",
                ChartCard { text: top_episodes.text.clone(),
                    BarChartView { panel: top_episodes, empty_label: empty_label.clone() }
                }
                ChartCard { text: season_ratings.text.clone(),
                    LineChartView { panel: season_ratings, empty_label: empty_label.clone() }
                }
            }

            SectionHeader { text: quality_drop_section }
            TableCardView { card: quality_drop, empty_label: empty_label.clone() }

            SectionHeader { text: top_rated_section }
            TableCardView { card: top_rated, empty_label }
        }
    }
}
