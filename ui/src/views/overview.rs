use dioxus::prelude::*;

use crate::components::{
    BarChartView, ChartCard, HeroBanner, KpiGrid, LineChartView, SectionHeader, TableCardView,
};
use crate::context::{use_dashboard, use_translator};
use crate::pages::overview::{self, OverviewData, OverviewView};

use super::PageLoading;

#[component]
pub fn Overview() -> Element {
    let ctx = use_dashboard();
    let tr = use_translator();
    let data = use_resource(move || {
        let loader = ctx.loader();
        async move { OverviewData::load(&loader).await }
    });
    let view = use_memo(move || match &*data.read() {
        Some(data) => Some(overview::derive(data, &tr.read())),
        None => None,
    });

    let Some(OverviewView {
        hero,
        snapshot_section,
        kpis,
        top_titles,
        top_genres,
        popularity,
        rising,
        empty_label,
    }) = view()
    else {
        return rsx! { PageLoading {} };
    };

    rsx! {
        section { class: "page page-overview",
            HeroBanner { hero }

            SectionHeader { text: snapshot_section }
            KpiGrid { kpis }

            div { class: "page__grid page__grid--two",
                TableCardView { card: top_titles, empty_label: empty_label.clone() }
                ChartCard { text: top_genres.text.clone(),
                    BarChartView { panel: top_genres, empty_label: empty_label.clone() }
                }
            }

            ChartCard { text: popularity.text.clone(),
                LineChartView { panel: popularity, empty_label: empty_label.clone() }
            }

            TableCardView { card: rising, empty_label }
        }
    }
}
