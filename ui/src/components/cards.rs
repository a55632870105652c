use dioxus::prelude::*;

use crate::pages::{CardText, Hero, Kpi};

#[component]
pub fn SectionHeader(text: CardText) -> Element {
    rsx! {
        div { class: "section-header",
            h2 { class: "section-header__title", "{text.title}" }
            if let Some(description) = text.description.as_ref() {
                p { class: "section-header__description", "{description}" }
            }
        }
    }
}

#[component]
pub fn Card(text: CardText, children: Element) -> Element {
    rsx! {
        article { class: "card",
            CardHeading { text: text.clone() }
            div { class: "card__body", {children} }
            if let Some(caption) = text.caption.as_ref() {
                p { class: "card__caption", "{caption}" }
            }
        }
    }
}

/// Card variant with a fixed-height plot area.
#[component]
pub fn ChartCard(text: CardText, children: Element) -> Element {
    rsx! {
        article { class: "card card--chart",
            CardHeading { text: text.clone() }
            div { class: "card__chart", {children} }
            if let Some(caption) = text.caption.as_ref() {
                p { class: "card__caption", "{caption}" }
            }
        }
    }
}

#[component]
fn CardHeading(text: CardText) -> Element {
    rsx! {
        header { class: "card__header",
            if let Some(eyebrow) = text.eyebrow.as_ref() {
                p { class: "card__eyebrow", "{eyebrow}" }
            }
            h3 { class: "card__title", "{text.title}" }
            if let Some(description) = text.description.as_ref() {
                p { class: "card__description", "{description}" }
            }
        }
    }
}

#[component]
pub fn KpiCard(kpi: Kpi) -> Element {
    rsx! {
        div { class: "kpi-card",
            span { class: "kpi-card__label", "{kpi.label}" }
            strong { class: "kpi-card__value", "{kpi.value}" }
            if let Some(hint) = kpi.hint.as_ref() {
                span { class: "kpi-card__hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn KpiGrid(kpis: Vec<Kpi>) -> Element {
    rsx! {
        div { class: "kpi-grid",
            for kpi in kpis {
                KpiCard { key: "{kpi.label}", kpi: kpi.clone() }
            }
        }
    }
}

#[component]
pub fn HeroBanner(hero: Hero) -> Element {
    rsx! {
        section { class: "hero",
            if let Some(meta) = hero.meta.as_ref() {
                p { class: "hero__meta", "{meta}" }
            }
            div {
                p { class: "hero__eyebrow", "{hero.eyebrow}" }
                h1 { class: "hero__title", "{hero.title}" }
                p { class: "hero__subtitle", "{hero.subtitle}" }
            }
            div { class: "hero__stat",
                p { class: "hero__stat-label", "{hero.stat_label}" }
                p { class: "hero__stat-value", "{hero.stat_value}" }
                p { class: "hero__stat-title", "{hero.stat_title}" }
                p { class: "hero__stat-meta", "{hero.stat_meta}" }
            }
        }
    }
}
