use dioxus::prelude::*;

use crate::context::use_translator;
use crate::t;

#[component]
pub fn Footer() -> Element {
    let tr = use_translator();
    let tr = tr();

    rsx! {
        footer { class: "footer",
            p { class: "footer__brand", {t!(tr, "brand-name")} }
            p { class: "footer__note", {t!(tr, "footer-note")} }
        }
    }
}
