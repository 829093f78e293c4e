//! Loading indicator and character list.

use charscope_core::SearchView;
use dioxus::prelude::*;

use crate::state::*;

#[component]
pub fn SearchResults() -> Element {
    let view = SearchView::from(&*SNAPSHOT.read());

    rsx! {
        if view.show_loading {
            p { class: "loading", "Loading..." }
        }
        if view.show_results() {
            div {
                class: "results",
                for row in view.rows.iter() {
                    div {
                        key: "{row.key}",
                        class: "character",
                        img { src: "{row.image_src}", alt: "{row.alt}" }
                        span { class: "character-name", "{row.label}" }
                    }
                }
            }
        }
    }
}
