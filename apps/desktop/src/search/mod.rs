//! Search panel: input field, loading indicator, and result list.

mod results;
mod search_input;

use dioxus::prelude::*;
use results::SearchResults;
use search_input::SearchInput;

#[component]
pub fn SearchPanel() -> Element {
    rsx! {
        div {
            class: "search-panel",
            SearchInput {}
            SearchResults {}
        }
    }
}
