//! Search box wired to the debounced controller.

use charscope_core::SearchHandle;
use dioxus::prelude::*;

use crate::components::TextField;
use crate::state::*;

#[component]
pub fn SearchInput() -> Element {
    let handle = use_context::<SearchHandle>();
    let query = QUERY.read().clone();

    rsx! {
        TextField {
            value: query,
            oninput: move |value: String| {
                // The box shows raw text right away; the controller decides when to search.
                *QUERY.write() = value.clone();
                if !handle.input(value) {
                    tracing::warn!("Search controller has stopped");
                }
            },
        }
    }
}
