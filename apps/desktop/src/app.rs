//! Root application component.

use dioxus::prelude::*;

use crate::search::SearchPanel;
use crate::state::*;
use crate::INITIAL_STATE;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    let handle = use_hook(|| {
        let state = INITIAL_STATE
            .lock()
            .ok()
            .and_then(|mut s| s.take())
            .unwrap_or_else(AppState::from_cwd);
        state.spawn_search()
    });
    use_context_provider(|| handle.clone());

    // Mirror controller snapshots into a signal so components re-render.
    use_future(move || {
        let mut snapshots = handle.subscribe();
        async move {
            loop {
                *SNAPSHOT.write() = snapshots.borrow_and_update().clone();
                if snapshots.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    rsx! {
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",
            h1 { class: "heading", "Search Rick and Morty Character" }
            p { class: "subtitle", "With a debounce hook implemented" }
            SearchPanel {}
        }
    }
}
