//! charscope desktop: Dioxus front end for the debounced character search.

use std::sync::Mutex;

use dioxus::prelude::*;

mod app;
mod components;
mod search;
mod state;

use app::App;
use state::AppState;

/// Pre-runtime storage: config is loaded before Dioxus launches, consumed on first render.
pub static INITIAL_STATE: Mutex<Option<AppState>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("charscope=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let initial_state = AppState::from_cwd();
    *INITIAL_STATE.lock().unwrap() = Some(initial_state);

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("charscope")
                            .with_inner_size(LogicalSize::new(900.0, 800.0))
                            .with_min_inner_size(LogicalSize::new(400.0, 300.0))
                            .with_resizable(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
