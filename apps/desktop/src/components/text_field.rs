use dioxus::prelude::*;

/// Single-line text box. Reports every edit through `oninput`.
#[component]
pub fn TextField(
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "Type a character name...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        input {
            class: "text-field",
            r#type: "text",
            placeholder: "{placeholder}",
            value: "{value}",
            autofocus: true,
            oninput: move |e: Event<FormData>| oninput.call(e.value()),
        }
    }
}
