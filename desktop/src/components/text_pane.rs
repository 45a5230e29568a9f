use dioxus::prelude::*;

/// A scrolled plain-text editor filling its pane
#[component]
pub fn TextPane(id: String, label: String, #[props(default)] autofocus: bool) -> Element {
    rsx! {
        div {
            class: "scrolled-window",
            textarea {
                id: "{id}",
                class: "text-view",
                aria_label: "{label}",
                autofocus,
                spellcheck: false,
                wrap: "off",
            }
        }
    }
}
