use dioxus::prelude::*;

use crate::chart::Theme;

#[component]
pub fn ThemeToggle(theme: Theme, on_toggle: EventHandler<Theme>) -> Element {
    let next = theme.toggled();
    let icon = match theme {
        Theme::Dark => "☀️",
        Theme::Light => "🌙",
    };
    let text = match next {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    };

    rsx! {
        button {
            r#type: "button",
            class: "theme-toggle",
            title: "Switch to {next.as_str()} mode",
            aria_label: "Toggle {next.as_str()} mode",
            onclick: move |_| on_toggle.call(next),
            span { class: "theme-icon", "{icon}" }
            span { class: "theme-text", "{text}" }
        }
    }
}
