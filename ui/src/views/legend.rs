use dioxus::prelude::*;

use crate::chart::legend::FALLBACK_COLOR;
use crate::core::dataset::{CategoryEntry, SourceValue};
use crate::core::visibility::VisibilitySet;

/// Toggleable category legend, in metadata order. Entries whose value is not
/// numeric are listed but cannot be toggled.
#[component]
pub fn LegendBar(
    entries: Vec<CategoryEntry>,
    visible: VisibilitySet,
    on_toggle: EventHandler<SourceValue>,
) -> Element {
    rsx! {
        div { class: "heatmap-legend",
            div { class: "legend-container",
                for (index, entry) in entries.iter().enumerate() {
                    LegendItem {
                        key: "{index}-{entry.name}",
                        entry: entry.clone(),
                        enabled: entry.key().map_or(true, |value| visible.admits(value)),
                        on_toggle,
                    }
                }
            }
        }
    }
}

#[component]
fn LegendItem(entry: CategoryEntry, enabled: bool, on_toggle: EventHandler<SourceValue>) -> Element {
    let value = entry.key();
    let class = if enabled { "legend-item" } else { "legend-item disabled" };
    let color = entry.color().unwrap_or(FALLBACK_COLOR).to_string();
    let label = entry.label();
    let title = entry.description().unwrap_or_default().to_string();

    let toggle = move || {
        if let Some(value) = value {
            on_toggle.call(value);
        }
    };

    rsx! {
        div {
            class: "{class}",
            role: "button",
            tabindex: 0,
            title: "{title}",
            aria_pressed: "{enabled}",
            onclick: move |_| toggle(),
            onkeydown: move |evt| {
                let key = evt.key().to_string();
                if key == "Enter" || key == " " {
                    evt.prevent_default();
                    toggle();
                }
            },
            span { class: "legend-swatch", style: "background-color: {color}" }
            span { class: "legend-label", "{label}" }
        }
    }
}
