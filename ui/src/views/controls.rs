use dioxus::prelude::*;

use crate::core::range::DateRange;

/// Date bounds, export and live polling. Stateless: every change goes back up
/// through the handlers.
#[component]
pub fn Controls(
    range: DateRange,
    live: bool,
    #[props(default)] export_disabled: bool,
    on_range: EventHandler<DateRange>,
    on_export: EventHandler<()>,
    on_live: EventHandler<bool>,
) -> Element {
    let start = range.start.clone().unwrap_or_default();
    let end = range.end.clone().unwrap_or_default();

    let on_start = {
        let range = range.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            on_range.call(DateRange {
                start: non_blank(value),
                ..range.clone()
            });
        }
    };
    let on_end = {
        let range = range.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            on_range.call(DateRange {
                end: non_blank(value),
                ..range.clone()
            });
        }
    };

    let live_class = if live { "live-toggle live-on" } else { "live-toggle live-off" };

    rsx! {
        div { class: "controls",
            label { class: "date-label",
                "Date start"
                input {
                    class: "date-input",
                    r#type: "date",
                    value: "{start}",
                    oninput: on_start,
                }
            }

            label { class: "date-label",
                "Date end"
                input {
                    class: "date-input",
                    r#type: "date",
                    value: "{end}",
                    oninput: on_end,
                }
            }

            button {
                r#type: "button",
                class: "button export-btn",
                title: "Export chart as PNG",
                disabled: export_disabled,
                onclick: move |_| on_export.call(()),
                "Export"
            }

            button {
                r#type: "button",
                class: "{live_class}",
                title: "Toggle live updates (polling)",
                onclick: move |_| on_live.call(!live),
                if live { "Live: On" } else { "Live: Off" }
            }
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
