use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::chart::Theme;
use crate::core::config;
use crate::core::dataset::{Payload, SourceValue};
use crate::core::platform;
use crate::core::range::DateRange;
use crate::core::source;
use crate::core::storage;
use crate::core::visibility::VisibilitySet;

use super::{Controls, HeatmapPanel, LegendBar, ThemeToggle};

/// Top-level page. Owns every piece of shell state and hands read-only views of
/// it to the children.
#[component]
pub fn Dashboard() -> Element {
    let mut theme = use_signal(storage::load_theme);
    let payload = use_signal(|| Option::<Payload>::None);
    let mut range = use_signal(DateRange::unbounded);
    let mut visible = use_signal(VisibilitySet::new);
    let mut live = use_signal(|| false);
    let loading = use_signal(|| true);
    let error = use_signal(|| Option::<String>::None);
    let mut export_request = use_signal(|| 0u64);

    let feed = Feed {
        payload,
        visible,
        loading,
        error,
    };

    use_future(move || async move {
        debug!(platform = platform::platform_name(), "runtime feed started");
        feed.refresh().await;
    });

    // Turning live on starts a fresh interval; turning it off cancels it.
    let mut poller = use_signal(|| Option::<Task>::None);
    use_effect(move || {
        let on = live();
        if let Some(task) = poller.write().take() {
            task.cancel();
        }
        if on {
            let interval = config::current().polling_interval_ms;
            debug!(interval, "live polling started");
            let task = spawn(platform::poll_every(interval, move || async move {
                debug!("polling runtime data");
                feed.refresh().await;
            }));
            poller.set(Some(task));
        }
    });

    use_effect(move || apply_body_class(theme()));

    let meta = payload
        .read()
        .as_ref()
        .map(|p| p.meta.clone())
        .unwrap_or_default();
    let has_payload = payload.read().is_some();
    let show_loading = loading() && !has_payload;

    rsx! {
        div { class: "app {theme().css_class()}",
            header { class: "header",
                h1 { "Runtime Report" }
                Controls {
                    range: range(),
                    live: live(),
                    export_disabled: !has_payload,
                    on_range: move |next: DateRange| range.set(next),
                    on_export: move |_| export_request += 1,
                    on_live: move |next: bool| live.set(next),
                }
                ThemeToggle {
                    theme: theme(),
                    on_toggle: move |next: Theme| {
                        storage::save_theme(next);
                        theme.set(next);
                    },
                }
            }

            main {
                if let Some(message) = error() {
                    div { class: "error-banner", role: "alert",
                        strong { "Error loading data:" }
                        " {message} "
                        button {
                            r#type: "button",
                            class: "retry-btn",
                            onclick: move |_| {
                                spawn(async move { feed.refresh().await });
                            },
                            "Retry"
                        }
                    }
                }

                section { class: "heatmap-area",
                    LegendBar {
                        entries: meta.sources,
                        visible: visible(),
                        on_toggle: move |value: SourceValue| {
                            let next = visible.read().toggled(value);
                            visible.set(next);
                        },
                    }

                    if show_loading {
                        div { class: "loading-state", "Loading runtime data..." }
                    } else if has_payload {
                        HeatmapPanel {
                            payload,
                            range,
                            visible,
                            theme,
                            export_request,
                        }
                    } else if error().is_none() {
                        div { class: "loading-state", "No data available" }
                    }
                }
            }

            footer { class: "footer", "Runtime heatmap" }
        }
    }
}

/// The signals a payload load writes to.
#[derive(Clone, Copy)]
struct Feed {
    payload: Signal<Option<Payload>>,
    visible: Signal<VisibilitySet>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
}

impl Feed {
    async fn refresh(mut self) {
        self.loading.set(true);
        self.error.set(None);

        match source::load_payload(config::current()).await {
            Ok(next) => {
                let meta_changed = self
                    .payload
                    .peek()
                    .as_ref()
                    .map_or(true, |current| current.meta != next.meta);
                if meta_changed {
                    self.visible.set(VisibilitySet::from_metadata(&next.meta));
                }
                self.payload.set(Some(next));
            }
            Err(err) => {
                warn!(error = %err, "failed to load runtime data");
                self.error.set(Some(err.to_string()));
            }
        }

        self.loading.set(false);
    }
}

fn apply_body_class(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            body.set_class_name(theme.css_class());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = theme;
    }
}
