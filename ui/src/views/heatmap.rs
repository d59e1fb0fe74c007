use dioxus::prelude::*;
use tracing::warn;

use crate::chart::spec::ToolboxAction;
use crate::chart::zoom::ZoomState;
use crate::chart::{assemble, Axis, ChartOptions, ChartSpec, Theme, ZoomWindow};
use crate::core::config;
use crate::core::dataset::Payload;
use crate::core::matrix::{build, DenseMatrix};
use crate::core::range::DateRange;
use crate::core::visibility::VisibilitySet;
use crate::render::{deliver_snapshot, ChartRenderer, SvgRenderer};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

/// The chart itself: rebuilds the matrix when data or range change, rebuilds
/// the chart description when categories or theme change, and redraws on
/// zoom. Each `export_request` bump captures a PNG of what is on screen.
#[component]
pub fn HeatmapPanel(
    payload: ReadOnlySignal<Option<Payload>>,
    range: ReadOnlySignal<DateRange>,
    visible: ReadOnlySignal<VisibilitySet>,
    theme: ReadOnlySignal<Theme>,
    export_request: ReadOnlySignal<u64>,
) -> Element {
    let renderer = SvgRenderer::from_config(config::current());

    let matrix = use_memo(move || {
        payload
            .read()
            .as_ref()
            .map(|p| build(&p.data, Some(&range.read())))
            .unwrap_or_default()
    });
    let chart = use_memo(move || {
        let options = ChartOptions::from_config(config::current(), theme());
        let meta = payload
            .read()
            .as_ref()
            .map(|p| p.meta.clone())
            .unwrap_or_default();
        assemble(&matrix.read(), &meta, Some(&visible.read()), &options)
    });

    let mut zoom = use_signal(ZoomState::default);
    let mut show_zoom = use_signal(|| false);
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let view = use_memo(move || {
        let mut spec = chart();
        spec.zoom = zoom();
        spec
    });

    let mut handled = use_signal(|| *export_request.peek());
    use_effect(move || {
        let request = export_request();
        if request > *handled.peek() {
            handled.set(request);
            start_export(view.peek().clone(), renderer, status, busy);
        }
    });

    let is_empty = payload.read().as_ref().map_or(true, |p| p.data.is_empty());
    if is_empty {
        return rsx! {
            div { class: "loading-state", "No data available" }
        };
    }

    let svg = renderer.render_svg(&view.read());
    let current = zoom();
    let toolbox = chart.read().toolbox.clone();
    let summary = summarize(&matrix.read(), &view.read());
    let height = renderer.height;

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("export-status", "Preparing PNG…".to_string())),
        ExportStatus::Done(message) => Some(("export-status export-status--success", message)),
        ExportStatus::Error(err) => Some(("export-status export-status--error", err)),
    };

    rsx! {
        div { class: "heatmap-panel",
            div { class: "heatmap-toolbox",
                span { class: "heatmap-summary", "{summary}" }
                for feature in toolbox.features {
                    button {
                        key: "{feature.title}",
                        r#type: "button",
                        class: "toolbox-btn",
                        disabled: feature.action == ToolboxAction::SaveAsImage && busy(),
                        onclick: move |_| match feature.action {
                            ToolboxAction::SaveAsImage => {
                                start_export(view.peek().clone(), renderer, status, busy);
                            }
                            ToolboxAction::Restore => zoom.set(ZoomState::default()),
                            ToolboxAction::DataZoom => show_zoom.toggle(),
                        },
                        "{feature.title}"
                    }
                }
            }

            if show_zoom() {
                div { class: "heatmap-zoom-controls",
                    ZoomSlider {
                        axis: Axis::X,
                        label: "Time",
                        window: current.x,
                        on_change: move |w: ZoomWindow| zoom.with_mut(|z| z.set(Axis::X, w)),
                    }
                    ZoomSlider {
                        axis: Axis::Y,
                        label: "Date",
                        window: current.y,
                        on_change: move |w: ZoomWindow| zoom.with_mut(|z| z.set(Axis::Y, w)),
                    }
                }
            }

            div {
                class: "heatmap-canvas",
                style: "height: {height}px",
                dangerous_inner_html: "{svg}",
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

#[component]
fn ZoomSlider(
    axis: Axis,
    label: &'static str,
    window: ZoomWindow,
    on_change: EventHandler<ZoomWindow>,
) -> Element {
    let axis_name = match axis {
        Axis::X => "x",
        Axis::Y => "y",
    };
    let start = window.start;
    let end = window.end;

    rsx! {
        fieldset { class: "zoom-slider zoom-slider--{axis_name}",
            legend { "{label}" }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                step: "1",
                value: "{start}",
                aria_label: "{label} window start",
                oninput: move |evt| {
                    if let Ok(next) = evt.value().parse::<f64>() {
                        on_change.call(ZoomWindow::clamped(next, end));
                    }
                },
            }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                step: "1",
                value: "{end}",
                aria_label: "{label} window end",
                oninput: move |evt| {
                    if let Ok(next) = evt.value().parse::<f64>() {
                        on_change.call(ZoomWindow::clamped(start, next));
                    }
                },
            }
        }
    }
}

fn summarize(matrix: &DenseMatrix, spec: &ChartSpec) -> String {
    let mode = if spec.is_progressive() { " · progressive" } else { "" };
    format!(
        "{} dates × {} time buckets · {} cells{mode}",
        matrix.dates.len(),
        matrix.times.len(),
        spec.cells().len()
    )
}

fn start_export(
    spec: ChartSpec,
    renderer: SvgRenderer,
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
) {
    if *busy.peek() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working);

    spawn(async move {
        let stem = &config::current().export_file_stem;
        let outcome = match renderer.request_snapshot(&spec) {
            Ok(image) => deliver_snapshot(&image, stem).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(Some(path)) => status.set(ExportStatus::Done(format!("Saved to {path}"))),
            Ok(None) => status.set(ExportStatus::Done("PNG download started".to_string())),
            Err(err) => {
                warn!(error = %err, "chart export failed");
                status.set(ExportStatus::Error(err.to_string()));
            }
        }
        busy.set(false);
    });
}
