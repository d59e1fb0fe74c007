//! End-to-end checks over the public pipeline: payload → matrix → chart →
//! rendered markup.

use serde_json::json;

use ui::chart::{assemble, ChartOptions, Theme};
use ui::core::config::HeatmapConfig;
use ui::core::{build, DateRange, Payload, SourceValue, VisibilitySet};
use ui::render::{ChartRenderer, SvgRenderer};

const FIXTURE: &[u8] = include_bytes!("fixtures/runtime.json");

fn value(raw: f64) -> SourceValue {
    SourceValue::new(raw).unwrap()
}

fn triples(spec: &ui::chart::ChartSpec) -> Vec<(usize, usize, f64)> {
    spec.cells()
        .iter()
        .map(|c| (c.time_index, c.date_index, c.value.get()))
        .collect()
}

#[test]
fn fixture_builds_a_dense_sorted_matrix() {
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, None);

    assert_eq!(matrix.dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(matrix.times, ["09:00", "09:30", "10:00", "10:30"]);
    assert!(matrix.matrix.iter().all(|row| row.len() == 4));

    assert_eq!(matrix.cell(0, 0), Some(value(1.0)));
    assert_eq!(matrix.cell(0, 2), None);
    assert_eq!(matrix.cell(0, 3), None);
    assert_eq!(matrix.cell(1, 1), Some(value(3.0)));
    // duplicate time on the same date: last record wins
    assert_eq!(matrix.cell(2, 0), Some(value(2.0)));
    assert_eq!(matrix.non_null_count(), 4);
}

#[test]
fn metadata_drives_legend_and_tooltips() {
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, None);
    let spec = assemble(&matrix, &payload.meta, None, &ChartOptions::default());

    let legend: Vec<(f64, &str, &str)> = spec
        .legend()
        .iter()
        .map(|p| (p.value.get(), p.label.as_str(), p.color.as_str()))
        .collect();
    assert_eq!(
        legend,
        vec![
            (1.0, "Grid", "#1f77b4"),
            (2.0, "Battery", "#2ca02c"),
            (3.0, "generator", "#d62728"),
        ]
    );

    let generator = spec
        .cells()
        .iter()
        .copied()
        .find(|c| c.value == value(3.0))
        .unwrap();
    let tooltip = spec.tooltip(generator);
    assert_eq!(tooltip.title, "2024-01-02 09:30");
    assert_eq!(tooltip.source, "generator");
    assert_eq!(tooltip.description.as_deref(), Some("Backup generator"));
}

#[test]
fn toggling_a_category_hides_only_its_cells() {
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, None);

    let all = VisibilitySet::from_metadata(&payload.meta);
    assert_eq!(all.len(), 3);
    let spec = assemble(&matrix, &payload.meta, Some(&all), &ChartOptions::default());
    assert_eq!(
        triples(&spec),
        vec![(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0), (0, 2, 2.0)]
    );

    let without_battery = all.toggled(value(2.0));
    let spec = assemble(
        &matrix,
        &payload.meta,
        Some(&without_battery),
        &ChartOptions::default(),
    );
    assert_eq!(triples(&spec), vec![(0, 0, 1.0), (1, 1, 3.0)]);
    // the legend still lists every category
    assert_eq!(spec.legend().len(), 3);
}

#[test]
fn date_range_narrows_dates_and_times() {
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, Some(&DateRange::starting("2024-01-02")));

    assert_eq!(matrix.dates, ["2024-01-02", "2024-01-03"]);
    assert_eq!(matrix.times, ["09:00", "09:30"]);

    let ending = build(&payload.data, Some(&DateRange::ending("2024-01-01")));
    assert_eq!(ending.dates, ["2024-01-01"]);
}

#[test]
fn inline_payload_matches_the_documented_example() {
    let payload = Payload::from_value(&json!({
        "meta": { "sources": [{ "value": 1, "name": "grid" }, { "value": 2, "name": "battery" }] },
        "data": {
            "2024-01-02": [{ "time": "09:00", "rtsources": 2 }],
            "2024-01-01": [{ "time": "09:00", "rtsources": 1 }]
        }
    }));

    let matrix = build(&payload.data, None);
    assert_eq!(matrix.dates, ["2024-01-01", "2024-01-02"]);
    assert_eq!(matrix.times, ["09:00"]);

    let only_grid: VisibilitySet = [value(1.0)].into_iter().collect();
    let spec = assemble(&matrix, &payload.meta, Some(&only_grid), &ChartOptions::default());
    assert_eq!(triples(&spec), vec![(0, 0, 1.0)]);
}

#[test]
fn theme_changes_colors_but_not_content() {
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, None);
    let renderer = SvgRenderer::new(600, 350);

    let dark = assemble(&matrix, &payload.meta, None, &ChartOptions::default());
    let light = assemble(
        &matrix,
        &payload.meta,
        None,
        &ChartOptions::default().with_theme(Theme::Light),
    );
    assert_eq!(dark.cells(), light.cells());
    assert_eq!(dark.legend(), light.legend());

    let dark_svg = renderer.render_svg(&dark);
    let light_svg = renderer.render_svg(&light);
    assert_ne!(dark_svg, light_svg);
    assert_eq!(
        dark_svg.matches("<title>").count(),
        light_svg.matches("<title>").count()
    );
}

#[test]
fn config_overrides_reach_the_chart() {
    let config = HeatmapConfig::default().with_overrides(|key| match key {
        "RTHEATMAP_PROGRESSIVE_THRESHOLD" => Some("2".to_string()),
        "RTHEATMAP_CHUNK_SIZE" => Some("2".to_string()),
        _ => None,
    });
    let payload = Payload::from_slice(FIXTURE).unwrap();
    let matrix = build(&payload.data, None);
    let spec = assemble(
        &matrix,
        &payload.meta,
        None,
        &ChartOptions::from_config(&config, Theme::Dark),
    );

    assert!(spec.is_progressive());
    let svg = SvgRenderer::from_config(&config).render_svg(&spec);
    assert_eq!(svg.matches("<g class=\"heatmap-chunk\"").count(), 2);
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn desktop_source_reads_the_configured_file() {
    let config = HeatmapConfig {
        data_path: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/runtime.json").into(),
        ..HeatmapConfig::default()
    };
    let payload = futures::executor::block_on(ui::core::source::load_payload(&config)).unwrap();
    assert_eq!(payload.data.len(), 3);
    assert_eq!(payload.meta.sources.len(), 4);
}

#[test]
fn loosely_typed_metadata_still_colors_its_cells() {
    let payload = Payload::from_value(&json!({
        "meta": { "sources": [
            { "value": 1, "name": null, "color": "#f00" },
            { "value": 2, "name": "b", "display": "B", "displayName": "Bee", "color": "#0f0" },
            { "value": 3, "name": "c", "color": 7 }
        ] },
        "data": {
            "2024-01-01": [
                { "time": "09:00", "rtsources": 1 },
                { "time": "09:30", "rtsources": 2 },
                { "time": "10:00", "rtsources": 3 }
            ]
        }
    }));
    assert_eq!(payload.meta.sources.len(), 3);

    let matrix = build(&payload.data, None);
    let spec = assemble(&matrix, &payload.meta, None, &ChartOptions::default());

    let legend: Vec<(&str, &str)> = spec
        .legend()
        .iter()
        .map(|p| (p.label.as_str(), p.color.as_str()))
        .collect();
    assert_eq!(legend, vec![("1", "#f00"), ("Bee", "#0f0"), ("c", "#999")]);
    assert_eq!(spec.color_for(value(1.0)), "#f00");
    assert_eq!(spec.cells().len(), 3);
}
