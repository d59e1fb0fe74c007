//! Hover content for a single heatmap cell.

use serde::Serialize;

use crate::core::dataset::CategoryLookup;

use super::spec::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    /// `"<date> <time>"`.
    pub title: String,
    /// Display label of the category, or the raw value when it has no entry.
    pub source: String,
    pub description: Option<String>,
}

impl Tooltip {
    pub fn resolve(
        dates: &[String],
        times: &[String],
        lookup: &CategoryLookup,
        cell: Cell,
    ) -> Self {
        let date = dates.get(cell.date_index).map(String::as_str).unwrap_or("");
        let time = times.get(cell.time_index).map(String::as_str).unwrap_or("");
        let entry = lookup.get(cell.value);

        Self {
            title: format!("{date} {time}").trim().to_string(),
            source: entry
                .map(|entry| entry.label())
                .unwrap_or_else(|| cell.value.to_string()),
            description: entry
                .and_then(|entry| entry.description())
                .map(str::to_string),
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![self.title.clone(), format!("source: {}", self.source)];
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        lines.join("\n")
    }

    pub fn to_html(&self) -> String {
        let mut parts = vec![
            format!("<b>{}</b>", escape_markup(&self.title)),
            format!("source: {}", escape_markup(&self.source)),
        ];
        if let Some(description) = &self.description {
            parts.push(format!(
                "<div style=\"font-size:12px;opacity:0.9\">{}</div>",
                escape_markup(description)
            ));
        }
        parts.join("<br/>")
    }
}

/// Escapes text for HTML and SVG content and attribute values.
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
