//! Wire types for the runtime payload: per-date records plus the category
//! metadata that names and colors each source value.
//!
//! Parsing is lenient. A missing `meta` or `data` block, a date whose entry
//! is not an array, or a record that is not an object degrades to "nothing
//! there" instead of failing the whole payload. Cell values stay as raw JSON
//! until the matrix builder coerces them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Canonical category key shared by matrix cells, metadata entries and the
/// visibility set. Always finite; `-0.0` is folded into `0.0`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct SourceValue(f64);

impl SourceValue {
    pub fn new(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        Some(Self(if raw == 0.0 { 0.0 } else { raw }))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Numbers and numeric strings coerce; anything else (null, bool, empty or
    /// garbage strings, arrays, objects) does not.
    pub fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_f64().and_then(Self::new),
            Value::String(text) => parse_numeric(text),
            _ => None,
        }
    }
}

impl PartialEq for SourceValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for SourceValue {}

impl Hash for SourceValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for SourceValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn parse_numeric(raw: &str) -> Option<SourceValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(SourceValue::new)
}

/// One time-of-day bucket for a date. `source_value` is kept verbatim; see
/// [`SourceValue::coerce`] for how it becomes a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub time: String,
    #[serde(rename = "rtsources")]
    pub source_value: Value,
}

impl Record {
    pub fn new(time: impl Into<String>, source_value: impl Into<Value>) -> Self {
        Self {
            time: time.into(),
            source_value: source_value.into(),
        }
    }

    /// Accepts `{ "time": "09:00", "rtsources": 3 }` (or `sourceValue`).
    /// Entries without a non-empty string `time` are not records.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let time = object.get("time")?.as_str()?;
        if time.is_empty() {
            return None;
        }
        let source_value = object
            .get("rtsources")
            .or_else(|| object.get("sourceValue"))
            .cloned()
            .unwrap_or(Value::Null);
        Some(Self::new(time, source_value))
    }
}

/// Sparse input keyed by calendar date. Keys iterate in ascending lexical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawDataset(BTreeMap<String, Vec<Record>>);

impl RawDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every record stored for `date`.
    pub fn insert(&mut self, date: impl Into<String>, records: Vec<Record>) {
        self.0.insert(date.into(), records);
    }

    pub fn push(&mut self, date: impl Into<String>, record: Record) {
        self.0.entry(date.into()).or_default().push(record);
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn records(&self, date: &str) -> &[Record] {
        self.0.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                debug!("runtime data block is not an object; treating as empty");
            }
            return Self::default();
        };

        let mut dataset = Self::default();
        for (date, entries) in object {
            let records = match entries.as_array() {
                Some(items) => {
                    let records: Vec<Record> =
                        items.iter().filter_map(Record::from_value).collect();
                    if records.len() != items.len() {
                        debug!(
                            date = date.as_str(),
                            dropped = items.len() - records.len(),
                            "skipped malformed runtime records"
                        );
                    }
                    records
                }
                None => Vec::new(),
            };
            dataset.insert(date.clone(), records);
        }
        dataset
    }
}

impl FromIterator<(String, Vec<Record>)> for RawDataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Record>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for RawDataset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Identifier carried by a metadata entry. Payloads use both `3` and `"3"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Number(f64),
    Text(String),
}

impl CategoryValue {
    /// Numeric key used to match cells; `None` for non-numeric text.
    pub fn key(&self) -> Option<SourceValue> {
        match self {
            Self::Number(number) => SourceValue::new(*number),
            Self::Text(text) => parse_numeric(text),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => match SourceValue::new(*number) {
                Some(value) => value.fmt(f),
                None => write!(f, "{number}"),
            },
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for CategoryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub value: CategoryValue,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryEntry {
    pub fn new(value: impl Into<CategoryValue>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            display_name: None,
            color: None,
            description: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reads one `meta.sources` item field by field. Only `value` is required;
    /// any other field that is missing or not a string is treated as absent.
    /// `displayName` wins over `display`, `description` over `desc`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let category = match object.get("value")? {
            Value::Number(number) => CategoryValue::Number(number.as_f64()?),
            Value::String(text) => CategoryValue::Text(text.clone()),
            _ => return None,
        };
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| object.get(*key).and_then(Value::as_str))
                .map(str::to_string)
        };
        Some(Self {
            value: category,
            name: text(&["name"]).unwrap_or_default(),
            display_name: text(&["displayName", "display"]),
            color: text(&["color"]),
            description: text(&["description", "desc"]),
        })
    }

    pub fn key(&self) -> Option<SourceValue> {
        self.value.key()
    }

    /// Display name, then name, then the raw value. Blank strings fall through.
    pub fn label(&self) -> String {
        non_blank(self.display_name.as_deref())
            .or_else(|| non_blank(Some(self.name.as_str())))
            .map(str::to_string)
            .unwrap_or_else(|| self.value.to_string())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(self.color.as_deref())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.is_empty())
}

/// Ordered category entries, as delivered under `meta.sources`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryMetadata {
    pub sources: Vec<CategoryEntry>,
}

impl CategoryMetadata {
    pub fn new(sources: Vec<CategoryEntry>) -> Self {
        Self { sources }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Value → entry map. Later entries replace earlier ones with the same key;
    /// entries whose value is not numeric cannot match a cell and are left out.
    pub fn lookup(&self) -> CategoryLookup {
        let mut entries = BTreeMap::new();
        for entry in &self.sources {
            match entry.key() {
                Some(key) => {
                    entries.insert(key, entry.clone());
                }
                None => debug!(value = %entry.value, "category value is not numeric"),
            }
        }
        CategoryLookup { entries }
    }

    pub fn from_value(value: &Value) -> Self {
        let sources = value
            .get("sources")
            .and_then(Value::as_array)
            .map(|items| {
                let sources: Vec<CategoryEntry> =
                    items.iter().filter_map(CategoryEntry::from_value).collect();
                if sources.len() != items.len() {
                    debug!(
                        dropped = items.len() - sources.len(),
                        "skipped category entries without a value"
                    );
                }
                sources
            })
            .unwrap_or_default();
        Self { sources }
    }
}

impl<'de> Deserialize<'de> for CategoryMetadata {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Resolved value → entry table, iterated in ascending value order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLookup {
    entries: BTreeMap<SourceValue, CategoryEntry>,
}

impl CategoryLookup {
    pub fn get(&self, value: SourceValue) -> Option<&CategoryEntry> {
        self.entries.get(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceValue, &CategoryEntry)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetched document: `{ meta: { sources: [...] }, data: { date: [records] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload {
    pub meta: CategoryMetadata,
    pub data: RawDataset,
}

impl Payload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let meta = value
            .get("meta")
            .map(CategoryMetadata::from_value)
            .unwrap_or_default();
        let data = value
            .get("data")
            .map(RawDataset::from_value)
            .unwrap_or_default();
        Self { meta, data }
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(SourceValue::coerce(&json!(3)).map(SourceValue::get), Some(3.0));
        assert_eq!(SourceValue::coerce(&json!(" 2.5 ")).map(SourceValue::get), Some(2.5));
        assert_eq!(SourceValue::coerce(&json!(-0.0)).map(SourceValue::get), Some(0.0));
        assert!(SourceValue::coerce(&json!(null)).is_none());
        assert!(SourceValue::coerce(&json!("")).is_none());
        assert!(SourceValue::coerce(&json!("solar")).is_none());
        assert!(SourceValue::coerce(&json!("NaN")).is_none());
        assert!(SourceValue::coerce(&json!(true)).is_none());
        assert!(SourceValue::coerce(&json!([1])).is_none());
    }

    #[test]
    fn integral_values_display_without_fraction() {
        assert_eq!(SourceValue::new(4.0).unwrap().to_string(), "4");
        assert_eq!(SourceValue::new(4.5).unwrap().to_string(), "4.5");
        assert_eq!(CategoryValue::Number(7.0).to_string(), "7");
    }

    #[test]
    fn payload_tolerates_missing_blocks() {
        let payload = Payload::from_value(&json!({}));
        assert!(payload.meta.is_empty());
        assert!(payload.data.is_empty());

        let payload = Payload::from_value(&json!({ "meta": null, "data": 12 }));
        assert!(payload.meta.is_empty());
        assert!(payload.data.is_empty());
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let payload: Payload = serde_json::from_value(json!({
            "data": {
                "2024-01-01": [
                    { "time": "09:00", "rtsources": 1 },
                    null,
                    42,
                    { "rtsources": 2 },
                    { "time": "", "rtsources": 3 },
                    { "time": "10:00", "sourceValue": "4" }
                ],
                "2024-01-02": "not-an-array"
            }
        }))
        .unwrap();

        let records = payload.data.records("2024-01-01");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("09:00", 1));
        assert_eq!(records[1], Record::new("10:00", "4"));
        assert!(payload.data.records("2024-01-02").is_empty());
        assert_eq!(payload.data.len(), 2);
    }

    #[test]
    fn metadata_accepts_short_field_names() {
        let meta = CategoryMetadata::from_value(&json!({
            "sources": [
                { "value": 1, "name": "grid", "display": "Grid", "color": "#123", "desc": "Mains" },
                { "value": "2", "name": "battery", "displayName": "Battery" },
                { "name": "no value" }
            ]
        }));

        assert_eq!(meta.sources.len(), 2);
        assert_eq!(meta.sources[0].label(), "Grid");
        assert_eq!(meta.sources[0].description(), Some("Mains"));
        assert_eq!(meta.sources[1].label(), "Battery");
        assert_eq!(meta.sources[1].key().map(SourceValue::get), Some(2.0));
    }

    #[test]
    fn malformed_fields_do_not_drop_the_category() {
        let meta = CategoryMetadata::from_value(&json!({
            "sources": [
                { "value": 1, "name": null, "color": "#f00" },
                { "value": 2, "name": "b", "display": "B", "displayName": "Bee" },
                { "value": 3, "name": "c", "color": 7, "desc": ["x"] },
                { "value": null, "name": "nothing" }
            ]
        }));

        assert_eq!(meta.sources.len(), 3);
        assert_eq!(meta.sources[0].label(), "1");
        assert_eq!(meta.sources[0].color(), Some("#f00"));
        assert_eq!(meta.sources[1].label(), "Bee");
        assert_eq!(meta.sources[2].label(), "c");
        assert_eq!(meta.sources[2].color(), None);
        assert_eq!(meta.sources[2].description(), None);

        let lookup = meta.lookup();
        let one = SourceValue::new(1.0).unwrap();
        assert_eq!(lookup.get(one).and_then(CategoryEntry::color), Some("#f00"));
    }

    #[test]
    fn label_falls_back_through_name_to_value() {
        let entry = CategoryEntry::new(3.0, "").with_display_name("");
        assert_eq!(entry.label(), "3");
        let entry = CategoryEntry::new(3.0, "solar");
        assert_eq!(entry.label(), "solar");
    }

    #[test]
    fn lookup_keeps_last_duplicate() {
        let meta = CategoryMetadata::new(vec![
            CategoryEntry::new(1.0, "first"),
            CategoryEntry::new("1", "second"),
            CategoryEntry::new("wind", "text-only"),
        ]);
        let lookup = meta.lookup();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(SourceValue::new(1.0).unwrap()).unwrap().name, "second");
    }
}
