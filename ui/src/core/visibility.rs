//! Category visibility filter. An empty set means "no filter".

use std::collections::BTreeSet;

use serde::Serialize;

use super::dataset::{CategoryMetadata, SourceValue};

/// Snapshot of the enabled category values. The shell replaces it wholesale on
/// every toggle; the chart assembler only ever borrows it for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisibilitySet(BTreeSet<SourceValue>);

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every category the metadata can match, which is how the shell starts
    /// out once metadata arrives.
    pub fn from_metadata(meta: &CategoryMetadata) -> Self {
        meta.sources.iter().filter_map(|entry| entry.key()).collect()
    }

    pub fn contains(&self, value: SourceValue) -> bool {
        self.0.contains(&value)
    }

    /// Whether a cell with `value` passes the filter.
    pub fn admits(&self, value: SourceValue) -> bool {
        self.0.is_empty() || self.0.contains(&value)
    }

    pub fn insert(&mut self, value: SourceValue) -> bool {
        self.0.insert(value)
    }

    pub fn remove(&mut self, value: SourceValue) -> bool {
        self.0.remove(&value)
    }

    pub fn toggle(&mut self, value: SourceValue) {
        if !self.0.remove(&value) {
            self.0.insert(value);
        }
    }

    pub fn toggled(&self, value: SourceValue) -> Self {
        let mut next = self.clone();
        next.toggle(value);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SourceValue> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<SourceValue> for VisibilitySet {
    fn from_iter<I: IntoIterator<Item = SourceValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::CategoryEntry;

    fn value(raw: f64) -> SourceValue {
        SourceValue::new(raw).unwrap()
    }

    #[test]
    fn empty_set_admits_everything() {
        let set = VisibilitySet::new();
        assert!(set.admits(value(1.0)));
        assert!(!set.contains(value(1.0)));
    }

    #[test]
    fn from_metadata_enables_matchable_categories() {
        let meta = CategoryMetadata::new(vec![
            CategoryEntry::new(1.0, "grid"),
            CategoryEntry::new("2", "battery"),
            CategoryEntry::new("wind", "wind"),
        ]);
        let set = VisibilitySet::from_metadata(&meta);
        assert_eq!(set.len(), 2);
        assert!(set.contains(value(2.0)));
    }

    #[test]
    fn toggled_leaves_the_original_untouched() {
        let original: VisibilitySet = [value(1.0), value(2.0)].into_iter().collect();
        let next = original.toggled(value(1.0));
        assert!(original.contains(value(1.0)));
        assert!(!next.contains(value(1.0)));
        assert!(next.toggled(value(1.0)).contains(value(1.0)));
    }
}
