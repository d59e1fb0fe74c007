//! Piecewise color legend derived from category metadata.

use serde::Serialize;

use crate::core::dataset::{CategoryLookup, SourceValue};

pub const FALLBACK_COLOR: &str = "#999";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendPiece {
    pub value: SourceValue,
    pub label: String,
    pub color: String,
}

/// One piece per category, ascending by value. The lookup already holds one
/// entry per value (last duplicate wins) and iterates in key order.
pub fn legend_pieces(lookup: &CategoryLookup) -> Vec<LegendPiece> {
    lookup
        .iter()
        .map(|(value, entry)| LegendPiece {
            value,
            label: entry.label(),
            color: entry.color().unwrap_or(FALLBACK_COLOR).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::{CategoryEntry, CategoryMetadata};

    #[test]
    fn pieces_sort_by_value_whatever_the_input_order() {
        let meta = CategoryMetadata::new(vec![
            CategoryEntry::new(10.0, "ten").with_color("#a00"),
            CategoryEntry::new("2", "two"),
            CategoryEntry::new(-1.0, "minus").with_display_name("Minus one"),
        ]);
        let pieces = legend_pieces(&meta.lookup());
        let values: Vec<f64> = pieces.iter().map(|p| p.value.get()).collect();
        assert_eq!(values, vec![-1.0, 2.0, 10.0]);
        assert_eq!(pieces[0].label, "Minus one");
        assert_eq!(pieces[1].color, FALLBACK_COLOR);
        assert_eq!(pieces[2].color, "#a00");
    }

    #[test]
    fn identical_metadata_gives_identical_pieces() {
        let meta = CategoryMetadata::new(vec![
            CategoryEntry::new(3.0, "c"),
            CategoryEntry::new(1.0, "a"),
        ]);
        assert_eq!(legend_pieces(&meta.lookup()), legend_pieces(&meta.lookup()));
    }
}
