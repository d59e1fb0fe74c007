//! Data pipeline and the platform plumbing around it.

pub mod config;
pub mod dataset;
pub mod error;
pub mod matrix;
pub mod platform;
pub mod range;
pub mod source;
pub mod storage;
pub mod visibility;

pub use dataset::{CategoryEntry, CategoryMetadata, Payload, RawDataset, Record, SourceValue};
pub use matrix::{build, DenseMatrix};
pub use range::DateRange;
pub use visibility::VisibilitySet;
