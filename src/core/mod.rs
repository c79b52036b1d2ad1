//! Core module - normalization, loading, and the dataset snapshot

pub mod cache;
pub mod dataset;
pub mod loader;
pub mod normalize;

pub use dataset::{DataQualityIssue, Dataset, GlobalHealth, MasterRecord, PartRef};
pub use loader::LoadError;
pub use normalize::normalize_supplier;
