//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod convert;
pub mod log;
pub mod rate;
pub mod source;

// Re-export main types for cleaner imports
pub use cache::SnapshotStore;
pub use convert::{Conversion, ConversionEngine, ConversionError, ConversionRequest};
pub use rate::{BaseCurrency, RateEntry, RateOrigin, RateTable, TableInfo};
pub use source::{RateSheet, RateSource};
