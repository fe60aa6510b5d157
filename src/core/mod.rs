//! Core business logic abstractions

pub mod config;
pub mod log;
pub mod rate;
pub mod source;

// Re-export main types for cleaner imports
pub use rate::{Currency, RateRecord, Snapshot};
pub use source::PageSource;
