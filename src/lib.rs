// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod gauge;
pub mod generate;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::config::RadarConfig;
pub use crate::gauge::GaugeReading;
pub use crate::notify::RunSummary;
pub use crate::pipeline::{run_once, run_once_at, RunReport};
