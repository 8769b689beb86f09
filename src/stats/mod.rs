//! Statistics and metric trait implementations

pub mod sample_log;

pub use sample_log::{SampleLogSummary, TimeSummary};
