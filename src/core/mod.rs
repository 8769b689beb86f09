//! This module contains the core datatypes of the library.

pub mod record;
pub mod sample_log;

pub use record::MeasurementRecord;
pub use sample_log::SampleLog;
