//! IO traits for reading and writing sample logs and their summaries.

mod sample_log;
mod summary;

pub use sample_log::SampleLogIO;
pub use summary::write_summaries;
