use itertools::Itertools;
use serde::Serialize;

use crate::core::{MeasurementRecord, SampleLog};

/// Averages over all records sharing a time step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSummary {
    pub time: usize,
    pub replicates: usize,
    pub mean_frequency: f64,
    pub mean_frequency_males: f64,
    pub mean_frequency_females: f64,
    pub mean_population_size: f64,
}

impl TimeSummary {
    /// Column names of the serialized summary.
    pub const HEADER: [&'static str; 6] = [
        "time",
        "replicates",
        "mean_frequency",
        "mean_frequency_males",
        "mean_frequency_females",
        "mean_population_size",
    ];
}

/// Trait extension to summarize a log across replicates
pub trait SampleLogSummary {
    fn summarize(&self) -> Vec<TimeSummary>;
}

impl SampleLogSummary for SampleLog {
    /// Group records by time step in ascending order and average each field
    /// over the records of that time step.
    fn summarize(&self) -> Vec<TimeSummary> {
        self.iter()
            .into_group_map_by(|record| record.get_time())
            .into_iter()
            .sorted_by_key(|(time, _)| *time)
            .map(|(time, records)| summarize_time(time, &records))
            .collect()
    }
}

fn summarize_time(time: usize, records: &[&MeasurementRecord]) -> TimeSummary {
    let n = records.len() as f64;
    let mean = |field: fn(&MeasurementRecord) -> f64| {
        records.iter().map(|record| field(record)).sum::<f64>() / n
    };
    TimeSummary {
        time,
        replicates: records.len(),
        mean_frequency: mean(MeasurementRecord::get_frequency),
        mean_frequency_males: mean(MeasurementRecord::get_frequency_males),
        mean_frequency_females: mean(MeasurementRecord::get_frequency_females),
        mean_population_size: mean(|record| record.get_population_size() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert!(SampleLog::new().summarize().is_empty());
    }

    #[test]
    fn summarize() {
        let mut log = SampleLog::new();
        log.append(0, 0, [0.2, 0.4, 0.0], 10, 5, 5);
        log.append(0, 5, [0.5, 0.5, 0.5], 10, 5, 5);
        log.append(1, 0, [0.4, 0.2, 0.6], 20, 10, 10);

        let summaries = log.summarize();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].time, 0);
        assert_eq!(summaries[0].replicates, 2);
        assert!((summaries[0].mean_frequency - 0.3).abs() < 1e-12);
        assert!((summaries[0].mean_frequency_males - 0.3).abs() < 1e-12);
        assert!((summaries[0].mean_frequency_females - 0.3).abs() < 1e-12);
        assert_eq!(summaries[0].mean_population_size, 15.);

        assert_eq!(summaries[1].time, 5);
        assert_eq!(summaries[1].replicates, 1);
        assert_eq!(summaries[1].mean_frequency, 0.5);
    }

    #[test]
    fn summarize_leaves_log_unchanged() {
        let mut log = SampleLog::new();
        log.append(1, 3, [0.1, 0.1, 0.1], 2, 1, 1);
        log.append(0, 1, [0.2, 0.2, 0.2], 2, 1, 1);
        let copy = log.clone();
        let summaries = log.summarize();
        assert_eq!(summaries[0].time, 1);
        assert_eq!(log, copy);
    }
}
