use std::io::Write;

use crate::errors::{AlleleTraceError, Result};
use crate::stats::TimeSummary;

/// Write per-time summaries as CSV with a header row.
pub fn write_summaries(summaries: &[TimeSummary], writer: &mut dyn Write) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(TimeSummary::HEADER)
        .map_err(|err| AlleleTraceError::WriteError(format!("Failed to write header: {err}")))?;
    for summary in summaries {
        csv_writer.serialize(summary).map_err(|err| {
            AlleleTraceError::WriteError(format!(
                "Failed to write summary for time {}: {err}",
                summary.time
            ))
        })?;
    }
    csv_writer
        .flush()
        .map_err(|err| AlleleTraceError::WriteError(format!("Failed to flush: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write() {
        let summaries = vec![TimeSummary {
            time: 5,
            replicates: 2,
            mean_frequency: 0.5,
            mean_frequency_males: 0.25,
            mean_frequency_females: 0.75,
            mean_population_size: 10.,
        }];
        let mut buffer = Vec::new();
        write_summaries(&summaries, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "time,replicates,mean_frequency,mean_frequency_males,mean_frequency_females,mean_population_size\n\
             5,2,0.5,0.25,0.75,10.0\n"
        );
    }

    #[test]
    fn write_empty() {
        let mut buffer = Vec::new();
        write_summaries(&[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "time,replicates,mean_frequency,mean_frequency_males,mean_frequency_females,mean_population_size\n"
        );
    }
}
