//! Sample log
//!
//! The sample log is an append-only collection of `MeasurementRecord`s, one per
//! replicate and sampled time step. Records keep the order in which they were
//! appended and can not be removed or changed once stored. Positional reads are
//! bounds checked and hand out copies.
//!
//! The log carries no synchronization. Parallel producers each fill their own
//! log and combine them with [`SampleLog::merge`] once all of them are done.
//!

use crate::core::record::MeasurementRecord;
use crate::errors::{AlleleTraceError, Result};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleLog {
    records: Vec<MeasurementRecord>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self { records: vec![] }
    }

    /// Create a log with room for `capacity` records, reporting a failure to
    /// reserve the memory as `AllocationFailure`.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut records = Vec::new();
        records.try_reserve_exact(capacity)?;
        Ok(Self { records })
    }

    /// Concatenate logs in the order they are given.
    pub fn merge<I: IntoIterator<Item = SampleLog>>(logs: I) -> Self {
        let mut merged = Self::new();
        for log in logs {
            merged.records.extend(log.records);
        }
        merged
    }

    /// Append a measurement to the end of the log.
    ///
    /// Running out of memory while growing the log aborts the process. Use
    /// [`SampleLog::try_append`] to receive the allocation failure instead.
    pub fn append(
        &mut self,
        replicate: usize,
        time: usize,
        frequencies: [f64; 3],
        population_size: usize,
        num_males: usize,
        num_females: usize,
    ) {
        self.push(MeasurementRecord::new(
            replicate,
            time,
            frequencies,
            population_size,
            num_males,
            num_females,
        ));
    }

    /// Append a measurement, reporting a failure to grow the log as
    /// `AllocationFailure`. The log is left unchanged on failure.
    pub fn try_append(
        &mut self,
        replicate: usize,
        time: usize,
        frequencies: [f64; 3],
        population_size: usize,
        num_males: usize,
        num_females: usize,
    ) -> Result<()> {
        self.records.try_reserve(1)?;
        self.append(
            replicate,
            time,
            frequencies,
            population_size,
            num_males,
            num_females,
        );
        Ok(())
    }

    pub fn push(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of all records in insertion order.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRecord> {
        self.records.iter()
    }

    /// Copy of the record at `index`.
    pub fn get(&self, index: usize) -> Result<MeasurementRecord> {
        self.records
            .get(index)
            .copied()
            .ok_or(AlleleTraceError::OutOfRange {
                index,
                size: self.records.len(),
            })
    }
}

impl<'a> IntoIterator for &'a SampleLog {
    type Item = &'a MeasurementRecord;
    type IntoIter = std::slice::Iter<'a, MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for SampleLog {
    type Item = MeasurementRecord;
    type IntoIter = std::vec::IntoIter<MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl Extend<MeasurementRecord> for SampleLog {
    fn extend<T: IntoIterator<Item = MeasurementRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl FromIterator<MeasurementRecord> for SampleLog {
    fn from_iter<T: IntoIterator<Item = MeasurementRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
