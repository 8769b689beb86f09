//! Measurement record
//!
//! A `MeasurementRecord` is the state of a population at a single sampled time
//! step of a single replicate. Records are plain values: they are copied out of
//! a `SampleLog` and never mutated after construction.
//!

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    replicate: usize,
    time: usize,
    frequency: f64,
    frequency_males: f64,
    frequency_females: f64,
    population_size: usize,
    num_males: usize,
    num_females: usize,
}

impl MeasurementRecord {
    /// Column names of the serialized record.
    pub const HEADER: [&'static str; 8] = [
        "replicate",
        "time",
        "frequency",
        "frequency_males",
        "frequency_females",
        "population_size",
        "num_males",
        "num_females",
    ];

    /// Create a record from the frequency triple `[overall, males, females]`
    /// and the population counts.
    ///
    /// No validation is performed: frequencies are expected to lie in `[0, 1]`
    /// and `num_males + num_females == population_size` is up to the caller.
    pub fn new(
        replicate: usize,
        time: usize,
        frequencies: [f64; 3],
        population_size: usize,
        num_males: usize,
        num_females: usize,
    ) -> Self {
        let [frequency, frequency_males, frequency_females] = frequencies;
        Self {
            replicate,
            time,
            frequency,
            frequency_males,
            frequency_females,
            population_size,
            num_males,
            num_females,
        }
    }

    pub fn get_replicate(&self) -> usize {
        self.replicate
    }

    pub fn get_time(&self) -> usize {
        self.time
    }

    pub fn get_frequency(&self) -> f64 {
        self.frequency
    }

    pub fn get_frequency_males(&self) -> f64 {
        self.frequency_males
    }

    pub fn get_frequency_females(&self) -> f64 {
        self.frequency_females
    }

    /// Frequencies in the order they were passed to `new`.
    pub fn get_frequencies(&self) -> [f64; 3] {
        [self.frequency, self.frequency_males, self.frequency_females]
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_males(&self) -> usize {
        self.num_males
    }

    pub fn get_num_females(&self) -> usize {
        self.num_females
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeasurementRecord(replicate={},time={},frequency={},frequency_males={},frequency_females={},population_size={},num_males={},num_females={})",
            self.replicate,
            self.time,
            self.frequency,
            self.frequency_males,
            self.frequency_females,
            self.population_size,
            self.num_males,
            self.num_females
        )
    }
}
