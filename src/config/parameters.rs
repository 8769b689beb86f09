use serde::{Deserialize, Serialize};

use crate::errors::{AlleleTraceError, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// The number of organisms in every generation.
    pub population_size: usize,

    /// The frequency of the tracked allele in the founding generation.
    pub initial_frequency: f64,

    /// The probability that an offspring is male.
    #[serde(default = "default_sex_ratio")]
    pub sex_ratio: f64,

    /// The relative fitness advantage of carriers of the tracked allele.
    #[serde(default)]
    pub selection_coefficient: f64,
}

fn default_sex_ratio() -> f64 {
    0.5
}

#[derive(Debug)]
pub enum ParametersError {
    YamlError(serde_yaml::Error),
}

impl std::error::Error for ParametersError {}

impl std::fmt::Display for ParametersError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParametersError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", String::from_utf8_lossy(&output))
    }
}

impl Parameters {
    /// Check that the parameters describe a population that can be simulated.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AlleleTraceError::InitializationError(
                "population_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_frequency) {
            return Err(AlleleTraceError::InitializationError(format!(
                "initial_frequency must lie in [0, 1], got {}",
                self.initial_frequency
            )));
        }
        if !(0.0..=1.0).contains(&self.sex_ratio) {
            return Err(AlleleTraceError::InitializationError(format!(
                "sex_ratio must lie in [0, 1], got {}",
                self.sex_ratio
            )));
        }
        if self.selection_coefficient.is_nan() || self.selection_coefficient <= -1.0 {
            return Err(AlleleTraceError::InitializationError(format!(
                "selection_coefficient must be larger than -1, got {}",
                self.selection_coefficient
            )));
        }
        Ok(())
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::result::Result<(), ParametersError> {
        serde_yaml::to_writer(writer, self).map_err(ParametersError::YamlError)
    }

    pub fn read(
        reader: &mut dyn std::io::Read,
    ) -> std::result::Result<Parameters, ParametersError> {
        serde_yaml::from_reader(reader).map_err(ParametersError::YamlError)
    }
}
