//! Settings module.

use super::parameters::Parameters;

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Number of independent replicates to simulate.
    pub replicates: usize,

    /// Number of generations simulated in every replicate.
    pub generations: usize,

    /// Record a measurement every `sample_interval` generations.
    #[serde(default = "default_sample_interval")]
    pub sample_interval: usize,

    /// Base seed; replicate `r` uses `seed + r`.
    #[serde(default)]
    pub seed: Option<u64>,

    pub parameters: Parameters,
}

fn default_sample_interval() -> usize {
    1
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", String::from_utf8_lossy(&output))
    }
}

impl Settings {
    /// Whether `generation` is a sampled time step.
    ///
    /// Generation 0 and every `sample_interval`-th generation after it are
    /// sampled, as is the final generation. An interval of 0 samples only the
    /// first and the final generation.
    pub fn is_sampled(&self, generation: usize) -> bool {
        if generation == 0 || generation == self.generations {
            return true;
        }
        self.sample_interval > 0 && generation % self.sample_interval == 0
    }

    /// Number of records a single replicate produces.
    pub fn samples_per_replicate(&self) -> usize {
        match (self.generations, self.sample_interval) {
            (0, _) => 1,
            (_, 0) => 2,
            (generations, interval) => {
                generations / interval + 1 + usize::from(generations % interval != 0)
            }
        }
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(generations: usize, sample_interval: usize) -> Settings {
        Settings {
            replicates: 2,
            generations,
            sample_interval,
            seed: Some(7),
            parameters: Parameters {
                population_size: 100,
                initial_frequency: 0.1,
                sex_ratio: 0.5,
                selection_coefficient: 0.05,
            },
        }
    }

    #[test]
    fn read_write() {
        let settings = settings(10, 5);
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn read_write_file() {
        let path = std::env::temp_dir().join("alleletrace_settings_read_write.yaml");
        let path = path.to_str().unwrap();
        let settings = settings(3, 1);
        settings.write_to_file(path).unwrap();
        assert_eq!(Settings::read_from_file(path).unwrap(), settings);
    }

    #[test]
    fn read_missing_file() {
        let result = Settings::read_from_file("/nonexistent/alleletrace/settings.yaml");
        assert!(matches!(result, Err(SettingsError::IoError(_))));
    }

    #[test]
    fn sampled_generations() {
        let settings = settings(10, 4);
        let sampled: Vec<usize> = (0..=10).filter(|&g| settings.is_sampled(g)).collect();
        assert_eq!(sampled, vec![0, 4, 8, 10]);
        assert_eq!(settings.samples_per_replicate(), 4);
    }

    #[test]
    fn samples_per_replicate_matches_sampled_generations() {
        for generations in 0..12 {
            for sample_interval in 0..5 {
                let settings = settings(generations, sample_interval);
                let sampled = (0..=generations)
                    .filter(|&g| settings.is_sampled(g))
                    .count();
                assert_eq!(settings.samples_per_replicate(), sampled);
            }
        }
    }

    #[test]
    fn sample_only_endpoints() {
        let settings = settings(10, 0);
        let sampled: Vec<usize> = (0..=10).filter(|&g| settings.is_sampled(g)).collect();
        assert_eq!(sampled, vec![0, 10]);
    }
}
