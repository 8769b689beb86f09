//! Two-sex Wright-Fisher simulation
//!
//! Every generation consists of a fixed number of organisms, each either male
//! or female and either carrying the tracked allele or not. Offspring draw
//! their sex independently and inherit the allele from the pooled parental
//! frequency after selection. A population that lacks one of the sexes can
//! not reproduce and is empty from the next generation on.
//!
//! The simulation is the producer of the `SampleLog`: at every sampled time
//! step it appends exactly one record for its replicate.
//!

use rand::prelude::*;
use rand_distr::Binomial;

use crate::config::{Parameters, Settings};
use crate::core::SampleLog;
use crate::errors::{AlleleTraceError, Result};

/// Composition of a single generation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Generation {
    pub num_males: usize,
    pub num_females: usize,
    pub carriers_males: usize,
    pub carriers_females: usize,
}

impl Generation {
    pub fn population_size(&self) -> usize {
        self.num_males + self.num_females
    }

    pub fn is_empty(&self) -> bool {
        self.population_size() == 0
    }

    pub fn can_reproduce(&self) -> bool {
        self.num_males > 0 && self.num_females > 0
    }

    /// Allele frequencies `[overall, males, females]`. The frequency of an
    /// empty group is 0.
    pub fn frequencies(&self) -> [f64; 3] {
        [
            frequency(
                self.carriers_males + self.carriers_females,
                self.population_size(),
            ),
            frequency(self.carriers_males, self.num_males),
            frequency(self.carriers_females, self.num_females),
        ]
    }
}

fn frequency(carriers: usize, size: usize) -> f64 {
    match size {
        0 => 0.,
        _ => carriers as f64 / size as f64,
    }
}

fn sample_binomial<R: Rng>(rng: &mut R, n: usize, p: f64) -> Result<usize> {
    let distribution = Binomial::new(n as u64, p).map_err(|err| {
        AlleleTraceError::ImplementationError(format!("Invalid binomial B({n}, {p}): {err}"))
    })?;
    Ok(distribution.sample(rng) as usize)
}

pub struct Simulation {
    replicate: usize,
    generation: usize,
    parameters: Parameters,
    state: Generation,
    rng: StdRng,
}

impl Simulation {
    /// Create a replicate and sample its founding generation.
    pub fn new(replicate: usize, parameters: Parameters, mut rng: StdRng) -> Result<Self> {
        parameters.validate()?;
        log::debug!("Creating replicate {replicate} with parameters\n{parameters}");
        let state = Self::sample_generation(
            &mut rng,
            &parameters,
            parameters.initial_frequency,
        )?;
        Ok(Self {
            replicate,
            generation: 0,
            parameters,
            state,
            rng,
        })
    }

    /// Create a replicate seeded from `seed + replicate`, or from the operating
    /// system when no seed is given.
    pub fn from_seed(replicate: usize, parameters: Parameters, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(replicate as u64)),
            None => StdRng::from_os_rng(),
        };
        Self::new(replicate, parameters, rng)
    }

    pub fn get_replicate(&self) -> usize {
        self.replicate
    }

    pub fn get_generation(&self) -> usize {
        self.generation
    }

    pub fn get_state(&self) -> &Generation {
        &self.state
    }

    /// Frequency of the allele in the parental pool after selection.
    fn parental_frequency(&self) -> f64 {
        let [_, frequency_males, frequency_females] = self.state.frequencies();
        let frequency = (frequency_males + frequency_females) / 2.;
        let fitness = 1. + self.parameters.selection_coefficient;
        (frequency * fitness / (1. + frequency * self.parameters.selection_coefficient))
            .clamp(0., 1.)
    }

    fn sample_generation(
        rng: &mut StdRng,
        parameters: &Parameters,
        frequency: f64,
    ) -> Result<Generation> {
        let num_males = sample_binomial(rng, parameters.population_size, parameters.sex_ratio)?;
        let num_females = parameters.population_size - num_males;
        Ok(Generation {
            num_males,
            num_females,
            carriers_males: sample_binomial(rng, num_males, frequency)?,
            carriers_females: sample_binomial(rng, num_females, frequency)?,
        })
    }

    pub fn next_generation(&mut self) -> Result<()> {
        self.generation += 1;
        if !self.state.can_reproduce() {
            if !self.state.is_empty() {
                log::debug!(
                    "Replicate {} can not reproduce in generation {}.",
                    self.replicate,
                    self.generation
                );
            }
            self.state = Generation::default();
            return Ok(());
        }
        let frequency = self.parental_frequency();
        self.state = Self::sample_generation(&mut self.rng, &self.parameters, frequency)?;
        Ok(())
    }

    /// Append the current generation to `log`.
    pub fn record(&self, log: &mut SampleLog) {
        log.append(
            self.replicate,
            self.generation,
            self.state.frequencies(),
            self.state.population_size(),
            self.state.num_males,
            self.state.num_females,
        );
    }

    /// Simulate all generations of `settings` and record the sampled ones.
    pub fn run(&mut self, settings: &Settings, log: &mut SampleLog) -> Result<()> {
        for generation in 0..=settings.generations {
            if settings.is_sampled(generation) {
                self.record(log);
                log::debug!(
                    "replicate={} generation={} state={:?}",
                    self.replicate,
                    generation,
                    self.state
                );
            }

            // abort on last generation after sampling
            if generation == settings.generations {
                break;
            }

            self.next_generation()?;
        }
        Ok(())
    }
}

/// Simulate a single replicate of `settings` into `log`.
pub fn run_replicate(replicate: usize, settings: &Settings, log: &mut SampleLog) -> Result<()> {
    let mut simulation = Simulation::from_seed(replicate, settings.parameters.clone(), settings.seed)?;
    simulation.run(settings, log)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> Parameters {
        Parameters {
            population_size: 200,
            initial_frequency: 0.3,
            sex_ratio: 0.5,
            selection_coefficient: 0.,
        }
    }

    fn settings(generations: usize, sample_interval: usize) -> Settings {
        Settings {
            replicates: 1,
            generations,
            sample_interval,
            seed: Some(42),
            parameters: parameters(),
        }
    }

    #[test]
    fn generation_frequencies() {
        let generation = Generation {
            num_males: 4,
            num_females: 6,
            carriers_males: 1,
            carriers_females: 3,
        };
        assert_eq!(generation.population_size(), 10);
        assert_eq!(generation.frequencies(), [0.4, 0.25, 0.5]);
    }

    #[test]
    fn empty_generation_frequencies() {
        let generation = Generation::default();
        assert!(generation.is_empty());
        assert!(!generation.can_reproduce());
        assert_eq!(generation.frequencies(), [0., 0., 0.]);
    }

    #[test]
    fn founders() {
        let simulation = Simulation::from_seed(0, parameters(), Some(1)).unwrap();
        let state = simulation.get_state();
        assert_eq!(state.population_size(), 200);
        assert!(state.carriers_males <= state.num_males);
        assert!(state.carriers_females <= state.num_females);
        assert_eq!(simulation.get_generation(), 0);
    }

    #[test]
    fn invalid_parameters() {
        let parameters = Parameters {
            initial_frequency: 2.,
            ..parameters()
        };
        assert!(matches!(
            Simulation::from_seed(0, parameters, Some(1)),
            Err(AlleleTraceError::InitializationError(_))
        ));
    }

    #[test]
    fn fixation_is_absorbing() {
        let parameters = Parameters {
            initial_frequency: 1.,
            ..parameters()
        };
        let mut simulation = Simulation::from_seed(0, parameters, Some(3)).unwrap();
        for _ in 0..10 {
            simulation.next_generation().unwrap();
            let [frequency, _, _] = simulation.get_state().frequencies();
            assert_eq!(frequency, 1.);
        }
    }

    #[test]
    fn single_sex_population_dies_out() {
        let parameters = Parameters {
            sex_ratio: 1.,
            ..parameters()
        };
        let mut simulation = Simulation::from_seed(0, parameters, Some(3)).unwrap();
        assert_eq!(simulation.get_state().num_females, 0);
        simulation.next_generation().unwrap();
        assert!(simulation.get_state().is_empty());
        simulation.next_generation().unwrap();
        assert!(simulation.get_state().is_empty());
        assert_eq!(simulation.get_generation(), 2);
    }

    #[test]
    fn run_records_sampled_generations() {
        let settings = settings(10, 3);
        let mut log = SampleLog::new();
        run_replicate(5, &settings, &mut log).unwrap();

        let times: Vec<usize> = log.iter().map(|record| record.get_time()).collect();
        assert_eq!(times, vec![0, 3, 6, 9, 10]);
        for record in &log {
            assert_eq!(record.get_replicate(), 5);
            assert_eq!(
                record.get_num_males() + record.get_num_females(),
                record.get_population_size()
            );
            for frequency in record.get_frequencies() {
                assert!((0. ..=1.).contains(&frequency));
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let settings = settings(20, 1);
        let mut first = SampleLog::new();
        let mut second = SampleLog::new();
        run_replicate(2, &settings, &mut first).unwrap();
        run_replicate(2, &settings, &mut second).unwrap();
        assert_eq!(first, second);
    }
}
