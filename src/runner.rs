use anyhow::Result;

use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::io;

use crate::args::Args;
use crate::config::Settings;
use crate::core::SampleLog;
use crate::readwrite::{SampleLogIO, write_summaries};
use crate::simulation::run_replicate;
use crate::stats::SampleLogSummary;

pub struct Runner {
    args: Args,
    settings: Settings,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);
        #[cfg(feature = "parallel")]
        Self::setup_rayon(&args);

        let settings = Self::load_settings(&args.settings)?;
        settings.parameters.validate()?;

        if Self::threads_ignored(&args) {
            log::warn!("Ignoring --threads, replicates are simulated sequentially.");
            eprintln!("Ignoring --threads without the parallel feature.");
        }

        Ok(Self { args, settings })
    }

    /// Whether `--threads` was given to a build that can not use it.
    fn threads_ignored(args: &Args) -> bool {
        cfg!(not(feature = "parallel")) && args.threads.is_some()
    }

    pub fn from_settings(args: Args, settings: Settings) -> Result<Runner> {
        settings.parameters.validate()?;
        Ok(Self { args, settings })
    }

    pub fn start(&self) -> Result<()> {
        let log = self.run()?;
        self.finish(&log)
    }

    fn finish(&self, log: &SampleLog) -> Result<()> {
        log::info!("Storing {} records to {}...", log.len(), self.args.output);
        log.write_to_file(&self.args.output)?;

        if let Some(summary_file) = &self.args.summary {
            log::info!("Storing summary to {}...", summary_file);
            let file = fs::File::create(summary_file)?;
            let mut writer = io::BufWriter::new(file);
            write_summaries(&log.summarize(), &mut writer)?;
        }
        log::info!("Finished storing output.");
        Ok(())
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Setup rayon thread pool
    #[cfg(feature = "parallel")]
    fn setup_rayon(args: &Args) {
        if let Some(n_threads) = args.threads {
            println!("Setting number of threads to {}.", n_threads);
            rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build_global()
                .unwrap_or_else(|_| {
                    eprintln!("Unable to set number of threads.");
                    std::process::exit(1);
                });
        }
    }

    /// Load settings from file
    fn load_settings(path: &str) -> Result<Settings> {
        let settings: Settings = Settings::read_from_file(path)?;
        log::info!("Loaded settings\n{}", settings);
        Ok(settings)
    }

    /// Reserve a log for all records of the run, reporting sizes that can not
    /// be allocated as `AllocationFailure`.
    fn reserve_log(&self) -> crate::errors::Result<SampleLog> {
        let capacity = self
            .settings
            .replicates
            .saturating_mul(self.settings.samples_per_replicate());
        SampleLog::try_with_capacity(capacity)
    }

    fn progress_bar(&self) -> Result<Option<ProgressBar>> {
        if self.args.disable_progress_bar {
            return Ok(None);
        }
        let bar = ProgressBar::new(self.settings.replicates as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}")?
                .progress_chars("=> "),
        );
        Ok(Some(bar))
    }

    /// Simulate every replicate into its own log and merge them in replicate
    /// order once all workers are done.
    #[cfg(feature = "parallel")]
    pub fn run(&self) -> Result<SampleLog> {
        let mut log = self.reserve_log()?;
        let bar = self.progress_bar()?;
        let samples_per_replicate = self.settings.samples_per_replicate();

        log::info!(
            "Simulating {} replicates in parallel...",
            self.settings.replicates
        );
        let logs: Vec<SampleLog> = (0..self.settings.replicates)
            .into_par_iter()
            .map(|replicate| {
                let mut log = SampleLog::try_with_capacity(samples_per_replicate)?;
                run_replicate(replicate, &self.settings, &mut log)?;
                if let Some(bar) = bar.as_ref() {
                    bar.inc(1);
                }
                Ok(log)
            })
            .collect::<crate::errors::Result<Vec<SampleLog>>>()?;
        log.extend(logs.into_iter().flatten());

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation with {} records.", log.len());
        Ok(log)
    }

    /// Simulate replicates one after another into a single log.
    #[cfg(not(feature = "parallel"))]
    pub fn run(&self) -> Result<SampleLog> {
        let mut log = self.reserve_log()?;
        let bar = self.progress_bar()?;

        for replicate in 0..self.settings.replicates {
            log::debug!("Simulating replicate {replicate}...");
            run_replicate(replicate, &self.settings, &mut log)?;

            if let Some(bar) = bar.as_ref() {
                bar.set_position(replicate as u64 + 1);
                bar.set_message(format!("replicate={replicate}"));
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation with {} records.", log.len());
        Ok(log)
    }
}
