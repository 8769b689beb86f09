use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, name = "alleletrace")]
pub struct Args {
    /// Path to settings (yaml file).
    #[clap(long)]
    pub settings: String,

    /// Path to sample log output (csv file).
    #[clap(long, short)]
    pub output: String,

    /// Path to per-generation summary output (csv file).
    #[clap(long)]
    pub summary: Option<String>,

    /// Path to log file.
    #[clap(long, default_value = "alleletrace.log")]
    pub log_file: String,

    /// Increase logging verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of threads used to simulate replicates.
    #[clap(long)]
    pub threads: Option<usize>,

    /// Disable the progress bar.
    #[clap(long)]
    pub disable_progress_bar: bool,
}
