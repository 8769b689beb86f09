use anyhow::Result;
use clap::Parser;

use alleletrace::args::Args;
use alleletrace::runner::Runner;

fn main() -> Result<()> {
    let args = Args::parse();
    let runner = Runner::new(args)?;
    runner.start()
}
