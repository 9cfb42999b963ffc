mod commands;
mod input_output;
mod logging;
mod report_format;
mod tokenizer_selector;

use clap::Parser;
use commands::Commands;

/// imbalance: predict mixture-of-experts routing imbalance for text batches.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
