use moe_imbalance::ImbalancePredictor;

use crate::input_output::{InputArgs, Samples, source_label};

mod metrics;
mod score;
mod tokenizers;

/// Subcommands for imbalance.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Score inputs for expected routing imbalance.
    Score(score::ScoreArgs),

    /// Print the token statistics of inputs.
    Metrics(metrics::MetricsArgs),

    /// List the available tokenizers.
    Tokenizers(tokenizers::TokenizersArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Score(cmd) => cmd.run(),
            Commands::Metrics(cmd) => cmd.run(),
            Commands::Tokenizers(cmd) => cmd.run(),
        }
    }
}

/// Run `handle` over every input; a failing input is logged and skipped.
///
/// Returns an error at the end if any input failed.
fn for_each_input<F>(
    inputs: &InputArgs,
    predictor: &ImbalancePredictor,
    mut handle: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnMut(&str, &ImbalancePredictor, &Samples) -> Result<(), Box<dyn std::error::Error>>,
{
    let sources = inputs.sources();
    let mut failed = 0;

    for source in &sources {
        let label = source_label(source);
        let result = inputs
            .read_samples(source)
            .and_then(|samples| handle(&label, predictor, &samples));

        if let Err(e) = result {
            log::error!("{label}: {e}");
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} inputs failed", sources.len()).into());
    }
    Ok(())
}
