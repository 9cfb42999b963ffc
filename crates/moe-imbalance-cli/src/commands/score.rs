use std::io::Write;

use crate::{
    commands::for_each_input,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    report_format::{ReportFormat, write_report},
    tokenizer_selector::TokenizerArgs,
};

/// Args for the score command.
#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Include the metric breakdown.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    breakdown: bool,

    #[command(flatten)]
    logging: LogArgs,
}

impl ScoreArgs {
    /// Run the score command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init()?;

        let predictor = self.tokenizer.build_predictor()?;
        let mut writer = self.output.open_writer()?;

        let result = for_each_input(&self.input, &predictor, |label, predictor, samples| {
            let report = predictor.score_with_breakdown(samples.batch())?;
            write_report(&mut writer, label, &report, self.format, self.breakdown)?;
            Ok(())
        });
        writer.flush()?;
        result
    }
}
