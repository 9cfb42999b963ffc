use std::io::Write;

use crate::{
    commands::for_each_input,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    report_format::{ReportFormat, write_metrics},
    tokenizer_selector::TokenizerArgs,
};

/// Args for the metrics command.
#[derive(clap::Args, Debug)]
pub struct MetricsArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    #[command(flatten)]
    logging: LogArgs,
}

impl MetricsArgs {
    /// Run the metrics command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init()?;

        let predictor = self.tokenizer.build_predictor()?;
        let mut writer = self.output.open_writer()?;

        let result = for_each_input(&self.input, &predictor, |label, predictor, samples| {
            let metrics = predictor.metrics(samples.batch())?;
            write_metrics(&mut writer, label, metrics.as_ref(), self.format)
        });
        writer.flush()?;
        result
    }
}
