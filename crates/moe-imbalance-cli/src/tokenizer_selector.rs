use moe_imbalance::{
    ImbalancePredictor,
    PredictorOptions,
    tokenizers::{DEFAULT_HF_MODEL, TextTokenizer, TokenizerSelector},
};

/// Tokenizer selector arg group.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    /// Tokenizer to use; see `imbalance tokenizers`.
    #[arg(long, default_value_t = format!("hf::{DEFAULT_HF_MODEL}"))]
    tokenizer: String,

    /// Tokenize the samples of each input in parallel.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    parallel: bool,
}

impl TokenizerArgs {
    /// Parse the tokenizer selector.
    pub fn selector(&self) -> Result<TokenizerSelector, Box<dyn std::error::Error>> {
        Ok(self.tokenizer.parse()?)
    }

    /// Load the tokenizer and build a predictor around it.
    pub fn build_predictor(&self) -> Result<ImbalancePredictor, Box<dyn std::error::Error>> {
        let selector = self.selector()?;
        let tokenizer = selector.load()?;
        log::info!("using tokenizer {}", tokenizer.name());

        let options = PredictorOptions::default().with_parallel(self.parallel);
        Ok(ImbalancePredictor::with_options(tokenizer, options))
    }
}
