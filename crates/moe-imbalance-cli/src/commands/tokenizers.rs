use moe_imbalance::tokenizers::list_selectors;

/// Args for the tokenizer listing command.
#[derive(clap::Args, Debug)]
pub struct TokenizersArgs {}

impl TokenizersArgs {
    /// Run the tokenizer listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        for name in list_selectors() {
            println!("{name}");
        }
        Ok(())
    }
}
