//! # HuggingFace `tokenizers` Backend

use std::{path::Path, sync::Arc};

use ::tokenizers::tokenizer::Tokenizer;

use crate::{
    errors::{ImbalanceResult, TokenizerError},
    tokenizers::TextTokenizer,
};

/// [`TextTokenizer`] implementation for [`Tokenizer`].
///
/// Encodes with `add_special_tokens = false`.
pub struct HfTokenizer {
    name: String,
    inner: Arc<Tokenizer>,
}

impl HfTokenizer {
    /// Wrap an already loaded tokenizer.
    pub fn new(
        name: impl Into<String>,
        inner: Arc<Tokenizer>,
    ) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Load a serialized `tokenizer.json`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImbalanceResult<Self> {
        let path = path.as_ref();
        let name = format!("hf-file::{}", path.display());
        let tok = Tokenizer::from_file(path).map_err(|e| TokenizerError::new(name.clone(), e))?;
        log::info!("loaded tokenizer from {}", path.display());
        Ok(Self::new(name, Arc::new(tok)))
    }

    /// Fetch a tokenizer from the hub by model id.
    #[cfg(feature = "hf-hub")]
    pub fn from_pretrained(model_id: &str) -> ImbalanceResult<Self> {
        let name = format!("hf::{model_id}");
        let tok = Tokenizer::from_pretrained(model_id, None)
            .map_err(|e| TokenizerError::new(name.clone(), e))?;
        log::info!("loaded tokenizer for {model_id}");
        Ok(Self::new(name, Arc::new(tok)))
    }
}

impl TextTokenizer<u32> for HfTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> Result<Vec<u32>, TokenizerError> {
        self.inner
            .encode(text, false)
            .map(|encoding| encoding.get_ids().to_vec())
            .map_err(|e| TokenizerError::new(self.name.clone(), e))
    }
}
