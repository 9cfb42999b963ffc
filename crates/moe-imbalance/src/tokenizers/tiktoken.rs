//! # `tiktoken-rs` Backend

use std::{error::Error, sync::Arc};

use tiktoken_rs::{CoreBPE, Rank};

use crate::{
    errors::{ImbalanceError, ImbalanceResult, TokenizerError},
    tokenizers::TextTokenizer,
};

type LoadResult = Result<CoreBPE, Box<dyn Error + Send + Sync>>;

/// A named loader for one OpenAI BPE encoding.
struct EncodingHook {
    aliases: &'static [&'static str],
    load: fn() -> LoadResult,
}

const ENCODING_HOOKS: &[EncodingHook] = &[
    EncodingHook {
        aliases: &["r50k_base", "openai/r50k_base"],
        load: || Ok(tiktoken_rs::r50k_base()?),
    },
    EncodingHook {
        aliases: &["p50k_base", "openai/p50k_base"],
        load: || Ok(tiktoken_rs::p50k_base()?),
    },
    EncodingHook {
        aliases: &["p50k_edit", "openai/p50k_edit"],
        load: || Ok(tiktoken_rs::p50k_edit()?),
    },
    EncodingHook {
        aliases: &["cl100k_base", "openai/cl100k_base"],
        load: || Ok(tiktoken_rs::cl100k_base()?),
    },
    EncodingHook {
        aliases: &["o200k_base", "openai/o200k_base"],
        load: || Ok(tiktoken_rs::o200k_base()?),
    },
    EncodingHook {
        aliases: &["o200k_harmony", "openai/o200k_harmony"],
        load: || Ok(tiktoken_rs::o200k_harmony()?),
    },
];

/// List the available encodings.
///
/// ## Arguments
/// * `aliases` - Whether to include all aliases or just the primary names.
pub fn list_encodings(aliases: bool) -> Vec<String> {
    let mut names = Vec::new();
    for hook in ENCODING_HOOKS {
        if aliases {
            names.extend(hook.aliases.iter().map(|a| a.to_string()));
        } else {
            names.push(hook.aliases[0].to_string());
        }
    }
    names
}

/// [`TextTokenizer`] implementation for [`CoreBPE`].
///
/// Encodes with `encode_ordinary`; special-token text is treated as
/// ordinary text.
pub struct TiktokenTokenizer {
    name: String,
    inner: Arc<CoreBPE>,
}

impl TiktokenTokenizer {
    /// Wrap an already loaded encoding.
    pub fn new(
        name: impl Into<String>,
        inner: Arc<CoreBPE>,
    ) -> Self {
        Self {
            name: format!("tiktoken::{}", name.into()),
            inner,
        }
    }

    /// Load an encoding by name, e.g. `"cl100k_base"`.
    pub fn load(encoding: &str) -> ImbalanceResult<Self> {
        let hook = ENCODING_HOOKS
            .iter()
            .find(|hook| hook.aliases.contains(&encoding))
            .ok_or_else(|| {
                ImbalanceError::UnsupportedTokenizer(format!("unknown tiktoken encoding: {encoding}"))
            })?;

        let name = hook.aliases[0];
        let bpe = (hook.load)().map_err(|e| TokenizerError::new(format!("tiktoken::{name}"), e))?;
        log::info!("loaded tiktoken encoding {name}");

        Ok(Self::new(name, Arc::new(bpe)))
    }
}

impl TextTokenizer<Rank> for TiktokenTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> Result<Vec<Rank>, TokenizerError> {
        Ok(self.inner.encode_ordinary(text))
    }
}
