//! # Text Tokenizer Trait

use std::sync::Arc;

use crate::{errors::TokenizerError, types::TokenType};

/// A text-to-token-ids capability.
///
/// Implementations must not insert special or boundary tokens; the
/// predictor concatenates the per-sample streams as-is.
pub trait TextTokenizer<T: TokenType>: Send + Sync {
    /// A display name for logs and errors.
    fn name(&self) -> &str;

    /// Encode text into token ids.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// The token ids, or the backend's error.
    fn try_encode(
        &self,
        text: &str,
    ) -> Result<Vec<T>, TokenizerError>;

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `tokens` - The target token buffer to append to.
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> Result<(), TokenizerError> {
        tokens.extend(self.try_encode(text)?);
        Ok(())
    }
}

impl<T, K> TextTokenizer<T> for Arc<K>
where
    T: TokenType,
    K: TextTokenizer<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> Result<Vec<T>, TokenizerError> {
        (**self).try_encode(text)
    }

    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> Result<(), TokenizerError> {
        (**self).try_encode_append(text, tokens)
    }
}
