//! # Whitespace Word Tokenizer

use std::{hash::Hasher, marker::PhantomData};

use num_traits::NumCast;
use twox_hash::XxHash64;

use crate::{errors::TokenizerError, tokenizers::TextTokenizer, types::TokenType};

/// Splits on Unicode whitespace; each word's id is a hash of the word.
///
/// Ids are a fixed-seed `XxHash64` of the word's bytes, reduced into the
/// range of `T`. The tokenizer holds no state, so a word's id never depends
/// on what was encoded before it.
///
/// Distinct words may share an id when `T` is narrow; with `u32` or wider
/// this is rare enough to leave the statistics of realistic batches unchanged.
#[derive(Debug)]
pub struct WhitespaceTokenizer<T: TokenType = u32> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: TokenType> Default for WhitespaceTokenizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenType> WhitespaceTokenizer<T> {
    /// The tokenizer name.
    pub const NAME: &'static str = "whitespace";

    /// The hash seed.
    pub const SEED: u64 = 0;

    /// Create a tokenizer.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// The id of a word.
    pub fn word_id(
        &self,
        word: &str,
    ) -> Result<T, TokenizerError> {
        let mut hasher = XxHash64::with_seed(Self::SEED);
        hasher.write(word.as_bytes());
        let hash = hasher.finish();

        // `None` when `T` spans all of u64 or more.
        let id = match T::max_value().to_u64().and_then(|max| max.checked_add(1)) {
            Some(modulus) => hash % modulus,
            None => hash,
        };
        <T as NumCast>::from(id).ok_or_else(|| {
            TokenizerError::new(
                Self::NAME,
                format!("word id {id} exceeds the token type range ({})", T::max_value()),
            )
        })
    }
}

impl<T: TokenType> TextTokenizer<T> for WhitespaceTokenizer<T> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> Result<Vec<T>, TokenizerError> {
        text.split_whitespace()
            .map(|word| self.word_id(word))
            .collect()
    }
}
