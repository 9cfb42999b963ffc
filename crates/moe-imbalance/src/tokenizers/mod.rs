//! # Tokenizer Collaborators
//!
//! The predictor only needs `text -> token ids`; see [`TextTokenizer`].
//!
//! Backends:
//! * [`WhitespaceTokenizer`], always available.
//! * `TiktokenTokenizer`, with feature ``tiktoken``.
//! * `HfTokenizer`, with feature ``tokenizers`` (and ``hf-hub`` for hub downloads).
//!
//! [`TokenizerSelector`] picks a backend by name.

mod selector;
mod text_tokenizer;
mod whitespace;

#[cfg(feature = "tokenizers")]
mod hf;
#[cfg(feature = "tiktoken")]
pub mod tiktoken;

#[cfg(feature = "tokenizers")]
#[doc(inline)]
pub use hf::HfTokenizer;
#[doc(inline)]
pub use selector::{DEFAULT_HF_MODEL, TokenizerSelector, list_selectors};
#[doc(inline)]
pub use text_tokenizer::TextTokenizer;
#[cfg(feature = "tiktoken")]
#[doc(inline)]
pub use tiktoken::TiktokenTokenizer;
#[doc(inline)]
pub use whitespace::WhitespaceTokenizer;
