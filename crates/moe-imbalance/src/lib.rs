//! # `moe-imbalance` Routing Imbalance Predictor
//!
//! Estimates how unevenly a mixture-of-experts model will load its experts
//! for a batch of text, from the token-frequency statistics of that batch.
//!
//! The pipeline is a pure function:
//! text batch → token stream (via an injected tokenizer) → [`MetricSet`] →
//! weighted score in `[0, 1]`.
//!
//! See:
//! * [`ImbalancePredictor`] to score sample batches.
//! * [`metrics`] for the individual statistics.
//! * [`tokenizers`] for the tokenizer seam and the bundled backends.
//! * [`dataset`] to load JSONL sample files.
//!
//! ```rust
//! use std::sync::Arc;
//! use moe_imbalance::{ImbalancePredictor, SampleBatch, tokenizers::WhitespaceTokenizer};
//!
//! let predictor: ImbalancePredictor =
//!     ImbalancePredictor::new(Arc::new(WhitespaceTokenizer::<u32>::new()));
//!
//! let texts = ["hello world hello world", "the the the the the"];
//! let report = predictor.score_with_breakdown(SampleBatch::Texts(&texts)).unwrap();
//! let metrics = report.metrics.unwrap();
//!
//! assert_eq!(metrics.total_tokens, 9);
//! assert_eq!(metrics.unique_tokens, 3);
//! assert!(report.imbalance_score <= 1.0);
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod dataset;
pub mod errors;
pub mod metrics;
pub mod predictor;
pub mod samples;
pub mod tokenizers;
pub mod types;

#[doc(inline)]
pub use errors::{ImbalanceError, ImbalanceResult, TokenizerError};
#[doc(inline)]
pub use metrics::MetricSet;
#[doc(inline)]
pub use predictor::{
    ImbalancePredictor,
    ImbalanceReport,
    PredictorOptions,
    ScoreWeights,
    predict_imbalance,
};
#[doc(inline)]
pub use samples::{SampleBatch, TextRecord};
#[doc(inline)]
pub use types::TokenType;
