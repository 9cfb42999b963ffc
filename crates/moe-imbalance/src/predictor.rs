//! # Imbalance Predictor
//!
//! Tokenizes a sample batch, computes the [`MetricSet`] of the flattened
//! token stream, and folds it into one score in `[0, 1]` with fixed weights.
//!
//! ```rust
//! use std::sync::Arc;
//! use moe_imbalance::{ImbalancePredictor, tokenizers::WhitespaceTokenizer};
//!
//! let predictor: ImbalancePredictor =
//!     ImbalancePredictor::new(Arc::new(WhitespaceTokenizer::<u32>::new()));
//! let score = predictor.score_texts(&["the the the the the"]).unwrap();
//! assert!((score - 0.8).abs() < 1e-9);
//! ```

use std::{marker::PhantomData, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    errors::ImbalanceResult,
    metrics::{DEFAULT_TOP_K, MetricSet},
    samples::{SampleBatch, TextRecord, preview},
    tokenizers::{TextTokenizer, TokenizerSelector},
    types::TokenType,
};

/// Linear weights folding a [`MetricSet`] into a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of `token_repetition_rate`.
    pub repetition: f64,

    /// Weight of `top10_concentration`.
    pub concentration: f64,

    /// Weight of `1 - vocabulary_diversity`.
    pub low_diversity: f64,

    /// Weight of `1 - unigram_entropy / max_entropy`.
    pub low_entropy: f64,

    /// Weight of `gini_coefficient`.
    pub gini: f64,
}

impl ScoreWeights {
    /// The standard weights.
    pub const DEFAULT: Self = Self {
        repetition: 0.30,
        concentration: 0.25,
        low_diversity: 0.20,
        low_entropy: 0.15,
        gini: 0.10,
    };

    /// Fold the metrics into a score.
    ///
    /// The sum is clamped above at 1.0; there is no lower clamp.
    pub fn aggregate(
        &self,
        metrics: &MetricSet,
    ) -> f64 {
        let mut score = 0.0;
        score += metrics.token_repetition_rate * self.repetition;
        score += metrics.top10_concentration * self.concentration;
        score += (1.0 - metrics.vocabulary_diversity) * self.low_diversity;
        score += (1.0 - metrics.normalized_entropy()) * self.low_entropy;
        score += metrics.gini_coefficient * self.gini;
        score.min(1.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for configuring an [`ImbalancePredictor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictorOptions {
    top_k: usize,
    weights: ScoreWeights,
    parallel: bool,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            weights: ScoreWeights::DEFAULT,
            parallel: false,
        }
    }
}

impl PredictorOptions {
    /// Gets the rank cutoff of the concentration statistic.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Sets the rank cutoff of the concentration statistic.
    pub fn with_top_k(
        mut self,
        top_k: usize,
    ) -> Self {
        self.top_k = top_k;
        self
    }

    /// Gets the aggregation weights.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Sets the aggregation weights.
    pub fn with_weights(
        mut self,
        weights: ScoreWeights,
    ) -> Self {
        self.weights = weights;
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Parallel tokenization requires the ``rayon`` feature;
    /// without it this flag is ignored.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }
}

/// A score with its unweighted metric breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceReport {
    /// The aggregated score.
    pub imbalance_score: f64,

    /// The metrics; `None` when the batch produced no tokens.
    pub metrics: Option<MetricSet>,
}

impl ImbalanceReport {
    /// The report of a batch with no tokens.
    pub const EMPTY: Self = Self {
        imbalance_score: 0.0,
        metrics: None,
    };
}

/// Predicts mixture-of-experts routing imbalance from token statistics.
///
/// Holds a shared tokenizer handle and nothing else mutable; every call is
/// independent of every other.
pub struct ImbalancePredictor<T = u32, K = dyn TextTokenizer<T>>
where
    T: TokenType,
    K: TextTokenizer<T> + ?Sized,
{
    tokenizer: Arc<K>,
    options: PredictorOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T, K> Clone for ImbalancePredictor<T, K>
where
    T: TokenType,
    K: TextTokenizer<T> + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            tokenizer: self.tokenizer.clone(),
            options: self.options,
            _marker: PhantomData,
        }
    }
}

impl<T, K> ImbalancePredictor<T, K>
where
    T: TokenType,
    K: TextTokenizer<T> + ?Sized,
{
    /// Create a predictor with default options.
    pub fn new(tokenizer: Arc<K>) -> Self {
        Self::with_options(tokenizer, PredictorOptions::default())
    }

    /// Create a predictor with the given options.
    pub fn with_options(
        tokenizer: Arc<K>,
        options: PredictorOptions,
    ) -> Self {
        Self {
            tokenizer,
            options,
            _marker: PhantomData,
        }
    }

    /// The tokenizer handle.
    pub fn tokenizer(&self) -> &Arc<K> {
        &self.tokenizer
    }

    /// The predictor options.
    pub fn options(&self) -> &PredictorOptions {
        &self.options
    }

    /// Tokenize texts into one stream, in order, with no boundary tokens.
    pub fn tokenize(
        &self,
        texts: &[&str],
    ) -> ImbalanceResult<Vec<T>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                if self.options.parallel() {
                    use rayon::prelude::*;

                    let streams = texts
                        .par_iter()
                        .map(|text| self.tokenizer.try_encode(text))
                        .collect::<Result<Vec<_>, _>>()?;
                    return Ok(streams.concat());
                }
            }
        }

        let mut tokens = Vec::new();
        for text in texts {
            self.tokenizer.try_encode_append(text, &mut tokens)?;
            log::trace!(
                "{}: {:?} -> {} tokens",
                self.tokenizer.name(),
                preview(text, 32),
                tokens.len()
            );
        }
        Ok(tokens)
    }

    /// Compute the metric set of a batch.
    ///
    /// ## Returns
    /// `None` when the batch tokenizes to nothing.
    ///
    /// ## Errors
    /// * [`crate::ImbalanceError::InvalidInput`] for an empty batch or a record without text.
    /// * [`crate::ImbalanceError::Tokenizer`] from the tokenizer, unchanged.
    pub fn metrics<S: AsRef<str>>(
        &self,
        batch: SampleBatch<'_, S>,
    ) -> ImbalanceResult<Option<MetricSet>> {
        let texts = batch.texts()?;
        let tokens = self.tokenize(&texts)?;
        Ok(MetricSet::from_tokens(&tokens, self.options.top_k()))
    }

    /// Score a batch, with the metric breakdown.
    ///
    /// See [`Self::metrics`] for errors.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(samples = batch.len())))]
    pub fn score_with_breakdown<S: AsRef<str>>(
        &self,
        batch: SampleBatch<'_, S>,
    ) -> ImbalanceResult<ImbalanceReport> {
        let Some(metrics) = self.metrics(batch)? else {
            log::debug!("{} samples produced no tokens", batch.len());
            return Ok(ImbalanceReport::EMPTY);
        };

        let imbalance_score = self.options.weights().aggregate(&metrics);
        log::debug!(
            "{} samples, {} tokens ({} unique): imbalance {:.3}",
            batch.len(),
            metrics.total_tokens,
            metrics.unique_tokens,
            imbalance_score
        );

        Ok(ImbalanceReport {
            imbalance_score,
            metrics: Some(metrics),
        })
    }

    /// Score a batch.
    ///
    /// See [`Self::metrics`] for errors.
    pub fn score<S: AsRef<str>>(
        &self,
        batch: SampleBatch<'_, S>,
    ) -> ImbalanceResult<f64> {
        Ok(self.score_with_breakdown(batch)?.imbalance_score)
    }

    /// Score plain text samples.
    pub fn score_texts<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> ImbalanceResult<f64> {
        self.score(SampleBatch::Texts(texts))
    }

    /// Score records by their `text` field.
    pub fn score_records(
        &self,
        records: &[TextRecord],
    ) -> ImbalanceResult<f64> {
        self.score(SampleBatch::<String>::Records(records))
    }
}

/// Load the named tokenizer and score plain text samples.
///
/// ## Arguments
/// * `texts` - The samples.
/// * `tokenizer` - A [`TokenizerSelector`] name, e.g. `"tiktoken::cl100k_base"`.
pub fn predict_imbalance<S: AsRef<str>>(
    texts: &[S],
    tokenizer: &str,
) -> ImbalanceResult<f64> {
    let selector: TokenizerSelector = tokenizer.parse()?;
    let predictor: ImbalancePredictor = ImbalancePredictor::new(selector.load()?);
    predictor.score_texts(texts)
}
