//! # Token Stream Statistics
//!
//! Frequency statistics over a flattened token stream.
//!
//! All statistics are computed from the per-distinct-token counts of one
//! stream; see [`TokenCounts`].

use serde::{Deserialize, Serialize};

use crate::types::{IbHashMap, TokenType, hash_map_with_capacity};

/// The default rank cutoff for [`top_k_concentration`].
pub const DEFAULT_TOP_K: usize = 10;

/// Per-distinct-token occurrence counts of a token stream.
#[derive(Debug, Clone)]
pub struct TokenCounts<T: TokenType> {
    counts: IbHashMap<T, usize>,
    total: usize,
}

impl<T: TokenType> TokenCounts<T> {
    /// Count the tokens of a stream.
    pub fn from_tokens(tokens: &[T]) -> Self {
        let mut counts: IbHashMap<T, usize> = hash_map_with_capacity(tokens.len().min(1 << 16));
        for &token in tokens {
            *counts.entry(token).or_default() += 1;
        }
        Self {
            counts,
            total: tokens.len(),
        }
    }

    /// The number of tokens in the stream.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct token ids.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// The occurrence count of `token`.
    pub fn count(
        &self,
        token: T,
    ) -> usize {
        self.counts.get(&token).copied().unwrap_or_default()
    }

    /// The per-distinct-token frequencies, sorted ascending.
    pub fn sorted_frequencies(&self) -> Vec<usize> {
        let mut freqs: Vec<usize> = self.counts.values().copied().collect();
        freqs.sort_unstable();
        freqs
    }
}

/// Fraction of all tokens held by the `k` most frequent distinct tokens.
///
/// When fewer than `k` distinct tokens exist, all of them are used; so the
/// result saturates at 1.0 whenever the stream has `<= k` distinct tokens,
/// regardless of how evenly they are distributed.
pub fn top_k_concentration<T: TokenType>(
    counts: &TokenCounts<T>,
    k: usize,
) -> f64 {
    if counts.total() == 0 {
        return 0.0;
    }
    let freqs = counts.sorted_frequencies();
    let top: usize = freqs.iter().rev().take(k).sum();
    top as f64 / counts.total() as f64
}

/// Shannon entropy, in bits, of the empirical token distribution.
pub fn unigram_entropy<T: TokenType>(counts: &TokenCounts<T>) -> f64 {
    let total = counts.total() as f64;
    let mut entropy = 0.0;
    // Sum in a fixed order so repeated calls are bit-identical.
    for freq in counts.sorted_frequencies() {
        let p = freq as f64 / total;
        entropy -= p * p.log2();
    }
    entropy
}

/// Gini coefficient of the per-distinct-token frequencies.
///
/// Over the ascending frequencies `f_1..f_n`:
/// `(2 * sum(i * f_i)) / (n * sum(f_i)) - (n + 1) / n`.
///
/// Returns 0.0 when there are no tokens.
pub fn gini_coefficient<T: TokenType>(counts: &TokenCounts<T>) -> f64 {
    let freqs = counts.sorted_frequencies();
    let n = freqs.len();
    if n == 0 {
        return 0.0;
    }

    let (weighted, sum) = freqs
        .iter()
        .enumerate()
        .fold((0u128, 0u128), |(weighted, sum), (idx, &freq)| {
            (
                weighted + (idx as u128 + 1) * freq as u128,
                sum + freq as u128,
            )
        });

    let n = n as f64;
    (2 * weighted) as f64 / (n * sum as f64) - (n + 1.0) / n
}

/// The named statistics of one token stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// The number of tokens.
    pub total_tokens: usize,

    /// The number of distinct token ids.
    pub unique_tokens: usize,

    /// `1 - unique / total`.
    pub token_repetition_rate: f64,

    /// Fraction of tokens held by the 10 (or configured `k`) most frequent ids.
    pub top10_concentration: f64,

    /// `unique / total`.
    pub vocabulary_diversity: f64,

    /// Shannon entropy (bits) of the token distribution.
    pub unigram_entropy: f64,

    /// Gini coefficient of the token frequencies.
    pub gini_coefficient: f64,
}

impl MetricSet {
    /// Compute the statistics of a token stream.
    ///
    /// Returns `None` for an empty stream, where the ratios are undefined.
    pub fn from_tokens<T: TokenType>(
        tokens: &[T],
        top_k: usize,
    ) -> Option<Self> {
        Self::from_counts(&TokenCounts::from_tokens(tokens), top_k)
    }

    /// Compute the statistics from pre-computed counts.
    ///
    /// Returns `None` when the counts are empty.
    pub fn from_counts<T: TokenType>(
        counts: &TokenCounts<T>,
        top_k: usize,
    ) -> Option<Self> {
        if counts.total() == 0 {
            return None;
        }

        let total = counts.total() as f64;
        let unique = counts.unique() as f64;

        Some(Self {
            total_tokens: counts.total(),
            unique_tokens: counts.unique(),
            token_repetition_rate: 1.0 - unique / total,
            top10_concentration: top_k_concentration(counts, top_k),
            vocabulary_diversity: unique / total,
            unigram_entropy: unigram_entropy(counts),
            gini_coefficient: gini_coefficient(counts),
        })
    }

    /// The entropy ceiling used to normalize [`Self::unigram_entropy`].
    ///
    /// `log2(max(unique_tokens, 2))`; the floor of 2 keeps a single-token
    /// stream from dividing by `log2(1) = 0`.
    pub fn max_entropy(&self) -> f64 {
        (self.unique_tokens.max(2) as f64).log2()
    }

    /// `unigram_entropy / max_entropy`.
    pub fn normalized_entropy(&self) -> f64 {
        self.unigram_entropy / self.max_entropy()
    }

    /// Iterate over `(name, value)` pairs, in declaration order.
    pub fn named_values(&self) -> [(&'static str, f64); 7] {
        [
            ("total_tokens", self.total_tokens as f64),
            ("unique_tokens", self.unique_tokens as f64),
            ("token_repetition_rate", self.token_repetition_rate),
            ("top10_concentration", self.top10_concentration),
            ("vocabulary_diversity", self.vocabulary_diversity),
            ("unigram_entropy", self.unigram_entropy),
            ("gini_coefficient", self.gini_coefficient),
        ]
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_token_counts() {
        let counts = TokenCounts::from_tokens(&[3u32, 1, 3, 3, 2, 1]);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.unique(), 3);
        assert_eq!(counts.count(3), 3);
        assert_eq!(counts.count(9), 0);
        assert_eq!(counts.sorted_frequencies(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_stream() {
        let tokens: [u32; 0] = [];
        let counts = TokenCounts::from_tokens(&tokens);
        assert_eq!(top_k_concentration(&counts, DEFAULT_TOP_K), 0.0);
        assert_eq!(gini_coefficient(&counts), 0.0);
        assert!(MetricSet::from_tokens(&tokens, DEFAULT_TOP_K).is_none());
    }

    #[test]
    fn test_single_repeated_token() {
        let metrics = MetricSet::from_tokens(&[7u32; 5], DEFAULT_TOP_K).unwrap();
        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.unique_tokens, 1);
        assert!((metrics.token_repetition_rate - 0.8).abs() < EPS);
        assert_eq!(metrics.top10_concentration, 1.0);
        assert!((metrics.vocabulary_diversity - 0.2).abs() < EPS);
        assert_eq!(metrics.unigram_entropy, 0.0);
        assert_eq!(metrics.gini_coefficient, 0.0);
        assert_eq!(metrics.max_entropy(), 1.0);
    }

    #[test]
    fn test_all_distinct_tokens() {
        let metrics = MetricSet::from_tokens(&[1u32, 2, 3, 4, 5], DEFAULT_TOP_K).unwrap();
        assert_eq!(metrics.token_repetition_rate, 0.0);
        assert_eq!(metrics.vocabulary_diversity, 1.0);
        assert!((metrics.unigram_entropy - 5f64.log2()).abs() < EPS);
        assert!((metrics.normalized_entropy() - 1.0).abs() < EPS);
        assert_eq!(metrics.gini_coefficient, 0.0);

        // Five distinct tokens all fit in the top 10.
        assert_eq!(metrics.top10_concentration, 1.0);
    }

    #[test]
    fn test_top_k_beyond_cutoff() {
        let tokens: Vec<u32> = (0..20).collect();
        let counts = TokenCounts::from_tokens(&tokens);
        assert_eq!(top_k_concentration(&counts, 10), 0.5);
        assert_eq!(top_k_concentration(&counts, 40), 1.0);

        // One heavy token and 12 singletons: 8 + 9 of the singletons.
        let mut tokens = vec![100u32; 8];
        tokens.extend(0..12);
        let counts = TokenCounts::from_tokens(&tokens);
        assert!((top_k_concentration(&counts, 10) - 17.0 / 20.0).abs() < EPS);
    }

    #[test]
    fn test_skewed_distribution() {
        // Frequencies [1, 2, 2].
        let metrics = MetricSet::from_tokens(&[1u32, 1, 2, 2, 3], DEFAULT_TOP_K).unwrap();
        assert!((metrics.token_repetition_rate - 0.4).abs() < EPS);
        assert!((metrics.vocabulary_diversity - 0.6).abs() < EPS);
        assert!((metrics.unigram_entropy - 1.521_928_094_887_362).abs() < 1e-9);
        // (2 * (1*1 + 2*2 + 3*2)) / (3 * 5) - 4 / 3
        assert!((metrics.gini_coefficient - (22.0 / 15.0 - 4.0 / 3.0)).abs() < EPS);
    }

    #[test]
    fn test_named_values() {
        let metrics = MetricSet::from_tokens(&[1u16, 1, 2], DEFAULT_TOP_K).unwrap();
        let names: Vec<&str> = metrics.named_values().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            vec![
                "total_tokens",
                "unique_tokens",
                "token_repetition_rate",
                "top10_concentration",
                "vocabulary_diversity",
                "unigram_entropy",
                "gini_coefficient",
            ]
        );
        assert_eq!(metrics.named_values()[0].1, 3.0);
    }

    #[test]
    fn test_metric_set_json_keys() {
        let metrics = MetricSet::from_tokens(&[4u32, 4], DEFAULT_TOP_K).unwrap();
        let value = serde_json::to_value(metrics).unwrap();
        for (name, _) in metrics.named_values() {
            assert!(value.get(name).is_some(), "missing key {name}");
        }
    }

    proptest! {
        #[test]
        fn prop_single_token_stream(token in 0u32..1000, total in 1usize..200) {
            let metrics = MetricSet::from_tokens(&vec![token; total], DEFAULT_TOP_K).unwrap();
            let total_f = total as f64;
            prop_assert!((metrics.token_repetition_rate - (1.0 - 1.0 / total_f)).abs() < EPS);
            prop_assert!((metrics.vocabulary_diversity - 1.0 / total_f).abs() < EPS);
            prop_assert_eq!(metrics.unigram_entropy, 0.0);
            prop_assert_eq!(metrics.gini_coefficient, 0.0);
        }

        #[test]
        fn prop_distinct_token_stream(total in 1usize..300) {
            let tokens: Vec<u32> = (0..total as u32).collect();
            let metrics = MetricSet::from_tokens(&tokens, DEFAULT_TOP_K).unwrap();
            prop_assert_eq!(metrics.token_repetition_rate, 0.0);
            prop_assert_eq!(metrics.vocabulary_diversity, 1.0);
            prop_assert_eq!(metrics.gini_coefficient, 0.0);
            prop_assert!((metrics.unigram_entropy - (total as f64).log2()).abs() < 1e-9);
        }

        #[test]
        fn prop_metric_ranges(tokens in proptest::collection::vec(0u32..50, 1..400)) {
            let metrics = MetricSet::from_tokens(&tokens, DEFAULT_TOP_K).unwrap();
            prop_assert!((0.0..=1.0).contains(&metrics.token_repetition_rate));
            prop_assert!(metrics.top10_concentration > 0.0);
            prop_assert!(metrics.top10_concentration <= 1.0);
            prop_assert!(metrics.vocabulary_diversity > 0.0);
            prop_assert!(metrics.vocabulary_diversity <= 1.0);
            prop_assert!(metrics.unigram_entropy >= 0.0);
            prop_assert!(metrics.normalized_entropy() <= 1.0 + 1e-9);
            prop_assert!(metrics.gini_coefficient > -1e-12);
            prop_assert!(metrics.gini_coefficient < 1.0);
        }
    }
}
