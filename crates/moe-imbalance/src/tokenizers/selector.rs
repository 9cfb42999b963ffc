//! # Tokenizer Selection By Name

use std::{fmt, path::PathBuf, str::FromStr, sync::Arc};

use crate::{
    errors::{ImbalanceError, ImbalanceResult},
    tokenizers::{TextTokenizer, WhitespaceTokenizer},
};

/// The hub model whose tokenizer is used when none is configured.
pub const DEFAULT_HF_MODEL: &str = "mistralai/Mixtral-8x7B-v0.1";

/// A parsed tokenizer name.
///
/// Forms:
/// * `whitespace`
/// * `tiktoken::<encoding>`, e.g. `tiktoken::cl100k_base`
/// * `hf::<model id>`, e.g. `hf::mistralai/Mixtral-8x7B-v0.1`
/// * `hf-file::<path>`, a local `tokenizer.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSelector {
    /// [`WhitespaceTokenizer`].
    Whitespace,

    /// A `tiktoken-rs` encoding.
    Tiktoken(String),

    /// A HuggingFace hub model id.
    HfHub(String),

    /// A local HuggingFace `tokenizer.json`.
    HfFile(PathBuf),
}

impl Default for TokenizerSelector {
    fn default() -> Self {
        Self::HfHub(DEFAULT_HF_MODEL.to_string())
    }
}

impl FromStr for TokenizerSelector {
    type Err = ImbalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "whitespace" {
            return Ok(Self::Whitespace);
        }

        let unsupported = || ImbalanceError::UnsupportedTokenizer(s.to_string());
        let (scheme, rest) = s.split_once("::").ok_or_else(unsupported)?;
        if rest.is_empty() {
            return Err(unsupported());
        }

        match scheme {
            "tiktoken" => Ok(Self::Tiktoken(rest.to_string())),
            "hf" => Ok(Self::HfHub(rest.to_string())),
            "hf-file" => Ok(Self::HfFile(PathBuf::from(rest))),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for TokenizerSelector {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "whitespace"),
            Self::Tiktoken(name) => write!(f, "tiktoken::{name}"),
            Self::HfHub(model) => write!(f, "hf::{model}"),
            Self::HfFile(path) => write!(f, "hf-file::{}", path.display()),
        }
    }
}

impl TokenizerSelector {
    /// Load the selected tokenizer.
    ///
    /// ## Errors
    /// * [`ImbalanceError::UnsupportedTokenizer`] if the backend is not compiled in.
    /// * [`ImbalanceError::Tokenizer`] if the backend fails to load.
    pub fn load(&self) -> ImbalanceResult<Arc<dyn TextTokenizer<u32>>> {
        log::debug!("loading tokenizer {self}");
        match self {
            Self::Whitespace => Ok(Arc::new(WhitespaceTokenizer::<u32>::new())),

            #[cfg(feature = "tiktoken")]
            Self::Tiktoken(name) => Ok(Arc::new(super::TiktokenTokenizer::load(name)?)),

            #[cfg(feature = "hf-hub")]
            Self::HfHub(model) => Ok(Arc::new(super::HfTokenizer::from_pretrained(model)?)),

            #[cfg(feature = "tokenizers")]
            Self::HfFile(path) => Ok(Arc::new(super::HfTokenizer::from_file(path)?)),

            #[allow(unreachable_patterns)]
            _ => Err(ImbalanceError::UnsupportedTokenizer(format!(
                "{self} (backend not enabled in this build)"
            ))),
        }
    }
}

/// List the selector forms available in this build.
pub fn list_selectors() -> Vec<String> {
    let names = std::iter::once("whitespace".to_string());

    #[cfg(feature = "tiktoken")]
    let names = names.chain(
        super::tiktoken::list_encodings(false)
            .into_iter()
            .map(|name| format!("tiktoken::{name}")),
    );

    #[cfg(feature = "hf-hub")]
    let names = names.chain(std::iter::once("hf::<model id>".to_string()));

    #[cfg(feature = "tokenizers")]
    let names = names.chain(std::iter::once(
        "hf-file::<path to tokenizer.json>".to_string(),
    ));

    names.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "whitespace".parse::<TokenizerSelector>().unwrap(),
            TokenizerSelector::Whitespace
        );
        assert_eq!(
            "tiktoken::cl100k_base".parse::<TokenizerSelector>().unwrap(),
            TokenizerSelector::Tiktoken("cl100k_base".to_string())
        );
        assert_eq!(
            "hf::mistralai/Mixtral-8x7B-v0.1"
                .parse::<TokenizerSelector>()
                .unwrap(),
            TokenizerSelector::HfHub("mistralai/Mixtral-8x7B-v0.1".to_string())
        );
        assert_eq!(
            "hf-file::/tmp/tok.json".parse::<TokenizerSelector>().unwrap(),
            TokenizerSelector::HfFile(PathBuf::from("/tmp/tok.json"))
        );
    }

    #[test]
    fn test_default() {
        assert_eq!(
            TokenizerSelector::default().to_string(),
            "hf::mistralai/Mixtral-8x7B-v0.1"
        );
    }

    #[test]
    fn test_parse_rejects() {
        for bad in ["", "bert", "tiktoken::", "sentencepiece::x"] {
            assert!(
                matches!(
                    bad.parse::<TokenizerSelector>(),
                    Err(ImbalanceError::UnsupportedTokenizer(_))
                ),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for name in ["whitespace", "tiktoken::o200k_base", "hf::a/b", "hf-file::x.json"] {
            let sel: TokenizerSelector = name.parse().unwrap();
            assert_eq!(sel.to_string(), name);
        }
    }

    #[test]
    fn test_load_whitespace() {
        let tok = TokenizerSelector::Whitespace.load().unwrap();
        assert_eq!(tok.name(), "whitespace");
        let ids = tok.try_encode("a b a").unwrap();
        assert_eq!(ids[0], ids[2]);
        assert_ne!(ids[0], ids[1]);
    }

    #[cfg(not(feature = "hf-hub"))]
    #[test]
    fn test_load_disabled_backend() {
        let sel = TokenizerSelector::HfHub("a/b".to_string());
        assert!(matches!(
            sel.load(),
            Err(ImbalanceError::UnsupportedTokenizer(_))
        ));
    }

    #[test]
    fn test_list_selectors() {
        let names = list_selectors();
        assert_eq!(names[0], "whitespace");
        #[cfg(feature = "tiktoken")]
        assert!(names.contains(&"tiktoken::cl100k_base".to_string()));
        #[cfg(feature = "tokenizers")]
        assert!(names.iter().any(|name| name.starts_with("hf-file::")));
        #[cfg(not(any(feature = "tiktoken", feature = "tokenizers")))]
        assert_eq!(names, vec!["whitespace".to_string()]);
    }
}
