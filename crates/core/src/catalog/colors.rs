//! Recognized color tokens.

/// Tokens the storefront recognizes as color signals in a product reference.
///
/// This is a closed, hand-maintained vocabulary rather than something derived
/// from the catalog, so a reference such as `"Tinsla (Bordo)"` can be
/// disambiguated even when the exact composite name does not match.
const DEFAULT_TOKENS: &[&str] = &[
    "black", "white", "brown", "green", "blue", "red", "pink", "grey", "gray", "beige",
    "burgundy", "navy", "tan", "cognac", "emerald", "dark", "light", "other", "bordo", "ice",
    "gold",
];

/// The set of color tokens used to disambiguate product references.
///
/// Tokens are stored lowercased, trimmed, and deduplicated, in the order
/// they were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVocabulary {
    tokens: Vec<String>,
}

impl Default for ColorVocabulary {
    fn default() -> Self {
        Self::from_tokens(DEFAULT_TOKENS.iter().copied())
    }
}

impl ColorVocabulary {
    /// Build a vocabulary from arbitrary tokens. Blank tokens are ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() && !normalized.contains(&token) {
                normalized.push(token);
            }
        }
        Self { tokens: normalized }
    }

    /// All tokens, lowercased.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens that occur as substrings of `text`.
    ///
    /// `text` is expected to be lowercased already.
    #[must_use]
    pub fn tokens_in<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.tokens
            .iter()
            .filter(|token| text.contains(token.as_str()))
            .map(String::as_str)
            .collect()
    }
}
