//! Case folding and token extraction for symptom text.

use triage_core::SymptomInput;

/// Normalized text plus its alphabetic tokens, owned by one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    text: String,
    tokens: Vec<String>,
}

impl TokenSet {
    /// Lower-cased source text, used for phrase containment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokens in source order; repeats are kept.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Exact token membership.
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|candidate| candidate == token)
    }

    /// Substring search over the whole normalized text.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.text.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Split on every run of non-alphabetic characters.
pub fn tokenize(text: &str) -> TokenSet {
    let text = normalize(text);
    let tokens = text
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect();

    TokenSet { text, tokens }
}

/// Tokenize free text or a phrase list (joined with ", ").
pub fn tokenize_input(input: &SymptomInput) -> TokenSet {
    tokenize(&input.joined_text())
}
