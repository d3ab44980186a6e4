//! Metric name tokenization
//!
//! A raw OTel name is split into tokens of name-safe characters. Which
//! characters are name-safe depends on the [`CharacterRegime`]: classic
//! Prometheus names allow `[a-zA-Z0-9:]` inside a token, UTF-8 names allow any
//! Unicode letter (general category L) or decimal digit (Nd). Under the UTF-8 regime the runs between tokens are kept so
//! the name can be rebuilt with its original punctuation.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Character set a translated name must stay within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterRegime {
    /// Legacy Prometheus names: `[a-zA-Z_:][a-zA-Z0-9_:]*`
    #[default]
    Ascii,
    /// Prometheus 3.x UTF-8 names
    Utf8,
}

impl CharacterRegime {
    pub fn new(allow_utf8: bool) -> Self {
        if allow_utf8 { Self::Utf8 } else { Self::Ascii }
    }

    /// Whether `c` splits two tokens
    pub fn is_separator(self, c: char) -> bool {
        match self {
            Self::Ascii => !(c.is_ascii_alphanumeric() || c == ':'),
            Self::Utf8 => !(is_letter_or_digit(c) || c == ':'),
        }
    }
}

/// Letters and decimal digits only: `²`, `½`, `Ⅳ` and combining marks are
/// not part of a token.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Ordered name tokens plus the separator recorded between each pair.
///
/// `separators[i]` sits between `tokens[i]` and `tokens[i + 1]`, so there is
/// always one fewer separator than tokens. `None` means no separator was
/// recorded for that position and the join default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTokens {
    tokens: Vec<String>,
    separators: Vec<Option<String>>,
}

impl NameTokens {
    /// Split `name` into tokens under `regime`.
    ///
    /// Runs of separator characters never produce empty tokens. Separators
    /// before the first and after the last token are dropped.
    pub fn tokenize(name: &str, regime: CharacterRegime) -> Self {
        let record_separators = regime == CharacterRegime::Utf8;
        let mut tokens = Vec::new();
        let mut separators = Vec::new();

        let mut token_start: Option<usize> = None;
        let mut separator_start: Option<usize> = None;

        for (i, c) in name.char_indices() {
            if regime.is_separator(c) {
                if let Some(start) = token_start.take() {
                    tokens.push(name[start..i].to_string());
                    separator_start = Some(i);
                }
            } else if token_start.is_none() {
                if let Some(start) = separator_start.take() {
                    separators.push(record_separators.then(|| name[start..i].to_string()));
                }
                token_start = Some(i);
            }
        }

        if let Some(start) = token_start {
            tokens.push(name[start..].to_string());
        }

        Self { tokens, separators }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn separators(&self) -> &[Option<String>] {
        &self.separators
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Append `token` after the last token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        if !self.tokens.is_empty() {
            self.separators.push(None);
        }
        self.tokens.push(token.into());
        self
    }

    /// Put `token` first, ahead of everything tokenized from the name
    pub fn with_leading_token(mut self, token: impl Into<String>) -> Self {
        if !self.tokens.is_empty() {
            self.separators.insert(0, None);
        }
        self.tokens.insert(0, token.into());
        self
    }

    /// Drop every occurrence of `token`, each together with the separator
    /// that preceded it.
    pub fn without(self, token: &str) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len());
        let mut separators = Vec::with_capacity(self.separators.len());

        let preceding = std::iter::once(None).chain(self.separators);
        for (current, separator) in self.tokens.into_iter().zip(preceding) {
            if current == token {
                continue;
            }
            if !tokens.is_empty() {
                separators.push(separator);
            }
            tokens.push(current);
        }

        Self { tokens, separators }
    }

    /// Move `token` to the end, leaving exactly one occurrence
    pub fn with_trailing(self, token: &str) -> Self {
        self.without(token).with_token(token)
    }

    /// Rebuild the name, using `default_separator` wherever none was recorded
    pub fn join(&self, default_separator: &str) -> String {
        let mut joined = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                let separator = self.separators.get(i - 1).and_then(Option::as_deref);
                joined.push_str(separator.unwrap_or(default_separator));
            }
            joined.push_str(token);
        }
        joined
    }
}
