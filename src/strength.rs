//! Coarse strength heuristic for generated credentials.
//!
//! Character-based modes score the request (length and enabled classes),
//! not the actual characters of the output. Passphrases are scored by
//! token count alone.

use crate::generator::{DEFAULT_SEPARATOR, GenerationOptions, Mode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

const LABELS: [StrengthLabel; 5] = [
    StrengthLabel::None,
    StrengthLabel::Weak,
    StrengthLabel::Fair,
    StrengthLabel::Good,
    StrengthLabel::Strong,
];

impl StrengthLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::None => "None",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthResult {
    pub score: u8,
    pub label: StrengthLabel,
}

impl StrengthResult {
    pub const NONE: Self = Self::from_score(0);

    const fn from_score(score: u8) -> Self {
        Self {
            score,
            label: LABELS[score as usize],
        }
    }
}

/// Whether the trailing number of a passphrase counts as a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCounting {
    #[default]
    IncludeTrailingNumber,
    WordsOnly,
}

#[derive(Debug, Clone)]
pub struct StrengthEstimator {
    separator: String,
    token_counting: TokenCounting,
}

impl Default for StrengthEstimator {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            token_counting: TokenCounting::default(),
        }
    }
}

impl StrengthEstimator {
    pub fn new(separator: impl Into<String>, token_counting: TokenCounting) -> Self {
        Self {
            separator: separator.into(),
            token_counting,
        }
    }

    pub fn estimate(
        &self,
        password: &str,
        options: &GenerationOptions,
        mode: Mode,
    ) -> StrengthResult {
        if password.is_empty() {
            return StrengthResult::NONE;
        }

        match mode {
            Mode::Passphrase => self.passphrase_strength(password),
            Mode::Random | Mode::Pronounceable => charset_strength(password, options),
        }
    }

    fn token_count(&self, password: &str) -> usize {
        if self.separator.is_empty() {
            return 1;
        }

        let tokens: Vec<&str> = password.split(self.separator.as_str()).collect();
        let trailing_number = tokens.len() > 1
            && tokens
                .last()
                .is_some_and(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()));

        match self.token_counting {
            TokenCounting::WordsOnly if trailing_number => tokens.len() - 1,
            _ => tokens.len(),
        }
    }

    fn passphrase_strength(&self, password: &str) -> StrengthResult {
        let score = match self.token_count(password) {
            n if n >= 5 => 4,
            4 => 3,
            3 => 2,
            _ => 1,
        };
        StrengthResult::from_score(score)
    }
}

fn charset_strength(password: &str, options: &GenerationOptions) -> StrengthResult {
    let length = password.chars().count();
    let variety = options.variety();

    let mut score: u8 = 0;

    if length >= 8 {
        score += 1;
    }
    if length >= 16 {
        score += 1;
    }

    if variety >= 2 {
        score += 1;
    }
    if variety >= 4 {
        score += 1;
    }

    StrengthResult::from_score(score.clamp(1, 4))
}

/// Estimates with the default separator and token counting.
pub fn estimate_strength(
    password: &str,
    options: &GenerationOptions,
    mode: Mode,
) -> StrengthResult {
    StrengthEstimator::default().estimate(password, options, mode)
}
