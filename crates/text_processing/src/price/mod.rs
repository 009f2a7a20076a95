//! Price Normalization
//!
//! Converts a recognized price mention into rupees:
//!
//! - `"75 lacs"` → `7500000`
//! - `"₹1.2 crore"` → `12000000`
//! - `"95L"` → `9500000`
//!
//! The numeric part is the first thousands-grouped decimal in the mention.
//! The scale comes from one of two unit matchers:
//!
//! - [`UnitMatching::Substring`] (default) searches the whole case-folded
//!   mention for unit keywords in [`UnitScale`] priority order. Single-letter
//!   keys match inside unrelated words, so `"1500 sqft"` scales by a trillion
//!   and `"1 crore 20 lakh"` scales by a lakh.
//! - [`UnitMatching::Token`] matches whole words only, prefers the unit
//!   written right after the number, and can sum compound amounts such as
//!   `"1 crore 20 lakh"` when `sum_compound` is set.
//!
//! # Example
//!
//! ```
//! use listing_ner_text_processing::price::{PriceConfig, PriceNormalizer, UnitMatching};
//! use listing_ner_core::NormalizedPrice;
//!
//! let normalizer = PriceNormalizer::with_config(PriceConfig {
//!     unit_matching: UnitMatching::Token,
//!     sum_compound: true,
//! });
//! assert_eq!(
//!     normalizer.normalize("1 crore 20 lakh"),
//!     Some(NormalizedPrice::Integer(12_000_000))
//! );
//! ```

mod units;

pub use units::UnitScale;

use listing_ner_core::NormalizedPrice;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Grouped form first so "1,500" is not cut at the comma; bare digit runs keep
// "7500000" whole instead of stopping after three digits.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?").unwrap());

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)|(?P<word>[^\W\d_]+)").unwrap()
});

/// How unit keywords are located in a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMatching {
    /// Substring search over the whole mention, first key in priority order wins
    #[default]
    Substring,
    /// Whole-word matching against the unit table
    Token,
}

/// Normalizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceConfig {
    #[serde(default)]
    pub unit_matching: UnitMatching,
    /// Sum `<number> <unit>` terms ("1 crore 20 lakh"); token matching only
    #[serde(default)]
    pub sum_compound: bool,
}

/// Stateless price mention normalizer
#[derive(Debug, Clone, Default)]
pub struct PriceNormalizer {
    config: PriceConfig,
}

impl PriceNormalizer {
    /// Create a normalizer with substring unit matching
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PriceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    /// Normalize a price mention to rupees
    ///
    /// Returns `None` when the mention has no numeric token or the token does
    /// not parse as a decimal number.
    pub fn normalize(&self, text: &str) -> Option<NormalizedPrice> {
        let folded = text.to_lowercase();
        let value = match self.config.unit_matching {
            UnitMatching::Substring => normalize_substring(&folded)?,
            UnitMatching::Token => normalize_tokens(&folded, self.config.sum_compound)?,
        };
        NormalizedPrice::from_f64(value)
    }
}

/// Normalize with the default (substring) unit matching
pub fn normalize(text: &str) -> Option<NormalizedPrice> {
    PriceNormalizer::new().normalize(text)
}

fn parse_magnitude(token: &str) -> Option<f64> {
    token.replace(',', "").parse().ok()
}

fn normalize_substring(folded: &str) -> Option<f64> {
    let token = NUMBER_PATTERN.find(folded)?;
    let magnitude = parse_magnitude(token.as_str())?;
    let multiplier = UnitScale::find_substring(folded)
        .map(|scale| scale.multiplier())
        .unwrap_or(1.0);
    Some(magnitude * multiplier)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Number(&'a str),
    Word(&'a str),
}

/// A number together with the unit written immediately after it
#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    magnitude: f64,
    scale: Option<UnitScale>,
}

impl Term {
    fn value(&self) -> f64 {
        self.magnitude * self.scale.map(|s| s.multiplier()).unwrap_or(1.0)
    }
}

fn tokenize(folded: &str) -> Vec<Token<'_>> {
    TOKEN_PATTERN
        .captures_iter(folded)
        .filter_map(|caps| {
            if let Some(num) = caps.name("num") {
                Some(Token::Number(num.as_str()))
            } else {
                caps.name("word").map(|w| Token::Word(w.as_str()))
            }
        })
        .collect()
}

/// Unit starting at the head of `rest`, with the number of tokens it spans
fn unit_at(rest: &[Token<'_>]) -> (Option<UnitScale>, usize) {
    match rest {
        [Token::Word("hundred"), Token::Word("thousand" | "thousands"), ..] => {
            (Some(UnitScale::Lakh), 2)
        }
        [Token::Word(word), ..] => match UnitScale::from_token(word) {
            Some(scale) => (Some(scale), 1),
            None => (None, 0),
        },
        _ => (None, 0),
    }
}

fn collect_terms(tokens: &[Token<'_>]) -> Option<Vec<Term>> {
    let mut terms = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Number(raw) => {
                let magnitude = parse_magnitude(raw)?;
                let (scale, consumed) = unit_at(&tokens[i + 1..]);
                terms.push(Term { magnitude, scale });
                i += 1 + consumed;
            }
            Token::Word(_) => i += 1,
        }
    }
    Some(terms)
}

fn normalize_tokens(folded: &str, sum_compound: bool) -> Option<f64> {
    let tokens = tokenize(folded);
    let terms = collect_terms(&tokens)?;
    let first = *terms.first()?;

    if first.scale.is_none() {
        // No unit after the number: fall back to any whole-word unit, by priority
        let scale = UnitScale::ALL.into_iter().find(|scale| {
            tokens.iter().enumerate().any(|(i, token)| {
                matches!(token, Token::Word(_)) && unit_at(&tokens[i..]).0 == Some(*scale)
            })
        });
        return Some(Term { scale, ..first }.value());
    }

    if !sum_compound {
        return Some(first.value());
    }

    Some(
        terms
            .iter()
            .take_while(|term| term.scale.is_some())
            .map(Term::value)
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_normalizer(sum_compound: bool) -> PriceNormalizer {
        PriceNormalizer::with_config(PriceConfig {
            unit_matching: UnitMatching::Token,
            sum_compound,
        })
    }

    #[test]
    fn test_lakh_variants() {
        assert_eq!(normalize("75 lacs"), Some(NormalizedPrice::Integer(7_500_000)));
        assert_eq!(normalize("₹85 lakhs"), Some(NormalizedPrice::Integer(8_500_000)));
        assert_eq!(normalize("95L"), Some(NormalizedPrice::Integer(9_500_000)));
        assert_eq!(normalize("25L"), Some(NormalizedPrice::Integer(2_500_000)));
    }

    #[test]
    fn test_crore_variants() {
        assert_eq!(normalize("₹1.2 crore"), Some(NormalizedPrice::Integer(12_000_000)));
        assert_eq!(normalize("2.5 crores"), Some(NormalizedPrice::Integer(25_000_000)));
        assert_eq!(normalize("₹3.25 crore"), Some(NormalizedPrice::Integer(32_500_000)));
        assert_eq!(normalize("₹1cr"), Some(NormalizedPrice::Integer(10_000_000)));
        assert_eq!(normalize("₹1.25 cr"), Some(NormalizedPrice::Integer(12_500_000)));
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(normalize("₹4.5 CRORE"), Some(NormalizedPrice::Integer(45_000_000)));
        assert_eq!(normalize("3 M"), Some(NormalizedPrice::Integer(3_000_000)));
    }

    #[test]
    fn test_not_recognized() {
        assert_eq!(normalize("not a price"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("crore"), None);
    }

    #[test]
    fn test_non_ascii_digits_do_not_parse() {
        // Devanagari digits match \d but are not a Rust float literal
        assert_eq!(normalize("१२ lakh"), None);
    }

    #[test]
    fn test_grouped_number_without_unit() {
        assert_eq!(normalize("Rs. 50,000"), Some(NormalizedPrice::Integer(50_000)));
        assert_eq!(
            normalize("1,250,000.5"),
            Some(NormalizedPrice::Float(1_250_000.5))
        );
    }

    #[test]
    fn test_unscaled_integer_is_idempotent() {
        for value in [0u64, 7, 950, 7_500_000, 12_000_000] {
            assert_eq!(
                normalize(&value.to_string()),
                Some(NormalizedPrice::Integer(value))
            );
        }
    }

    #[test]
    fn test_fraction_kept_as_float() {
        assert_eq!(normalize("12.5"), Some(NormalizedPrice::Float(12.5)));
    }

    #[test]
    fn test_substring_keeps_single_scale_by_priority() {
        // "l" from "lakh" is checked before any crore key
        assert_eq!(
            normalize("1 crore 20 lakh"),
            Some(NormalizedPrice::Integer(100_000))
        );
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // "t" in "sqft" reads as trillion
        assert_eq!(
            normalize("1500 sqft"),
            Some(NormalizedPrice::Integer(1_500_000_000_000_000))
        );
    }

    #[test]
    fn test_token_ignores_unrelated_words() {
        let normalizer = token_normalizer(false);
        assert_eq!(normalizer.normalize("1500 sqft"), Some(NormalizedPrice::Integer(1500)));
        assert_eq!(
            normalizer.normalize("95L"),
            Some(NormalizedPrice::Integer(9_500_000))
        );
        assert_eq!(
            normalizer.normalize("75 lacs"),
            Some(NormalizedPrice::Integer(7_500_000))
        );
        assert_eq!(
            normalizer.normalize("₹1.5cr"),
            Some(NormalizedPrice::Integer(15_000_000))
        );
    }

    #[test]
    fn test_token_uses_unit_after_number() {
        let normalizer = token_normalizer(false);
        assert_eq!(
            normalizer.normalize("1 crore 20 lakh"),
            Some(NormalizedPrice::Integer(10_000_000))
        );
    }

    #[test]
    fn test_token_sums_compound_amounts() {
        let normalizer = token_normalizer(true);
        assert_eq!(
            normalizer.normalize("1 crore 20 lakhs"),
            Some(NormalizedPrice::Integer(12_000_000))
        );
        assert_eq!(
            normalizer.normalize("₹2 cr 50 lac"),
            Some(NormalizedPrice::Integer(25_000_000))
        );
        // Trailing bare number is not part of the amount
        assert_eq!(
            normalizer.normalize("1 crore 20 lakh 3"),
            Some(NormalizedPrice::Integer(12_000_000))
        );
    }

    #[test]
    fn test_token_hundred_thousand() {
        let normalizer = token_normalizer(false);
        assert_eq!(
            normalizer.normalize("5 hundred thousand"),
            Some(NormalizedPrice::Integer(500_000))
        );
    }

    #[test]
    fn test_token_falls_back_to_detached_unit() {
        let normalizer = token_normalizer(true);
        assert_eq!(
            normalizer.normalize("price 3, in crore"),
            Some(NormalizedPrice::Integer(30_000_000))
        );
        assert_eq!(normalizer.normalize("not a price"), None);
    }

    #[test]
    fn test_results_are_non_negative() {
        let normalizer = token_normalizer(true);
        for text in ["-5 lakh", "minus 3 cr", "-1,000"] {
            let value = normalize(text).unwrap();
            assert!(value.as_f64() >= 0.0);
            let value = normalizer.normalize(text).unwrap();
            assert!(value.as_f64() >= 0.0);
        }
    }

    #[test]
    fn test_overflowing_number_is_not_recognized() {
        // Parses to infinity, which has no JSON number form
        assert_eq!(normalize(&"9".repeat(400)), None);
        assert_eq!(normalize(&format!("{} crore", "9".repeat(400))), None);
    }

    #[test]
    fn test_fraction_keeps_float_rounding() {
        assert_eq!(
            normalize("2.3 lakh"),
            Some(NormalizedPrice::Float(229_999.999_999_999_97))
        );
    }

    #[test]
    fn test_config_accessor() {
        assert_eq!(PriceNormalizer::new().config(), &PriceConfig::default());
        assert_eq!(
            token_normalizer(true).config().unit_matching,
            UnitMatching::Token
        );
    }
}
