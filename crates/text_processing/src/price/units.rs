//! Scale keywords for price mentions
//!
//! Declaration order is match priority: lakh is checked before crore, crore
//! before million, and so on.

use serde::{Deserialize, Serialize};

/// Scale applied to the numeric part of a price mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitScale {
    Lakh,
    Crore,
    Million,
    Billion,
    Trillion,
}

impl UnitScale {
    /// All scales in priority order
    pub const ALL: [UnitScale; 5] = [
        UnitScale::Lakh,
        UnitScale::Crore,
        UnitScale::Million,
        UnitScale::Billion,
        UnitScale::Trillion,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            UnitScale::Lakh => 100_000.0,
            UnitScale::Crore => 10_000_000.0,
            UnitScale::Million => 1_000_000.0,
            UnitScale::Billion => 1_000_000_000.0,
            UnitScale::Trillion => 1_000_000_000_000.0,
        }
    }

    /// Keywords searched as substrings of the case-folded mention
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            UnitScale::Lakh => &[
                "l",
                "lac",
                "lakh",
                "lakhs",
                "hundred thousand",
                "hundred thousands",
            ],
            UnitScale::Crore => &["cr", "crore", "crores", "c"],
            UnitScale::Million => &["m", "million", "millions", "mil"],
            UnitScale::Billion => &["b", "billion", "billions"],
            UnitScale::Trillion => &["t", "trillion", "trillions"],
        }
    }

    /// Whole-word spellings accepted by token matching
    fn token_keys(&self) -> &'static [&'static str] {
        match self {
            UnitScale::Lakh => &["l", "lac", "lacs", "lakh", "lakhs"],
            UnitScale::Crore => &["c", "cr", "crs", "crore", "crores"],
            UnitScale::Million => &["m", "mil", "million", "millions"],
            UnitScale::Billion => &["b", "bn", "billion", "billions"],
            UnitScale::Trillion => &["t", "tn", "trillion", "trillions"],
        }
    }

    /// First scale (by priority) with a key occurring anywhere in `folded`
    pub fn find_substring(folded: &str) -> Option<UnitScale> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.keys().iter().any(|key| folded.contains(key)))
    }

    /// Scale named by a single case-folded word
    pub fn from_token(token: &str) -> Option<UnitScale> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.token_keys().contains(&token))
    }
}
