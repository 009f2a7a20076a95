//! Normalized price values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price expressed in base currency units (rupees)
///
/// Exact values are kept as integers; anything with a fractional part stays
/// floating point. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedPrice {
    Integer(u64),
    Float(f64),
}

impl NormalizedPrice {
    /// Build from a product, collapsing to an integer when it is exact
    ///
    /// Returns `None` for negative or non-finite input.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        if value.fract() == 0.0 && value < u64::MAX as f64 {
            Some(Self::Integer(value as u64))
        } else {
            Some(Self::Float(value))
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl fmt::Display for NormalizedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_value_becomes_integer() {
        assert_eq!(
            NormalizedPrice::from_f64(7_500_000.0),
            Some(NormalizedPrice::Integer(7_500_000))
        );
    }

    #[test]
    fn test_fractional_value_stays_float() {
        let price = NormalizedPrice::from_f64(12.5).unwrap();
        assert!(!price.is_integer());
        assert_eq!(price.as_f64(), 12.5);
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert_eq!(NormalizedPrice::from_f64(-1.0), None);
        assert_eq!(NormalizedPrice::from_f64(f64::NAN), None);
        assert_eq!(NormalizedPrice::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&NormalizedPrice::Integer(12_000_000)).unwrap();
        assert_eq!(json, "12000000");

        let json = serde_json::to_string(&NormalizedPrice::Float(1.5)).unwrap();
        assert_eq!(json, "1.5");

        let parsed: NormalizedPrice = serde_json::from_str("9500000").unwrap();
        assert_eq!(parsed, NormalizedPrice::Integer(9_500_000));
    }
}
