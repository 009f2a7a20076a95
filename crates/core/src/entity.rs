//! Entity labels, spans and annotated examples
//!
//! Offsets are counted in characters (Unicode scalar values), end exclusive,
//! matching the annotation format the recognizer is trained on. Use
//! [`char_slice`] rather than byte slicing: listing text routinely contains
//! `₹`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity label assigned by the recognizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    /// Unit layout such as `2BHK` or `1RK`
    Configuration,
    Location,
    Price,
    Developer,
    /// Built-up or plot area such as `1500 sqft`
    Area,
    /// Any label outside the listing schema
    Custom(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Configuration => "CONFIGURATION",
            Self::Location => "LOCATION",
            Self::Price => "PRICE",
            Self::Developer => "DEVELOPER",
            Self::Area => "AREA",
            Self::Custom(name) => name,
        }
    }

    pub fn is_price(&self) -> bool {
        matches!(self, Self::Price)
    }
}

impl From<String> for EntityLabel {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "CONFIGURATION" => Self::Configuration,
            "LOCATION" => Self::Location,
            "PRICE" => Self::Price,
            "DEVELOPER" => Self::Developer,
            "AREA" => Self::Area,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        match label {
            EntityLabel::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeled character range within a sentence
///
/// Serialized as a `[start, end, "LABEL"]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(usize, usize, EntityLabel)",
    into = "(usize, usize, EntityLabel)"
)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: impl Into<EntityLabel>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Text covered by this span, if the offsets fit `text`
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        char_slice(text, self.start, self.end)
    }
}

impl From<(usize, usize, EntityLabel)> for EntitySpan {
    fn from((start, end, label): (usize, usize, EntityLabel)) -> Self {
        Self { start, end, label }
    }
}

impl From<EntitySpan> for (usize, usize, EntityLabel) {
    fn from(span: EntitySpan) -> Self {
        (span.start, span.end, span.label)
    }
}

/// A sentence with its gold entity annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedExample {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedExample {
    pub fn new(text: impl Into<String>, entities: Vec<EntitySpan>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Iterate `(span, covered text)` pairs, skipping spans that do not fit
    pub fn spans(&self) -> impl Iterator<Item = (&EntitySpan, &str)> {
        self.entities
            .iter()
            .filter_map(move |span| span.text(&self.text).map(|t| (span, t)))
    }
}

/// Slice `text` by character offsets, end exclusive
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let mut offsets = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let begin = offsets.nth(start)?;
    let finish = if end == start {
        begin
    } else {
        offsets.nth(end - start - 1)?
    };
    Some(&text[begin..finish])
}

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
