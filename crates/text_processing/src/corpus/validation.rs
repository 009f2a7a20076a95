//! Span checks for annotated examples

use listing_ner_core::{AnnotatedExample, EntitySpan};
use serde::Serialize;
use std::collections::BTreeMap;

/// Problem found with a gold span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Empty, reversed, or past the end of the sentence
    OutOfBounds,
    /// A boundary cuts through a word
    Misaligned,
    /// Shares characters with an earlier span of the same sentence
    Overlapping,
    /// Starts or ends on whitespace
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Index of the example in the corpus
    pub example: usize,
    pub span: EntitySpan,
    pub kind: IssueKind,
    /// Text the span covers, when its offsets fit
    pub covered: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub examples: usize,
    pub spans: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_by_kind(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Issues for one example
    pub fn for_example(&self, example: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.example == example)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// A boundary at `pos` is inside a word when word characters sit on both sides
fn splits_word(chars: &[char], pos: usize) -> bool {
    pos > 0 && pos < chars.len() && is_word_char(chars[pos - 1]) && is_word_char(chars[pos])
}

fn check_span(chars: &[char], span: &EntitySpan, earlier: &[EntitySpan]) -> Vec<IssueKind> {
    if span.start >= span.end || span.end > chars.len() {
        return vec![IssueKind::OutOfBounds];
    }

    let mut kinds = Vec::new();
    if splits_word(chars, span.start) || splits_word(chars, span.end) {
        kinds.push(IssueKind::Misaligned);
    }
    if chars[span.start].is_whitespace() || chars[span.end - 1].is_whitespace() {
        kinds.push(IssueKind::Whitespace);
    }
    if earlier.iter().any(|other| other.overlaps(span)) {
        kinds.push(IssueKind::Overlapping);
    }
    kinds
}

pub(super) fn validate(examples: &[AnnotatedExample]) -> ValidationReport {
    let mut report = ValidationReport {
        examples: examples.len(),
        ..Default::default()
    };

    for (index, example) in examples.iter().enumerate() {
        let chars: Vec<char> = example.text.chars().collect();
        for (position, span) in example.entities.iter().enumerate() {
            report.spans += 1;
            for kind in check_span(&chars, span, &example.entities[..position]) {
                let covered = span.text(&example.text).map(str::to_string);
                tracing::warn!(
                    example = index,
                    start = span.start,
                    end = span.end,
                    label = %span.label,
                    covered = covered.as_deref().unwrap_or(""),
                    kind = ?kind,
                    "Invalid entity span"
                );
                report.issues.push(ValidationIssue {
                    example: index,
                    span: span.clone(),
                    kind,
                    covered,
                });
            }
        }
    }

    tracing::debug!(
        examples = report.examples,
        spans = report.spans,
        issues = report.issues.len(),
        "Corpus validation complete"
    );
    report
}
