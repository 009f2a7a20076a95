//! Span enrichment pipeline
//!
//! Takes recognizer output (a sentence plus labeled character spans) and
//! produces JSON-ready records: span text, offsets, label, and for `PRICE`
//! spans the normalized value in rupees.

use crate::corpus::Corpus;
use crate::price::PriceNormalizer;
use listing_ner_core::{
    char_len, char_slice, AnnotatedExample, EntityLabel, Error, NormalizedPrice, Result,
};
use serde::{Deserialize, Serialize};

/// A span as emitted by the recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    /// Span text; sliced from the document when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A sentence with its recognized spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedDocument {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<RecognizedEntity>,
}

impl From<&AnnotatedExample> for RecognizedDocument {
    fn from(example: &AnnotatedExample) -> Self {
        Self {
            text: example.text.clone(),
            entities: example
                .entities
                .iter()
                .map(|span| RecognizedEntity {
                    start: span.start,
                    end: span.end,
                    label: span.label.clone(),
                    text: None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEntity {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<NormalizedPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDocument {
    pub text: String,
    pub entities: Vec<EnrichedEntity>,
}

impl EnrichedDocument {
    /// Normalized values of the recognized `PRICE` spans, in order
    pub fn prices(&self) -> impl Iterator<Item = NormalizedPrice> + '_ {
        self.entities.iter().filter_map(|entity| entity.normalized)
    }
}

pub struct EnrichmentPipeline {
    normalizer: PriceNormalizer,
}

impl Default for EnrichmentPipeline {
    fn default() -> Self {
        Self::new(PriceNormalizer::new())
    }
}

impl EnrichmentPipeline {
    pub fn new(normalizer: PriceNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &PriceNormalizer {
        &self.normalizer
    }

    /// Enrich every span of a recognized document
    ///
    /// Fails with [`Error::InvalidSpan`] when a span does not fit the text.
    pub fn enrich(&self, document: &RecognizedDocument) -> Result<EnrichedDocument> {
        let len = char_len(&document.text);
        let entities = document
            .entities
            .iter()
            .map(|entity| self.enrich_entity(&document.text, len, entity))
            .collect::<Result<Vec<_>>>()?;

        Ok(EnrichedDocument {
            text: document.text.clone(),
            entities,
        })
    }

    fn enrich_entity(
        &self,
        text: &str,
        len: usize,
        entity: &RecognizedEntity,
    ) -> Result<EnrichedEntity> {
        let invalid = || Error::InvalidSpan {
            start: entity.start,
            end: entity.end,
            len,
        };
        if entity.start > entity.end || entity.end > len {
            return Err(invalid());
        }

        let covered = match &entity.text {
            Some(t) => t.clone(),
            None => char_slice(text, entity.start, entity.end)
                .ok_or_else(invalid)?
                .to_string(),
        };

        let normalized = if entity.label.is_price() {
            let value = self.normalizer.normalize(&covered);
            if value.is_none() {
                tracing::debug!(text = %covered, "Price span not recognized");
            }
            value
        } else {
            None
        };

        Ok(EnrichedEntity {
            text: covered,
            start: entity.start,
            end: entity.end,
            label: entity.label.clone(),
            normalized,
        })
    }

    /// Enrich the gold annotations of a corpus
    ///
    /// Returns `(example index, document)` pairs. Examples whose spans do not
    /// fit are skipped with a warning.
    pub fn enrich_corpus(&self, corpus: &Corpus) -> Vec<(usize, EnrichedDocument)> {
        corpus
            .examples()
            .iter()
            .enumerate()
            .filter_map(|(index, example)| {
                match self.enrich(&RecognizedDocument::from(example)) {
                    Ok(doc) => Some((index, doc)),
                    Err(e) => {
                        tracing::warn!(example = index, error = %e, "Skipping example");
                        None
                    }
                }
            })
            .collect()
    }
}
