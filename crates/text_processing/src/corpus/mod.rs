//! Annotated training corpus
//!
//! A corpus is a list of sentences with gold `[start, end, "LABEL"]` spans,
//! stored as JSON or YAML:
//!
//! ```json
//! [
//!   { "text": "1BHK for 75 lacs in Noida",
//!     "entities": [[0, 4, "CONFIGURATION"], [9, 16, "PRICE"], [20, 25, "LOCATION"]] }
//! ]
//! ```
//!
//! Before training, every label in the corpus is registered with the
//! recognizer ([`Corpus::labels`]) and the spans are checked for offsets the
//! recognizer cannot align ([`Corpus::validate`]).

mod validation;

pub use validation::{IssueKind, ValidationIssue, ValidationReport};

use listing_ner_core::{AnnotatedExample, EntityLabel, Error, Result};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    examples: Vec<AnnotatedExample>,
}

impl Corpus {
    pub fn new(examples: Vec<AnnotatedExample>) -> Self {
        Self { examples }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let examples = serde_yaml::from_str(yaml).map_err(|e| Error::Parse {
            format: "YAML".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(examples))
    }

    /// Load a corpus file, choosing the format from its extension
    ///
    /// `.yaml` and `.yml` are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let corpus = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::info!(
            path = %path.display(),
            examples = corpus.len(),
            "Loaded annotated corpus"
        );
        Ok(corpus)
    }

    pub fn examples(&self) -> &[AnnotatedExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Distinct labels used anywhere in the corpus
    pub fn labels(&self) -> BTreeSet<EntityLabel> {
        self.examples
            .iter()
            .flat_map(|example| example.entities.iter().map(|span| span.label.clone()))
            .collect()
    }

    /// Covered text of every `PRICE` span whose offsets fit its sentence
    pub fn price_mentions(&self) -> Vec<&str> {
        self.examples
            .iter()
            .flat_map(|example| example.spans())
            .filter(|(span, _)| span.label.is_price())
            .map(|(_, text)| text)
            .collect()
    }

    pub fn validate(&self) -> ValidationReport {
        validation::validate(&self.examples)
    }
}
