//! Text processing for listing entity output
//!
//! This crate post-processes spans produced by an external entity recognizer:
//! - **Price Normalization**: Convert mentions like `₹1.2 crore` or `95L` to rupees
//! - **Corpus Validation**: Check annotated training sentences before they reach the trainer
//! - **Enrichment**: Attach normalized prices to recognized spans for JSON output
//!
//! # Example
//!
//! ```
//! use listing_ner_text_processing::price::normalize;
//! use listing_ner_core::NormalizedPrice;
//!
//! assert_eq!(normalize("75 lacs"), Some(NormalizedPrice::Integer(7_500_000)));
//! assert_eq!(normalize("not a price"), None);
//! ```

pub mod corpus;
pub mod pipeline;
pub mod price;

pub use corpus::{Corpus, IssueKind, ValidationIssue, ValidationReport};
pub use pipeline::{
    EnrichedDocument, EnrichedEntity, EnrichmentPipeline, RecognizedDocument, RecognizedEntity,
};
pub use price::{normalize, PriceConfig, PriceNormalizer, UnitMatching, UnitScale};
