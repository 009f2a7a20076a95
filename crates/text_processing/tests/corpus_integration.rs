//! Integration tests against the listing corpus shipped in data/
//!
//! `corpus.json` keeps the offsets exactly as they were first annotated;
//! `corpus.aligned.json` has the same sentences with corrected offsets.
//! `corpus.v1.json` and `corpus.v3.json` are the earlier and later revisions
//! of the training set, also with their original offsets.

use std::path::PathBuf;

use listing_ner_core::{EntityLabel, NormalizedPrice};
use listing_ner_text_processing::{
    Corpus, EnrichmentPipeline, IssueKind, PriceConfig, PriceNormalizer, UnitMatching,
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

#[test]
fn test_original_corpus_has_alignment_issues() {
    let corpus = Corpus::load(data_path("corpus.json")).unwrap();
    assert_eq!(corpus.len(), 17);

    let report = corpus.validate();
    assert_eq!(report.spans, 49);
    assert!(!report.is_clean());

    let counts = report.count_by_kind();
    assert_eq!(counts.get(&IssueKind::Misaligned), Some(&23));
    assert_eq!(counts.get(&IssueKind::Whitespace), Some(&15));
    assert_eq!(counts.get(&IssueKind::OutOfBounds), Some(&5));
    assert_eq!(counts.get(&IssueKind::Overlapping), None);
}

#[test]
fn test_label_registry() {
    let corpus = Corpus::load(data_path("corpus.json")).unwrap();
    let labels = corpus.labels();
    assert_eq!(labels.len(), 5);
    for label in [
        EntityLabel::Configuration,
        EntityLabel::Location,
        EntityLabel::Price,
        EntityLabel::Developer,
        EntityLabel::Area,
    ] {
        assert!(labels.contains(&label), "missing {}", label);
    }
}

#[test]
fn test_aligned_corpus_is_clean() {
    let corpus = Corpus::load(data_path("corpus.aligned.json")).unwrap();
    let report = corpus.validate();
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(corpus.price_mentions().len(), 10);
}

#[test]
fn test_aligned_corpus_prices() {
    let corpus = Corpus::load(data_path("corpus.aligned.json")).unwrap();
    let docs = EnrichmentPipeline::default().enrich_corpus(&corpus);
    assert_eq!(docs.len(), 17);

    let prices: Vec<(usize, NormalizedPrice)> = docs
        .iter()
        .flat_map(|(index, doc)| doc.prices().map(move |p| (*index, p)))
        .collect();

    assert_eq!(
        prices,
        vec![
            (0, NormalizedPrice::Integer(15_000_000)),
            (1, NormalizedPrice::Integer(8_500_000)),
            (2, NormalizedPrice::Integer(32_500_000)),
            (4, NormalizedPrice::Integer(18_000_000)),
            (7, NormalizedPrice::Integer(12_500_000)),
            (9, NormalizedPrice::Integer(7_500_000)),
            (10, NormalizedPrice::Integer(45_000_000)),
            (12, NormalizedPrice::Integer(2_500_000)),
            (13, NormalizedPrice::Integer(10_000_000)),
            // "1 crore 20 lakhs": single scale, lakh keys checked first
            (15, NormalizedPrice::Integer(100_000)),
        ]
    );
}

#[test]
fn test_compound_price_with_token_matching() {
    let corpus = Corpus::load(data_path("corpus.aligned.json")).unwrap();
    let pipeline = EnrichmentPipeline::new(PriceNormalizer::with_config(PriceConfig {
        unit_matching: UnitMatching::Token,
        sum_compound: true,
    }));

    let docs = pipeline.enrich_corpus(&corpus);
    let (_, compound) = docs.iter().find(|(index, _)| *index == 15).unwrap();
    assert_eq!(
        compound.prices().next(),
        Some(NormalizedPrice::Integer(12_000_000))
    );
}

#[test]
fn test_earlier_corpus_revisions() {
    let v1 = Corpus::load(data_path("corpus.v1.json")).unwrap();
    let report = v1.validate();
    assert_eq!((v1.len(), report.spans), (13, 28));
    let counts = report.count_by_kind();
    assert_eq!(counts.get(&IssueKind::Misaligned), Some(&20));
    assert_eq!(counts.get(&IssueKind::Whitespace), Some(&13));
    assert_eq!(counts.get(&IssueKind::OutOfBounds), Some(&2));

    let v3 = Corpus::load(data_path("corpus.v3.json")).unwrap();
    let report = v3.validate();
    assert_eq!((v3.len(), report.spans), (17, 50));
    let counts = report.count_by_kind();
    assert_eq!(counts.get(&IssueKind::Misaligned), Some(&23));
    assert_eq!(counts.get(&IssueKind::Whitespace), Some(&15));
    assert_eq!(counts.get(&IssueKind::OutOfBounds), Some(&7));

    assert_eq!(v1.labels(), v3.labels());
}
