//! Command implementations

use anyhow::{Context, Result};
use listing_ner_config::Settings;
use listing_ner_core::{EntityLabel, NormalizedPrice};
use listing_ner_text_processing::{
    Corpus, EnrichmentPipeline, IssueKind, PriceNormalizer, RecognizedDocument, ValidationIssue,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, Write};
use std::path::Path;

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn pipeline(settings: &Settings) -> EnrichmentPipeline {
    EnrichmentPipeline::new(PriceNormalizer::with_config(
        settings.normalizer.price_config(),
    ))
}

#[derive(Debug, Serialize)]
pub struct NormalizedMention<'a> {
    pub text: &'a str,
    pub value: Option<NormalizedPrice>,
}

/// Print one `{text, value}` line per mention
pub fn normalize<W: Write>(settings: &Settings, texts: &[String], out: &mut W) -> Result<()> {
    let normalizer = PriceNormalizer::with_config(settings.normalizer.price_config());
    for text in texts {
        let value = normalizer.normalize(text);
        match value {
            Some(v) => tracing::debug!(text = %text, value = %v, "Price normalized"),
            None => tracing::warn!(text = %text, "Price mention not recognized"),
        }
        write_json(out, &NormalizedMention { text, value }, settings.output.pretty)?;
    }
    Ok(())
}

/// Enrich JSON-lines recognizer output; returns the number of documents written
pub fn enrich<R: BufRead, W: Write>(settings: &Settings, input: R, out: &mut W) -> Result<usize> {
    let pipeline = pipeline(settings);
    let config = pipeline.normalizer().config();
    tracing::debug!(
        unit_matching = ?config.unit_matching,
        sum_compound = config.sum_compound,
        "Enriching recognizer output"
    );
    let mut written = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let document: RecognizedDocument = serde_json::from_str(&line)
            .with_context(|| format!("Invalid document on line {}", index + 1))?;
        let enriched = pipeline
            .enrich(&document)
            .with_context(|| format!("Cannot enrich document on line {}", index + 1))?;
        write_json(out, &enriched, settings.output.pretty)?;
        written += 1;
    }

    tracing::info!(documents = written, "Enrichment complete");
    Ok(written)
}

#[derive(Debug, Serialize)]
pub struct CorpusPrice {
    pub example: usize,
    pub text: String,
    pub value: Option<NormalizedPrice>,
}

#[derive(Debug, Serialize)]
pub struct CorpusSummary {
    pub examples: usize,
    pub spans: usize,
    pub labels: BTreeSet<EntityLabel>,
    pub issue_counts: BTreeMap<IssueKind, usize>,
    pub issues: Vec<ValidationIssue>,
    pub prices: Vec<CorpusPrice>,
}

impl CorpusSummary {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the run must exit non-zero: issues found with `fail_on_issues` set
    pub fn fails(&self, settings: &Settings) -> bool {
        settings.corpus.fail_on_issues && !self.is_clean()
    }
}

/// Validate a corpus file and summarize labels, issues and gold prices
pub fn validate<W: Write>(settings: &Settings, path: &Path, out: &mut W) -> Result<CorpusSummary> {
    let corpus = Corpus::load(path)
        .with_context(|| format!("Failed to load corpus from {}", path.display()))?;
    let report = corpus.validate();
    tracing::info!(
        labels = corpus.labels().len(),
        price_mentions = corpus.price_mentions().len(),
        issues = report.issues.len(),
        "Corpus checked"
    );

    // Examples with spans that do not fit are skipped; they are already issues
    let prices = pipeline(settings)
        .enrich_corpus(&corpus)
        .into_iter()
        .flat_map(|(example, doc)| {
            doc.entities
                .into_iter()
                .filter(|entity| entity.label.is_price())
                .map(move |entity| CorpusPrice {
                    example,
                    text: entity.text,
                    value: entity.normalized,
                })
        })
        .collect();

    let summary = CorpusSummary {
        examples: report.examples,
        spans: report.spans,
        labels: corpus.labels(),
        issue_counts: report.count_by_kind(),
        issues: report.issues,
        prices,
    };
    write_json(out, &summary, settings.output.pretty)?;
    Ok(summary)
}

/// Print the effective settings as TOML
pub fn show_config<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let rendered = toml::to_string_pretty(settings).context("Failed to render settings")?;
    out.write_all(rendered.as_bytes())?;
    Ok(())
}
