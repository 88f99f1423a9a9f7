//! Plain-text rendering of API results.
//!
//! Confidence prints with one decimal (`87.0%`), similarity as a rounded
//! whole percentage (`90%`). Lists keep the order the server sent.

use std::fmt::{self, Write};

use reqclass_core::{
    AnalysisResult, BatchClassificationReport, ClassificationResult, ClassifiedRequirement,
    RequirementType, SearchResult, SimilarRequirement,
};

const MAX_TEXT: usize = 60;

// ── Formatting ──

pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn similarity_percent(similarity: f64) -> String {
    format!("{}%", (similarity * 100.0).round() as i64)
}

fn label(kind: RequirementType) -> &'static str {
    match kind {
        RequirementType::Functional => "Functional Requirement",
        RequirementType::NonFunctional => "NonFunctional Requirement",
    }
}

fn shorten(text: &str) -> String {
    if text.chars().count() > MAX_TEXT {
        let head: String = text.chars().take(MAX_TEXT - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

// ── Sections ──

pub fn write_classification(out: &mut impl Write, result: &ClassificationResult) -> fmt::Result {
    writeln!(out, "Classification Result")?;
    writeln!(out, "  {:<26} {}", "Type", label(result.kind))?;
    writeln!(
        out,
        "  {:<26} {}",
        "Confidence",
        confidence_percent(result.confidence)
    )?;
    writeln!(out)
}

pub fn write_similar(
    out: &mut impl Write,
    header: &str,
    items: &[SimilarRequirement],
) -> fmt::Result {
    writeln!(out, "{header} ({})", items.len())?;
    if items.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in items {
        writeln!(
            out,
            "  [{:>4}] {}",
            similarity_percent(item.similarity),
            item.text
        )?;
        if let Some(id) = &item.id {
            writeln!(out, "         ID: {id}")?;
        }
    }
    writeln!(out)
}

pub fn write_analysis(out: &mut impl Write, result: &AnalysisResult) -> fmt::Result {
    write_classification(out, &result.classification)?;
    write_similar(out, "Similar Requirements", &result.similar_requirements)
}

pub fn write_search(out: &mut impl Write, result: &SearchResult) -> fmt::Result {
    write_similar(out, "Search Results", &result.requirements)
}

pub fn write_batch_report(out: &mut impl Write, report: &BatchClassificationReport) -> fmt::Result {
    writeln!(out, "Classification Results")?;
    writeln!(out, "  {:<30} {}", "Total Requirements", report.total_count)?;
    writeln!(out, "  {:<30} {}", "Functional Requirements", report.fr_count)?;
    writeln!(out, "  {:<30} {}", "Non-Functional Requirements", report.nfr_count)?;
    writeln!(out)?;

    write_table(out, "Functional Requirements", &report.functional_requirements)?;
    write_table(
        out,
        "Non-Functional Requirements",
        &report.non_functional_requirements,
    )
}

fn write_table(out: &mut impl Write, header: &str, rows: &[ClassifiedRequirement]) -> fmt::Result {
    writeln!(out, "{header}")?;
    writeln!(
        out,
        "  {:<width$} {:>10}",
        "Requirement",
        "Confidence",
        width = MAX_TEXT
    )?;
    for row in rows {
        writeln!(
            out,
            "  {:<width$} {:>10}",
            shorten(&row.requirement),
            confidence_percent(row.confidence),
            width = MAX_TEXT
        )?;
    }
    writeln!(out)
}
