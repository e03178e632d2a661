//! Presentation helpers for front ends.
//!
//! Nothing in the resolver or chat dispatcher depends on this module; it
//! only turns their outputs into text for a terminal or JSON for tooling.

use std::fmt::Write as _;

use crate::record::Benefit;
use crate::resolver::ResolutionResult;

const SEPARATOR: &str = "---";

/// Badge line for a verdict. `model` names the oracle for unknown verdicts.
#[must_use]
pub fn badge(benefit: Benefit, model: &str) -> String {
    match benefit {
        Benefit::Beneficial => "✅ Beneficial".to_string(),
        Benefit::Harmful => "⚠ Harmful or Controversial".to_string(),
        Benefit::Unknown => format!("🤖 Information fetched from {model}"),
    }
}

/// Renders an analysis as Markdown-ish text, one section per ingredient.
#[must_use]
pub fn render_result(result: &ResolutionResult, model: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}\nResults:\n");
    for (name, record) in result.iter() {
        let _ = writeln!(out, "### {name}");
        let _ = writeln!(out, "{}", badge(record.beneficial, model));
        let _ = writeln!(out, "{}", record.description);
        if !record.alternatives.is_empty() {
            let _ = writeln!(out, "Alternatives: {}", record.alternatives.join(", "));
        }
        let _ = writeln!(out, "{SEPARATOR}");
    }
    out
}

/// Renders an analysis as a pretty-printed JSON object in input order.
///
/// # Errors
/// Propagates serialization failures.
pub fn render_json(result: &ResolutionResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
