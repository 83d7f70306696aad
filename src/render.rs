// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain-text and JSON rendering of analysis reports and capability status

use crate::capabilities::{Capabilities, CapabilityReport, CapabilityStatus};
use crate::intelligence::{AnalysisReport, PredictionOutcome, SuggestionOutcome};
use crate::models::AiSuggestions;
use std::fmt::{self, Write};

/// Run a writer against a fresh `String`; formatting into a `String` cannot fail
fn render_with<F>(write: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    write(&mut out).ok();
    out
}

/// Render a report as text
pub fn render_report(report: &AnalysisReport) -> String {
    render_with(|out| write_report(out, report))
}

fn write_report(out: &mut impl Write, report: &AnalysisReport) -> fmt::Result {
    writeln!(
        out,
        "Lifestyle analysis {} ({})",
        report.id,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    writeln!(out, "BMI: {:.2}", report.metrics.bmi)?;
    match &report.prediction {
        PredictionOutcome::Predicted { score } => {
            writeln!(out, "Predicted lifestyle score: {score:.2}")?
        }
        PredictionOutcome::Unavailable { .. } => {
            writeln!(out, "Predicted lifestyle score: unavailable")?
        }
        PredictionOutcome::Failed { error } => {
            writeln!(out, "Predicted lifestyle score: failed ({error})")?
        }
    }
    writeln!(
        out,
        "Heuristic score: {:.2}",
        report.recommendations.heuristic_score
    )?;

    writeln!(out)?;
    writeln!(out, "Recommendations:")?;
    for message in report.recommendations.messages() {
        writeln!(out, "- {message}")?;
    }

    writeln!(out)?;
    match &report.suggestions {
        SuggestionOutcome::Generated { suggestions } => write_suggestions(out, suggestions),
        SuggestionOutcome::Unavailable { reason } => {
            writeln!(out, "AI suggestions unavailable: {reason}")
        }
        SuggestionOutcome::Failed { error } => {
            writeln!(out, "Could not generate AI suggestions: {error}")
        }
    }
}

fn write_suggestions(out: &mut impl Write, suggestions: &AiSuggestions) -> fmt::Result {
    match suggestions {
        AiSuggestions::SearchQueries(items) if items.is_empty() => {
            writeln!(out, "AI suggestions: no search queries could be read from the reply")
        }
        AiSuggestions::SearchQueries(items) => {
            writeln!(out, "Recommended videos:")?;
            for item in items {
                writeln!(out, "- [{}]({})", item.query, item.url)?;
            }
            Ok(())
        }
        AiSuggestions::Advice(text) => {
            writeln!(out, "AI tips:")?;
            writeln!(out, "{}", text.trim_end())
        }
    }
}

/// Render a report as pretty-printed JSON
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Persistent warnings for unavailable capabilities, one block per capability
pub fn render_warnings(capabilities: &Capabilities) -> String {
    render_with(|out| {
        for report in capabilities
            .report()
            .iter()
            .filter(|report| report.status == CapabilityStatus::Unavailable)
        {
            writeln!(out, "⚠️ {}", report.message)?;
            write_hint(out, report)?;
        }
        Ok(())
    })
}

/// Render the `status` view
pub fn render_status(capabilities: &Capabilities) -> String {
    render_with(|out| {
        writeln!(out, "Session: {:?}", capabilities.session_status())?;
        for report in capabilities.report() {
            write_capability(out, &report)?;
        }
        Ok(())
    })
}

fn write_capability(out: &mut impl Write, report: &CapabilityReport) -> fmt::Result {
    let marker = match report.status {
        CapabilityStatus::Available => "✅",
        CapabilityStatus::Unavailable => "⚠️",
    };
    writeln!(out, "{marker} {}: {}", report.name, report.message)?;
    write_hint(out, report)
}

fn write_hint(out: &mut impl Write, report: &CapabilityReport) -> fmt::Result {
    match &report.hint {
        Some(hint) => writeln!(out, "   {hint}"),
        None => Ok(()),
    }
}
