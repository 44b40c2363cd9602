//! Output formatting helpers for CLI commands

use crate::pipeline::{PipelineRecord, RunReport, RunSummary};
use crate::routing::RoutingDecision;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

const PROMPT_COLUMN_CHARS: usize = 48;

/// Colored label for a routing decision
pub fn decision_label(decision: &RoutingDecision) -> String {
    match decision {
        RoutingDecision::DirectResponse => decision.as_str().green().to_string(),
        RoutingDecision::FallbackValidation { .. } => decision.as_str().yellow().to_string(),
        RoutingDecision::Error => decision.as_str().red().to_string(),
    }
}

/// Format per-prompt records as a table
pub fn format_records_table(records: &[PipelineRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#",
        "Prompt",
        "Entropy",
        "Decision",
        "Contradiction",
        "Latency",
    ]);

    for r in records {
        let entropy = r
            .entropy
            .map(|e| format!("{:.3}", e))
            .unwrap_or_else(|| "-".to_string());
        let contradiction = if r.contradiction_flag {
            "yes".red().to_string()
        } else {
            "no".to_string()
        };

        table.add_row(vec![
            Cell::new(r.index + 1),
            Cell::new(shorten(&r.prompt, PROMPT_COLUMN_CHARS)),
            Cell::new(entropy),
            Cell::new(decision_label(&r.routing_decision)),
            Cell::new(contradiction),
            Cell::new(format!("{:.0}ms", r.latency * 1000.0)),
        ]);
    }

    table.to_string()
}

/// Format the run summary as a two-column table
pub fn format_summary_table(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);

    let optional = |v: Option<f64>, unit: &str| match v {
        Some(v) => format!("{:.3}{}", v, unit),
        None => "-".to_string(),
    };

    table.add_row(vec![Cell::new("Total prompts"), Cell::new(summary.total)]);
    table.add_row(vec![Cell::new("Errors"), Cell::new(summary.errors)]);
    table.add_row(vec![
        Cell::new("Fallback decisions"),
        Cell::new(format!(
            "{} ({:.2}%)",
            summary.fallback_count,
            summary.fallback_rate * 100.0
        )),
    ]);
    table.add_row(vec![
        Cell::new("Contradictions (NLI)"),
        Cell::new(format!(
            "{} ({:.2}%)",
            summary.contradiction_count,
            summary.contradiction_rate * 100.0
        )),
    ]);
    table.add_row(vec![
        Cell::new("Average entropy"),
        Cell::new(optional(summary.avg_entropy, "")),
    ]);
    table.add_row(vec![
        Cell::new("Average latency"),
        Cell::new(optional(summary.avg_latency, "s")),
    ]);

    table.to_string()
}

/// Format a whole report as JSON
pub fn format_report_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "run_id": report.run_id,
        "started_at": report.started_at,
        "aborted": report.abort.as_ref().map(|e| e.to_string()),
        "summary": report.summary(),
        "records": report.records,
    }))
}

fn shorten(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', " ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &flat[..end]),
        None => flat,
    }
}
