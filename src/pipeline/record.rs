//! Per-prompt output rows

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::generation::GenerationResult;
use crate::routing::{RoutingDecision, RoutingOutcome};
use crate::validation::NliScores;

/// One row per input prompt, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineRecord {
    pub index: usize,
    pub prompt: String,
    pub model: String,
    pub answer: String,
    pub entropy: Option<f64>,
    pub tool_flag: bool,
    pub routing_decision: RoutingDecision,
    pub fallback_model: Option<String>,
    pub contradiction_flag: bool,
    pub nli_scores: NliScores,
    pub factual_flag: Option<bool>,
    pub factual_score: Option<f64>,
    /// Seconds spent in the generation call (until the error, for failed prompts)
    pub latency: f64,
    pub error: Option<String>,
}

impl PipelineRecord {
    /// Merge a generation result with its routing outcome.
    pub fn completed(
        index: usize,
        prompt: &str,
        model: &str,
        result: GenerationResult,
        outcome: RoutingOutcome,
    ) -> Self {
        Self {
            index,
            prompt: prompt.to_string(),
            model: model.to_string(),
            answer: result.text,
            entropy: result.entropy,
            tool_flag: result.tool_flag,
            fallback_model: outcome.decision.fallback_model().map(str::to_string),
            routing_decision: outcome.decision,
            contradiction_flag: outcome.verdict.contradiction_flag,
            nli_scores: outcome.verdict.nli_scores,
            factual_flag: outcome.verdict.factual_flag,
            factual_score: outcome.verdict.factual_score,
            latency: result.latency,
            error: None,
        }
    }

    /// Row for a prompt whose generation call failed.
    pub fn errored(index: usize, prompt: &str, model: &str, latency: f64, error: String) -> Self {
        Self {
            index,
            prompt: prompt.to_string(),
            model: model.to_string(),
            answer: String::new(),
            entropy: None,
            tool_flag: false,
            routing_decision: RoutingDecision::Error,
            fallback_model: None,
            contradiction_flag: false,
            nli_scores: NliScores::new(),
            factual_flag: None,
            factual_score: None,
            latency,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.routing_decision == RoutingDecision::Error
    }
}

/// Write records as JSON Lines, one object per record.
pub fn write_records_jsonl(path: &Path, records: &[PipelineRecord]) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
