//! Prompt dataset loading
//!
//! Accepts `.csv` with a header row (TruthfulQA layout), `.json` (array of
//! strings or objects), `.jsonl` (one string or object per line) and
//! anything else as plain text with one prompt per non-blank line. CSV rows
//! and objects contribute their `Question`, `question` or `prompt` field.

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prompts used when no dataset is given.
pub const SAMPLE_PROMPTS: &[&str] = &[
    "Explain the concept of quantum entanglement in simple terms.",
    "Write a short story about a detective who solves a case using only AI.",
    "What are the main differences between Python and Java?",
    "Describe the economic impact of renewable energy.",
    "Write a haiku about recursion in programming.",
];

const QUESTION_FIELDS: &[&str] = &["Question", "question", "prompt"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path} at entry {entry}: {source}")]
    Parse {
        path: PathBuf,
        entry: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Entry {entry} in {path} has no question field (expected one of Question, question, prompt)")]
    MissingQuestion { path: PathBuf, entry: usize },

    #[error("Dataset {0} contains no prompts")]
    Empty(PathBuf),
}

pub fn sample_prompts() -> Vec<String> {
    SAMPLE_PROMPTS.iter().map(|p| p.to_string()).collect()
}

/// Load prompts from `path`, choosing the format by extension.
pub fn load_prompts(path: &Path) -> Result<Vec<String>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let prompts = match extension.as_deref() {
        Some("csv") => parse_csv(path, &content)?,
        Some("json") => parse_json(path, &content)?,
        Some("jsonl") => parse_jsonl(path, &content)?,
        _ => content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    };

    if prompts.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), count = prompts.len(), "Loaded prompts");
    Ok(prompts)
}

/// Rows keyed by header. Blank questions are skipped, as TruthfulQA exports
/// sometimes end with empty rows.
fn parse_csv(path: &Path, content: &str) -> Result<Vec<String>, DatasetError> {
    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(csv_error)?;
    let Some(column) = QUESTION_FIELDS
        .iter()
        .find(|field| headers.iter().any(|h| h.trim() == **field))
    else {
        return Err(DatasetError::MissingQuestion {
            path: path.to_path_buf(),
            entry: 0,
        });
    };

    let mut prompts = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        let row = row.map_err(csv_error)?;
        if let Some(question) = row
            .iter()
            .find(|(header, _)| header.trim() == *column)
            .map(|(_, value)| value.trim())
            .filter(|q| !q.is_empty())
        {
            prompts.push(question.to_string());
        }
    }
    Ok(prompts)
}

fn parse_json(path: &Path, content: &str) -> Result<Vec<String>, DatasetError> {
    let value: Value = serde_json::from_str(content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        entry: 0,
        source,
    })?;

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| prompt_from(path, i, item))
            .collect(),
        other => Ok(vec![prompt_from(path, 0, &other)?]),
    }
}

fn parse_jsonl(path: &Path, content: &str) -> Result<Vec<String>, DatasetError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let value: Value = serde_json::from_str(line).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                entry: i,
                source,
            })?;
            prompt_from(path, i, &value)
        })
        .collect()
}

fn prompt_from(path: &Path, entry: usize, value: &Value) -> Result<String, DatasetError> {
    let text = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => QUESTION_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str)),
        _ => None,
    };

    text.map(str::to_string)
        .ok_or_else(|| DatasetError::MissingQuestion {
            path: path.to_path_buf(),
            entry,
        })
}
