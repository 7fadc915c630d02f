use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed telemetry line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Counts folded out of `telemetry.jsonl`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TelemetrySummary {
    pub turns: usize,
    pub games: usize,
    pub avg_elapsed_ms: Option<f64>,
    pub avg_score: Option<f64>,
    pub fail_losses: usize,
    /// `hanabi_bot::decision` events, present only with decision details on.
    pub decision_details: usize,
    pub reasons: BTreeMap<String, usize>,
    pub actions: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct LogLine {
    #[serde(default)]
    target: String,
    #[serde(default)]
    fields: EventFields,
}

#[derive(Default, Deserialize)]
struct EventFields {
    reason: Option<String>,
    action_kind: Option<String>,
    elapsed_ms: Option<f64>,
    score: Option<f64>,
    lost_to_fails: Option<bool>,
}

pub fn summarise(path: &Path) -> Result<TelemetrySummary, TelemetryError> {
    let reader = BufReader::new(File::open(path)?);
    let mut summary = TelemetrySummary::default();
    let mut elapsed = Vec::new();
    let mut scores = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: LogLine = serde_json::from_str(&line).map_err(|source| TelemetryError::Json {
            line: index + 1,
            source,
        })?;
        let fields = entry.fields;
        match entry.target.as_str() {
            "hanabi_bench::turn" => {
                summary.turns += 1;
                elapsed.extend(fields.elapsed_ms);
                bump(&mut summary.reasons, fields.reason);
                bump(&mut summary.actions, fields.action_kind);
            }
            "hanabi_bench::game" => {
                summary.games += 1;
                scores.extend(fields.score);
                if fields.lost_to_fails == Some(true) {
                    summary.fail_losses += 1;
                }
            }
            "hanabi_bot::decision" => summary.decision_details += 1,
            _ => {}
        }
    }

    summary.avg_elapsed_ms = average(&elapsed);
    summary.avg_score = average(&scores);
    Ok(summary)
}

/// Writes the JSON summary and appends a telemetry section to `summary.md`.
pub fn write_outputs(
    summary: &TelemetrySummary,
    json_path: &Path,
    markdown_path: &Path,
) -> Result<(), TelemetryError> {
    let json = serde_json::to_vec_pretty(summary)
        .map_err(|source| TelemetryError::Json { line: 0, source })?;
    fs::write(json_path, json)?;

    let mut section = String::from("\n## Telemetry\n\n");
    section.push_str(&format!(
        "- {} turn events over {} games ({} lost to fails)\n",
        summary.turns, summary.games, summary.fail_losses
    ));
    if let Some(ms) = summary.avg_elapsed_ms {
        section.push_str(&format!("- Avg decision time: {ms:.3} ms\n"));
    }
    if let Some(score) = summary.avg_score {
        section.push_str(&format!("- Avg logged score: {score:.2}\n"));
    }
    section.push_str("\n| Reason | Turns |\n|--------|-------|\n");
    for (reason, count) in &summary.reasons {
        section.push_str(&format!("| {reason} | {count} |\n"));
    }

    let mut file = OpenOptions::new().append(true).open(markdown_path)?;
    file.write_all(section.as_bytes())?;
    Ok(())
}

fn bump(counts: &mut BTreeMap<String, usize>, key: Option<String>) {
    let key = key
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| "<unset>".to_string());
    *counts.entry(key).or_default() += 1;
}

fn average(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
