//! Decodes the model oracle's raw completion into a structured verdict.

use serde::{Deserialize, Serialize};

use super::domain::VerdictLabel;

/// Structured verdict decoded from the model's completion. Transient: produced
/// once per screening invocation and only persisted through the fields the
/// policy engine copies into the interview update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub result: VerdictLabel,
    pub reason: String,
    pub confidence: u8,
    #[serde(rename = "jobFitScore")]
    pub job_fit_score: u8,
}

/// The completion was not the JSON object the prompt demanded. Callers must
/// not apply any state mutation on this error.
#[derive(Debug, thiserror::Error)]
#[error("model returned an invalid screening response")]
pub struct InvalidVerdictFormat(#[source] serde_json::Error);

/// Strip leading/trailing code-fence markers the model sometimes emits despite
/// the output directive.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_prefix
        .trim_start()
        .strip_suffix("```")
        .unwrap_or(without_prefix)
        .trim()
}

pub fn parse_verdict(raw: &str) -> Result<Verdict, InvalidVerdictFormat> {
    serde_json::from_str(strip_fences(raw)).map_err(InvalidVerdictFormat)
}
