use crate::error::{ImportanceError, Result};
use crate::types::issue::IssueSnapshot;
use serde::{Deserialize, Serialize};

/// One document-change delivery for a single issue.
///
/// `after` is `None` when the change deleted the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    pub issue_id: String,
    #[serde(default)]
    pub after: Option<IssueSnapshot>,
}

impl ChangeEvent {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let event: ChangeEvent = serde_json::from_str(raw)
            .map_err(|e| ImportanceError::MalformedInput(e.to_string()))?;
        if event.issue_id.trim().is_empty() {
            return Err(ImportanceError::MalformedInput(
                "issue_id must not be empty".to_string(),
            ));
        }
        Ok(event)
    }
}

/// Partial update touching only the stored importance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreUpdateCommand {
    pub issue_id: String,
    pub importance_score: f64,
}
