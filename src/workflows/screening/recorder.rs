use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{TransactionDraft, TransactionLogEntry};
use super::repository::{RepositoryError, ScreeningRepository};

/// Appends stage-transition audit records with a server-assigned creation
/// timestamp. Append-only: repeated screening runs for the same interview
/// produce one entry each, never deduplicated.
pub struct TransactionRecorder<R> {
    repository: Arc<R>,
}

impl<R: ScreeningRepository> TransactionRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn record(&self, draft: TransactionDraft) -> Result<(), RepositoryError> {
        let entry = TransactionLogEntry {
            interview_id: draft.interview_id,
            from_stage: draft.from_stage,
            to_stage: draft.to_stage,
            action: draft.action,
            actor: draft.actor,
            created_at: Utc::now(),
        };

        info!(
            interview = %entry.interview_id.0,
            action = entry.action.label(),
            "recording stage transition"
        );
        self.repository.append_history(entry)
    }
}
