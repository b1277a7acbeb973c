use chrono::{DateTime, Utc};

use super::domain::{
    ApplicantRecord, InterviewId, InterviewRecord, PostingId, PostingPolicy, ScreeningUpdate,
    TransactionLogEntry,
};

/// Storage abstraction over the interview, CV, posting, and history stores so
/// the screening service can be exercised in isolation.
pub trait ScreeningRepository: Send + Sync {
    fn find_interview(
        &self,
        id: &InterviewId,
        email: &str,
    ) -> Result<Option<InterviewRecord>, RepositoryError>;

    fn find_cv(&self, email: &str) -> Result<Option<ApplicantRecord>, RepositoryError>;

    fn find_posting(&self, id: &PostingId) -> Result<Option<PostingPolicy>, RepositoryError>;

    /// Global screening instructions shared by every posting.
    fn global_instructions(&self) -> Result<String, RepositoryError>;

    fn apply_update(
        &self,
        id: &InterviewId,
        update: &ScreeningUpdate,
    ) -> Result<(), RepositoryError>;

    /// Append-only: prior entries are never edited or removed.
    fn append_history(&self, entry: TransactionLogEntry) -> Result<(), RepositoryError>;

    fn touch_posting_activity(
        &self,
        id: &PostingId,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
