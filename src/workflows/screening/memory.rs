//! In-memory repository used for serving demos and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::domain::{
    ApplicantRecord, InterviewId, InterviewRecord, PostingId, PostingPolicy, ScreeningUpdate,
    TransactionLogEntry,
};
use super::repository::{RepositoryError, ScreeningRepository};

const DEFAULT_INSTRUCTIONS: &str =
    "Compare the applicant's experience, skills, and education against the job description \
     and classify the overall fit.";

#[derive(Clone)]
pub struct InMemoryScreeningRepository {
    interviews: Arc<Mutex<HashMap<InterviewId, InterviewRecord>>>,
    cvs: Arc<Mutex<HashMap<String, ApplicantRecord>>>,
    postings: Arc<Mutex<HashMap<PostingId, PostingPolicy>>>,
    instructions: Arc<Mutex<String>>,
    history: Arc<Mutex<Vec<TransactionLogEntry>>>,
}

impl Default for InMemoryScreeningRepository {
    fn default() -> Self {
        Self {
            interviews: Arc::default(),
            cvs: Arc::default(),
            postings: Arc::default(),
            instructions: Arc::new(Mutex::new(DEFAULT_INSTRUCTIONS.to_string())),
            history: Arc::default(),
        }
    }
}

impl InMemoryScreeningRepository {
    pub fn insert_interview(&self, record: InterviewRecord) {
        let mut guard = self.interviews.lock().expect("interview mutex poisoned");
        guard.insert(record.interview_id.clone(), record);
    }

    pub fn insert_cv(&self, record: ApplicantRecord) {
        let mut guard = self.cvs.lock().expect("cv mutex poisoned");
        guard.insert(record.email.clone(), record);
    }

    pub fn insert_posting(&self, posting: PostingPolicy) {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        guard.insert(posting.id.clone(), posting);
    }

    pub fn set_instructions(&self, instructions: impl Into<String>) {
        *self.instructions.lock().expect("instructions mutex poisoned") = instructions.into();
    }

    pub fn interview(&self, id: &InterviewId) -> Option<InterviewRecord> {
        self.interviews
            .lock()
            .expect("interview mutex poisoned")
            .get(id)
            .cloned()
    }

    pub fn posting(&self, id: &PostingId) -> Option<PostingPolicy> {
        self.postings
            .lock()
            .expect("posting mutex poisoned")
            .get(id)
            .cloned()
    }

    pub fn history(&self) -> Vec<TransactionLogEntry> {
        self.history.lock().expect("history mutex poisoned").clone()
    }
}

impl ScreeningRepository for InMemoryScreeningRepository {
    fn find_interview(
        &self,
        id: &InterviewId,
        email: &str,
    ) -> Result<Option<InterviewRecord>, RepositoryError> {
        let guard = self.interviews.lock().expect("interview mutex poisoned");
        Ok(guard
            .get(id)
            .filter(|record| record.email == email)
            .cloned())
    }

    fn find_cv(&self, email: &str) -> Result<Option<ApplicantRecord>, RepositoryError> {
        let guard = self.cvs.lock().expect("cv mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn find_posting(&self, id: &PostingId) -> Result<Option<PostingPolicy>, RepositoryError> {
        let guard = self.postings.lock().expect("posting mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn global_instructions(&self) -> Result<String, RepositoryError> {
        Ok(self
            .instructions
            .lock()
            .expect("instructions mutex poisoned")
            .clone())
    }

    fn apply_update(
        &self,
        id: &InterviewId,
        update: &ScreeningUpdate,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.interviews.lock().expect("interview mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.apply(update);
        Ok(())
    }

    fn append_history(&self, entry: TransactionLogEntry) -> Result<(), RepositoryError> {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn touch_posting_activity(
        &self,
        id: &PostingId,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        let posting = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        posting.last_activity_at = Some(at);
        Ok(())
    }
}
