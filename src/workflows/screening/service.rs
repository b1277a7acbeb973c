use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::oracle::{CompletionOracle, OracleError};

use super::domain::{Actor, InterviewId, ScreeningAnswers, ScreeningUpdate};
use super::policy::ScreeningPolicyEngine;
use super::prompt::compile_prompt;
use super::recorder::TransactionRecorder;
use super::repository::{RepositoryError, ScreeningRepository};
use super::verdict::{parse_verdict, InvalidVerdictFormat};

/// One screening invocation: one applicant, one posting.
#[derive(Debug, Clone)]
pub struct ScreeningRequest {
    pub interview_id: InterviewId,
    pub applicant_email: String,
    pub answers: Option<ScreeningAnswers>,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("no application found for the selected job")]
    ApplicationNotFound,
    #[error("no CV uploaded for this application")]
    CvNotFound,
    #[error("the job posting for this application no longer exists")]
    PostingNotFound,
    #[error(transparent)]
    InvalidVerdict(#[from] InvalidVerdictFormat),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing the prompt compiler, model oracle, policy engine, and
/// transaction recorder. Repository and oracle are injected so tests can run
/// against deterministic fakes.
pub struct CvScreeningService<R, O> {
    repository: Arc<R>,
    oracle: Arc<O>,
    engine: ScreeningPolicyEngine,
    recorder: TransactionRecorder<R>,
}

impl<R, O> CvScreeningService<R, O>
where
    R: ScreeningRepository + 'static,
    O: CompletionOracle + 'static,
{
    pub fn new(repository: Arc<R>, oracle: Arc<O>) -> Self {
        let engine = ScreeningPolicyEngine::new(Actor::screener());
        let recorder = TransactionRecorder::new(repository.clone());
        Self {
            repository,
            oracle,
            engine,
            recorder,
        }
    }

    /// Run the full screening pass for one interview and persist the outcome.
    ///
    /// No record is mutated before the verdict decodes. The status update and
    /// history append are separate writes with no atomicity between them;
    /// re-invoking the whole call is safe because the status fields are
    /// recomputed deterministically and history is append-only.
    pub async fn screen(
        &self,
        request: ScreeningRequest,
    ) -> Result<ScreeningUpdate, ScreeningError> {
        let interview = self
            .repository
            .find_interview(&request.interview_id, &request.applicant_email)?
            .ok_or(ScreeningError::ApplicationNotFound)?;

        let cv = self
            .repository
            .find_cv(&request.applicant_email)?
            .ok_or(ScreeningError::CvNotFound)?;

        let posting = self
            .repository
            .find_posting(&interview.posting_id)?
            .ok_or(ScreeningError::PostingNotFound)?;

        let instructions = self.repository.global_instructions()?;

        let prompt = compile_prompt(
            &posting,
            &cv,
            &interview.applicant_name,
            request.answers.as_ref(),
            &instructions,
        );

        let raw = self.oracle.complete(&prompt).await.map_err(|err| {
            warn!(interview = %request.interview_id.0, error = %err, "model oracle call failed");
            err
        })?;

        let verdict = parse_verdict(&raw)?;

        let now = Utc::now();
        let decision =
            self.engine
                .decide(&interview.interview_id, &verdict, posting.auto_promotion, now);

        info!(
            interview = %interview.interview_id.0,
            result = %verdict.result,
            status = decision.update.status.label(),
            "cv screening decided"
        );

        self.repository
            .apply_update(&interview.interview_id, &decision.update)?;

        if let Some(draft) = decision.transaction {
            self.recorder.record(draft)?;
        }

        self.repository
            .touch_posting_activity(&interview.posting_id, now)?;

        Ok(decision.update)
    }
}
