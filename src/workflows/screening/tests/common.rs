use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::oracle::{CompletionOracle, OracleError};
use crate::workflows::screening::domain::{
    ApplicantRecord, AutoPromotionPolicy, CvSection, InterviewId, InterviewRecord, NumericRange,
    PipelineStatus, PostingId, PostingPolicy, PreScreeningQuestion, QuestionType, ScreeningAnswer,
    ScreeningAnswers, Stage, VerdictLabel,
};
use crate::workflows::screening::memory::InMemoryScreeningRepository;
use crate::workflows::screening::service::CvScreeningService;
use crate::workflows::screening::verdict::Verdict;

pub(super) const APPLICANT_EMAIL: &str = "ana.reyes@example.com";

pub(super) fn salary_question() -> PreScreeningQuestion {
    PreScreeningQuestion {
        id: "q-salary".to_string(),
        title: "Expected Salary".to_string(),
        question: "What is your expected monthly salary range?".to_string(),
        question_type: QuestionType::Range,
        currency: Some("PHP".to_string()),
        preferred_range: Some(NumericRange {
            min: 50_000,
            max: 80_000,
        }),
    }
}

pub(super) fn notice_question() -> PreScreeningQuestion {
    PreScreeningQuestion {
        id: "q-notice".to_string(),
        title: "Notice Period".to_string(),
        question: "How soon can you start?".to_string(),
        question_type: QuestionType::Text,
        currency: None,
        preferred_range: None,
    }
}

pub(super) fn posting(auto_promotion: AutoPromotionPolicy) -> PostingPolicy {
    PostingPolicy {
        id: PostingId("post-001".to_string()),
        job_title: "Senior Backend Engineer".to_string(),
        description: "Design and operate the hiring platform's service backends.".to_string(),
        secret_prompt: None,
        questions: vec![salary_question(), notice_question()],
        auto_promotion,
        last_activity_at: None,
    }
}

pub(super) fn cv() -> ApplicantRecord {
    ApplicantRecord {
        email: APPLICANT_EMAIL.to_string(),
        sections: vec![
            CvSection {
                name: "Experience".to_string(),
                content: "Six years building payment APIs in Rust and Go.".to_string(),
            },
            CvSection {
                name: "Education".to_string(),
                content: "BS Computer Science, University of the Philippines.".to_string(),
            },
        ],
    }
}

pub(super) fn interview() -> InterviewRecord {
    InterviewRecord {
        interview_id: InterviewId("int-001".to_string()),
        email: APPLICANT_EMAIL.to_string(),
        posting_id: PostingId("post-001".to_string()),
        applicant_name: "Ana Reyes".to_string(),
        current_step: Stage::CvScreening,
        status: PipelineStatus::ForCvScreening,
        cv_status: None,
        state_class: None,
        cv_setting_result: None,
        cv_screening_reason: None,
        confidence: None,
        job_fit_score: None,
        stage_history: Vec::new(),
        application_metadata: None,
        updated_at: Utc::now(),
    }
}

pub(super) fn range_answers(min: i64, max: i64) -> ScreeningAnswers {
    let mut answers = ScreeningAnswers::new();
    answers.insert(
        "q-salary".to_string(),
        ScreeningAnswer::Range(NumericRange { min, max }),
    );
    answers.insert(
        "q-notice".to_string(),
        ScreeningAnswer::Text("Two weeks".to_string()),
    );
    answers
}

pub(super) fn verdict(result: VerdictLabel) -> Verdict {
    Verdict {
        result,
        reason: "ok".to_string(),
        confidence: 80,
        job_fit_score: 75,
    }
}

pub(super) fn verdict_json(label: &str) -> String {
    format!(r#"{{"result":"{label}","reason":"ok","confidence":80,"jobFitScore":75}}"#)
}

pub(super) enum OracleScript {
    Reply(String),
    Timeout,
    Unavailable,
}

/// Deterministic oracle capturing the compiled prompt and call count.
pub(super) struct ScriptedOracle {
    script: OracleScript,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedOracle {
    pub(super) fn reply(raw: impl Into<String>) -> Self {
        Self::new(OracleScript::Reply(raw.into()))
    }

    pub(super) fn new(script: OracleScript) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl CompletionOracle for ScriptedOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt mutex poisoned") = Some(prompt.to_string());
        match &self.script {
            OracleScript::Reply(raw) => Ok(raw.clone()),
            OracleScript::Timeout => Err(OracleError::Timeout),
            OracleScript::Unavailable => {
                Err(OracleError::Unavailable("connection refused".to_string()))
            }
        }
    }
}

pub(super) fn seeded_repository(
    auto_promotion: AutoPromotionPolicy,
) -> Arc<InMemoryScreeningRepository> {
    let repository = Arc::new(InMemoryScreeningRepository::default());
    repository.insert_interview(interview());
    repository.insert_cv(cv());
    repository.insert_posting(posting(auto_promotion));
    repository
}

pub(super) fn build_service(
    repository: Arc<InMemoryScreeningRepository>,
    oracle: Arc<ScriptedOracle>,
) -> CvScreeningService<InMemoryScreeningRepository, ScriptedOracle> {
    CvScreeningService::new(repository, oracle)
}
