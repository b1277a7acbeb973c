//! CV pre-screening decision engine.
//!
//! Takes an applicant's parsed CV, the posting's screening configuration, and
//! the recruiter's pre-screening answers; compiles one evaluation prompt for
//! the model oracle; interprets the structured verdict; and deterministically
//! derives the candidate's next pipeline state while recording an auditable
//! transaction log.

pub mod domain;
pub mod memory;
pub mod policy;
pub mod prompt;
pub mod recorder;
pub mod repository;
pub mod router;
pub mod service;
pub mod verdict;

#[cfg(test)]
mod tests;

pub use domain::{
    Actor, ApplicantRecord, AutoPromotionPolicy, AutomationAction, AutomationNote, CvSection,
    InterviewId, InterviewRecord, NumericRange, PipelineStatus, PostingId, PostingPolicy,
    PreScreeningQuestion, QuestionType, ScreeningAnswer, ScreeningAnswers, ScreeningUpdate,
    SettingResult, Stage, StageEntry, StateClass, TransactionAction, TransactionDraft,
    TransactionLogEntry, VerdictLabel,
};
pub use memory::InMemoryScreeningRepository;
pub use policy::{ScreeningDecision, ScreeningPolicyEngine};
pub use prompt::compile_prompt;
pub use recorder::TransactionRecorder;
pub use repository::{RepositoryError, ScreeningRepository};
pub use router::screening_router;
pub use service::{CvScreeningService, ScreeningError, ScreeningRequest};
pub use verdict::{parse_verdict, InvalidVerdictFormat, Verdict};
