use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for interview pipelines (one per application).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostingId(pub String);

/// One named section of a parsed CV, as produced by the applicant profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvSection {
    pub name: String,
    pub content: String,
}

/// Immutable-per-screening-pass CV content keyed by applicant e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub email: String,
    pub sections: Vec<CvSection>,
}

/// Inclusive numeric range used for salary-style questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default)]
    pub min: i64,
    #[serde(default)]
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Choice,
    Range,
    Text,
}

/// Recruiter-configured pre-screening question attached to a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreScreeningQuestion {
    pub id: String,
    pub title: String,
    pub question: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub preferred_range: Option<NumericRange>,
}

/// Candidate response to a pre-screening question. Range questions carry a
/// numeric pair, everything else free text or a selected choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScreeningAnswer {
    Range(NumericRange),
    Text(String),
}

/// Answers keyed by question id.
pub type ScreeningAnswers = BTreeMap<String, ScreeningAnswer>;

/// Posting-level setting controlling how aggressively verdicts convert into
/// automatic stage advancement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoPromotionPolicy {
    #[default]
    #[serde(rename = "No Auto Promotion")]
    NoAutoPromotion,
    #[serde(rename = "Good Fit and above")]
    GoodFitAndAbove,
    #[serde(rename = "Only Strong Fit")]
    OnlyStrongFit,
}

/// Screening-relevant attributes of a job posting. Mutated only by the
/// editing UI; read-only input to the screening core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingPolicy {
    pub id: PostingId,
    pub job_title: String,
    pub description: String,
    #[serde(default)]
    pub secret_prompt: Option<String>,
    #[serde(default)]
    pub questions: Vec<PreScreeningQuestion>,
    #[serde(default)]
    pub auto_promotion: AutoPromotionPolicy,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Named step in the applicant pipeline, as far as this workflow reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "CV Screening")]
    CvScreening,
    #[serde(rename = "AI Interview")]
    AiInterview,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Stage::CvScreening => "CV Screening",
            Stage::AiInterview => "AI Interview",
        }
    }
}

/// Pipeline status written back after screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStatus {
    #[serde(rename = "For CV Screening")]
    ForCvScreening,
    #[serde(rename = "For AI Interview")]
    ForAiInterview,
    #[serde(rename = "Dropped")]
    Dropped,
}

impl PipelineStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PipelineStatus::ForCvScreening => "For CV Screening",
            PipelineStatus::ForAiInterview => "For AI Interview",
            PipelineStatus::Dropped => "Dropped",
        }
    }
}

/// Visual/audit tag attached to the record for dashboard rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateClass {
    #[serde(rename = "state-accepted")]
    Accepted,
    #[serde(rename = "state-good")]
    Good,
    #[serde(rename = "state-rejected")]
    Rejected,
}

/// Per-stage pass/fail outcome under the posting's promotion setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingResult {
    Passed,
    Failed,
}

/// Who performed an automated or manual pipeline action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    System { name: String },
    Human { user_id: String },
}

impl Actor {
    /// The automated screener identity stamped on engine-driven transitions.
    pub fn screener() -> Self {
        Actor::System {
            name: "Jia".to_string(),
        }
    }
}

/// Automated action recorded in the interview's application metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationAction {
    Dropped,
    Endorsed,
}

/// Free-form metadata block recording the last automated action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationNote {
    pub action: AutomationAction,
    pub actor: Actor,
    pub updated_at: DateTime<Utc>,
}

/// Ordered stage-entry timestamp. Appended, never overwritten, so re-entering
/// a stage keeps the earlier entry visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    pub stage: Stage,
    pub entered_at: DateTime<Utc>,
}

/// Stage-transition audit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAction {
    #[serde(rename = "Dropped")]
    Dropped,
    #[serde(rename = "Auto-Promoted")]
    AutoPromoted,
}

impl TransactionAction {
    pub const fn label(self) -> &'static str {
        match self {
            TransactionAction::Dropped => "Dropped",
            TransactionAction::AutoPromoted => "Auto-Promoted",
        }
    }
}

/// Audit entry produced by the policy engine before the recorder stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub interview_id: InterviewId,
    pub from_stage: Stage,
    pub to_stage: Option<String>,
    pub action: TransactionAction,
    pub actor: Actor,
}

/// Append-only audit record of an automatic stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLogEntry {
    pub interview_id: InterviewId,
    pub from_stage: Stage,
    pub to_stage: Option<String>,
    pub action: TransactionAction,
    pub actor: Actor,
    pub created_at: DateTime<Utc>,
}

/// Model verdict label. The known labels are a contract with the prompt, not
/// an enforcement boundary: anything else the model emits is preserved
/// verbatim and routed to manual review by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerdictLabel {
    NoFit,
    BadFit,
    GoodFit,
    StrongFit,
    MaybeFit,
    IneligibleCv,
    InsufficientData,
    Other(String),
}

impl VerdictLabel {
    pub fn as_str(&self) -> &str {
        match self {
            VerdictLabel::NoFit => "No Fit",
            VerdictLabel::BadFit => "Bad Fit",
            VerdictLabel::GoodFit => "Good Fit",
            VerdictLabel::StrongFit => "Strong Fit",
            VerdictLabel::MaybeFit => "Maybe Fit",
            VerdictLabel::IneligibleCv => "Ineligible CV",
            VerdictLabel::InsufficientData => "Insufficient Data",
            VerdictLabel::Other(label) => label,
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for VerdictLabel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "No Fit" => VerdictLabel::NoFit,
            "Bad Fit" => VerdictLabel::BadFit,
            "Good Fit" => VerdictLabel::GoodFit,
            "Strong Fit" => VerdictLabel::StrongFit,
            "Maybe Fit" => VerdictLabel::MaybeFit,
            "Ineligible CV" => VerdictLabel::IneligibleCv,
            "Insufficient Data" => VerdictLabel::InsufficientData,
            _ => VerdictLabel::Other(value),
        }
    }
}

impl From<VerdictLabel> for String {
    fn from(value: VerdictLabel) -> Self {
        value.as_str().to_string()
    }
}

/// Mutable per-application pipeline state. Created when a candidate applies;
/// this workflow only rewrites the screening fields and appends stage entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub interview_id: InterviewId,
    pub email: String,
    pub posting_id: PostingId,
    pub applicant_name: String,
    pub current_step: Stage,
    pub status: PipelineStatus,
    #[serde(default)]
    pub cv_status: Option<VerdictLabel>,
    #[serde(default)]
    pub state_class: Option<StateClass>,
    #[serde(default)]
    pub cv_setting_result: Option<SettingResult>,
    #[serde(default)]
    pub cv_screening_reason: Option<String>,
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub job_fit_score: Option<u8>,
    #[serde(default)]
    pub stage_history: Vec<StageEntry>,
    #[serde(default)]
    pub application_metadata: Option<AutomationNote>,
    pub updated_at: DateTime<Utc>,
}

/// Partial field set the policy engine writes back to the interview record,
/// also returned to the caller as the observable screening outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningUpdate {
    pub cv_status: VerdictLabel,
    pub state_class: StateClass,
    pub cv_setting_result: Option<SettingResult>,
    pub cv_screening_reason: String,
    pub current_step: Stage,
    pub confidence: u8,
    pub job_fit_score: u8,
    pub status: PipelineStatus,
    pub stage_entries: Vec<StageEntry>,
    #[serde(default)]
    pub application_metadata: Option<AutomationNote>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRecord {
    /// Merge a screening update into the record. Stage entries are appended,
    /// matching the append-only history contract.
    pub fn apply(&mut self, update: &ScreeningUpdate) {
        self.cv_status = Some(update.cv_status.clone());
        self.state_class = Some(update.state_class);
        self.cv_setting_result = update.cv_setting_result;
        self.cv_screening_reason = Some(update.cv_screening_reason.clone());
        self.current_step = update.current_step;
        self.confidence = Some(update.confidence);
        self.job_fit_score = Some(update.job_fit_score);
        self.status = update.status;
        self.stage_history.extend(update.stage_entries.iter().cloned());
        self.application_metadata = update.application_metadata.clone();
        self.updated_at = update.updated_at;
    }
}
