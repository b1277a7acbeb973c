//! Screening policy engine: maps a parsed verdict onto the candidate's next
//! pipeline state and an optional audit transaction.
//!
//! Two independent passes run per verdict: status routing (`status`) and
//! visual classification (`classification`). Both consult the posting's
//! auto-promotion setting with overlapping but not identical predicates.

mod classification;
mod status;

use chrono::{DateTime, Utc};

use super::domain::{
    Actor, AutoPromotionPolicy, AutomationNote, InterviewId, ScreeningUpdate, Stage, StageEntry,
    TransactionDraft,
};
use super::verdict::Verdict;

/// Deterministic decision for one screening pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningDecision {
    pub update: ScreeningUpdate,
    pub transaction: Option<TransactionDraft>,
}

/// Stateless engine applying the posting's promotion setting to a verdict.
pub struct ScreeningPolicyEngine {
    actor: Actor,
}

impl ScreeningPolicyEngine {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    pub fn decide(
        &self,
        interview_id: &InterviewId,
        verdict: &Verdict,
        setting: AutoPromotionPolicy,
        now: DateTime<Utc>,
    ) -> ScreeningDecision {
        let route = status::route(&verdict.result, setting);
        let (state_class, cv_setting_result) = classification::classify(&verdict.result, setting);

        let mut stage_entries = vec![StageEntry {
            stage: Stage::CvScreening,
            entered_at: now,
        }];
        if let Some(stage) = route.extra_stage {
            stage_entries.push(StageEntry {
                stage,
                entered_at: now,
            });
        }

        let application_metadata = route.metadata_action.map(|action| AutomationNote {
            action,
            actor: self.actor.clone(),
            updated_at: now,
        });

        let transaction = route
            .transaction
            .map(|(action, to_stage)| TransactionDraft {
                interview_id: interview_id.clone(),
                from_stage: Stage::CvScreening,
                to_stage: to_stage.map(str::to_string),
                action,
                actor: self.actor.clone(),
            });

        ScreeningDecision {
            update: ScreeningUpdate {
                cv_status: verdict.result.clone(),
                state_class,
                cv_setting_result,
                cv_screening_reason: verdict.reason.clone(),
                current_step: route.current_step,
                confidence: verdict.confidence,
                job_fit_score: verdict.job_fit_score,
                status: route.status,
                stage_entries,
                application_metadata,
                updated_at: now,
            },
            transaction,
        }
    }
}
