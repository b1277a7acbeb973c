//! Pipeline-status routing table.
//!
//! Maps a verdict label onto the next pipeline status, step, stage stamp, and
//! optional automatic transition, then applies the posting-level status
//! override. Kept separate from the visual classification table in
//! `classification.rs`; the two tables consult the same promotion setting but
//! answer different questions and must not be collapsed into one.

use super::super::domain::{
    AutoPromotionPolicy, AutomationAction, PipelineStatus, Stage, TransactionAction, VerdictLabel,
};

/// Disjoint partition of verdict labels driving the base transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    Review,
    Drop,
    Promote,
}

/// Labels outside the drop and promote sets default to manual review.
pub(crate) fn bucket(label: &VerdictLabel) -> Bucket {
    match label {
        VerdictLabel::NoFit | VerdictLabel::BadFit => Bucket::Drop,
        VerdictLabel::GoodFit | VerdictLabel::StrongFit => Bucket::Promote,
        _ => Bucket::Review,
    }
}

/// Status-routing outcome for one verdict under one posting setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusRoute {
    pub status: PipelineStatus,
    pub current_step: Stage,
    /// Extra stage-entry timestamp to stamp alongside "CV Screening".
    pub extra_stage: Option<Stage>,
    pub transaction: Option<(TransactionAction, Option<&'static str>)>,
    pub metadata_action: Option<AutomationAction>,
}

pub(crate) fn route(label: &VerdictLabel, setting: AutoPromotionPolicy) -> StatusRoute {
    let mut route = match bucket(label) {
        Bucket::Review => StatusRoute {
            status: PipelineStatus::ForCvScreening,
            current_step: Stage::CvScreening,
            extra_stage: None,
            transaction: None,
            metadata_action: None,
        },
        Bucket::Drop => StatusRoute {
            status: PipelineStatus::Dropped,
            current_step: Stage::CvScreening,
            extra_stage: None,
            transaction: Some((TransactionAction::Dropped, None)),
            metadata_action: Some(AutomationAction::Dropped),
        },
        Bucket::Promote => StatusRoute {
            status: PipelineStatus::ForAiInterview,
            current_step: Stage::AiInterview,
            extra_stage: Some(Stage::AiInterview),
            transaction: Some((TransactionAction::AutoPromoted, Some("Pending AI Interview"))),
            metadata_action: Some(AutomationAction::Endorsed),
        },
    };

    // The weaker promote-set member is held for manual review under
    // "Only Strong Fit". Only the status is forced back; the transaction,
    // stage stamp, and endorsement metadata from the promotion stand.
    if setting == AutoPromotionPolicy::OnlyStrongFit && *label == VerdictLabel::GoodFit {
        route.status = PipelineStatus::ForCvScreening;
    }

    route
}
