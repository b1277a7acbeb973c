//! Visual/audit classification table.
//!
//! Derives `state_class` and `cv_setting_result` from the verdict label,
//! independently of the status routing in `status.rs`. When the posting has a
//! promotion setting the classification is recomputed wholesale from that
//! setting's pass predicate.

use super::super::domain::{AutoPromotionPolicy, SettingResult, StateClass, VerdictLabel};

fn base(label: &VerdictLabel) -> (StateClass, Option<SettingResult>) {
    match label {
        VerdictLabel::NoFit
        | VerdictLabel::BadFit
        | VerdictLabel::IneligibleCv
        | VerdictLabel::InsufficientData => (StateClass::Rejected, Some(SettingResult::Failed)),
        VerdictLabel::GoodFit => (StateClass::Good, Some(SettingResult::Passed)),
        VerdictLabel::StrongFit => (StateClass::Accepted, Some(SettingResult::Passed)),
        // "Maybe Fit" and unknown labels keep the default class with no
        // pass/fail verdict recorded.
        _ => (StateClass::Accepted, None),
    }
}

pub(crate) fn classify(
    label: &VerdictLabel,
    setting: AutoPromotionPolicy,
) -> (StateClass, Option<SettingResult>) {
    match setting {
        AutoPromotionPolicy::NoAutoPromotion => base(label),
        AutoPromotionPolicy::OnlyStrongFit => {
            if *label == VerdictLabel::StrongFit {
                (StateClass::Accepted, Some(SettingResult::Passed))
            } else {
                (StateClass::Rejected, Some(SettingResult::Failed))
            }
        }
        AutoPromotionPolicy::GoodFitAndAbove => {
            if matches!(label, VerdictLabel::GoodFit | VerdictLabel::StrongFit) {
                (StateClass::Accepted, Some(SettingResult::Passed))
            } else {
                (StateClass::Rejected, Some(SettingResult::Failed))
            }
        }
    }
}
