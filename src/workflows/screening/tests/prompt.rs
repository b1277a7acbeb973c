use super::common::*;

use crate::workflows::screening::domain::{AutoPromotionPolicy, NumericRange};
use crate::workflows::screening::prompt::{compile_prompt, RangeAlignment};

const INSTRUCTIONS: &str = "Weigh experience over keywords.";

#[test]
fn sections_appear_in_fixed_order() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", None, INSTRUCTIONS);

    let title = prompt.find("Senior Backend Engineer").expect("job title");
    let name = prompt.find("Applicant Name: Ana Reyes").expect("name");
    let section = prompt.find("Experience\nSix years").expect("cv section");
    let steps = prompt.find(INSTRUCTIONS).expect("instructions");
    let format = prompt.find("\"jobFitScore\"").expect("format directive");

    assert!(title < name, "job block precedes applicant block");
    assert!(name < section, "applicant name precedes cv content");
    assert!(section < steps, "cv content precedes processing steps");
    assert!(steps < format, "processing steps precede format directive");
}

#[test]
fn cv_sections_are_concatenated_name_then_content() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", None, INSTRUCTIONS);

    assert!(prompt.contains("Experience\nSix years building payment APIs in Rust and Go.\n"));
    assert!(prompt.contains("Education\nBS Computer Science, University of the Philippines.\n"));
}

#[test]
fn range_answer_within_preferred_range() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let answers = range_answers(60_000, 70_000);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", Some(&answers), INSTRUCTIONS);

    assert!(prompt.contains("Applicant's Answer: 60000 - 70000 PHP"));
    assert!(prompt.contains("Preferred Range (Recruiter): 50000 - 80000 PHP"));
    assert!(prompt.contains("Note: Applicant's range is within the preferred range."));
}

#[test]
fn range_answer_partially_overlapping() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let answers = range_answers(40_000, 55_000);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", Some(&answers), INSTRUCTIONS);

    assert!(prompt.contains("Note: Applicant's range partially overlaps with the preferred range."));
}

#[test]
fn range_answer_outside_preferred_range() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let answers = range_answers(10_000, 20_000);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", Some(&answers), INSTRUCTIONS);

    assert!(prompt.contains("Note: Applicant's range is outside the preferred range."));
}

#[test]
fn alignment_boundaries_count_as_within() {
    let preferred = NumericRange {
        min: 50_000,
        max: 80_000,
    };
    let exact = NumericRange {
        min: 50_000,
        max: 80_000,
    };
    let touching = NumericRange {
        min: 80_000,
        max: 90_000,
    };

    assert_eq!(RangeAlignment::of(exact, preferred), RangeAlignment::Within);
    assert_eq!(
        RangeAlignment::of(touching, preferred),
        RangeAlignment::PartialOverlap
    );
}

#[test]
fn text_answers_render_with_question_details() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let answers = range_answers(60_000, 70_000);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", Some(&answers), INSTRUCTIONS);

    assert!(prompt.contains("Question: Notice Period"));
    assert!(prompt.contains("Details: How soon can you start?"));
    assert!(prompt.contains("Answer: Two weeks"));
    assert!(prompt.contains("- Consider the pre-screening answers in your evaluation."));
}

#[test]
fn unanswered_questions_are_skipped() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let answers = crate::workflows::screening::domain::ScreeningAnswers::new();
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", Some(&answers), INSTRUCTIONS);

    assert!(!prompt.contains("Pre-screening Questions and Answers"));
    assert!(!prompt.contains("- Consider the pre-screening answers in your evaluation."));
}

#[test]
fn secret_prompt_block_takes_absolute_precedence() {
    let mut posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    posting.secret_prompt = Some("Only consider candidates with fintech experience.".to_string());
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", None, INSTRUCTIONS);

    assert!(prompt.contains("IMPORTANT - Priority Evaluation Criteria:"));
    assert!(prompt.contains("Only consider candidates with fintech experience."));
    assert!(prompt.contains("take absolute precedence over all other evaluation criteria"));
    assert!(prompt.contains("No other criterion may override it."));
    assert!(prompt.contains(
        "- CRITICAL: Apply the Priority Evaluation Criteria above FIRST before any other evaluation."
    ));
}

#[test]
fn secret_prompt_block_absent_by_default() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", None, INSTRUCTIONS);

    assert!(!prompt.contains("Priority Evaluation Criteria"));
    assert!(!prompt.contains("CRITICAL"));
}

#[test]
fn format_directive_forbids_code_fences() {
    let posting = posting(AutoPromotionPolicy::NoAutoPromotion);
    let prompt = compile_prompt(&posting, &cv(), "Ana Reyes", None, INSTRUCTIONS);

    assert!(prompt.contains("- Return only the JSON object, nothing else."));
    assert!(prompt.contains("DO NOT include ```json or ``` around the response."));
}
