//! Assembles the single evaluation prompt sent to the model oracle.
//!
//! Section order is fixed: job block, applicant name, CV content, optional
//! pre-screening Q&A, optional secret-prompt priority block, the global
//! screening instructions, and the strict output-format directive.

use std::fmt::Write as _;

use super::domain::{
    ApplicantRecord, NumericRange, PostingPolicy, PreScreeningQuestion, ScreeningAnswer,
    ScreeningAnswers,
};

/// How a candidate's numeric answer sits relative to the recruiter's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAlignment {
    Within,
    PartialOverlap,
    Outside,
}

impl RangeAlignment {
    pub fn of(answer: NumericRange, preferred: NumericRange) -> Self {
        if answer.min >= preferred.min && answer.max <= preferred.max {
            RangeAlignment::Within
        } else if !(answer.max < preferred.min || answer.min > preferred.max) {
            RangeAlignment::PartialOverlap
        } else {
            RangeAlignment::Outside
        }
    }

    fn note(self) -> &'static str {
        match self {
            RangeAlignment::Within => "Applicant's range is within the preferred range.",
            RangeAlignment::PartialOverlap => {
                "Applicant's range partially overlaps with the preferred range."
            }
            RangeAlignment::Outside => "Applicant's range is outside the preferred range.",
        }
    }
}

fn render_range(range: NumericRange, currency: Option<&str>) -> String {
    match currency {
        Some(currency) => format!("{} - {} {}", range.min, range.max, currency),
        None => format!("{} - {}", range.min, range.max),
    }
}

fn render_question(out: &mut String, question: &PreScreeningQuestion, answer: &ScreeningAnswer) {
    let _ = write!(out, "\nQuestion: {}\n", question.title);
    let _ = write!(out, "Details: {}\n", question.question);

    match answer {
        ScreeningAnswer::Range(range) => {
            let currency = question.currency.as_deref();
            let _ = write!(
                out,
                "Applicant's Answer: {}\n",
                render_range(*range, currency)
            );
            if let Some(preferred) = question.preferred_range {
                let _ = write!(
                    out,
                    "Preferred Range (Recruiter): {}\n",
                    render_range(preferred, currency)
                );
                let _ = write!(out, "Note: {}\n", RangeAlignment::of(*range, preferred).note());
            }
        }
        ScreeningAnswer::Text(text) => {
            let _ = write!(out, "Answer: {text}\n");
        }
    }
}

/// Render the pre-screening Q&A section. Questions without a recorded answer
/// are skipped; an empty string means the section is omitted entirely.
fn prescreening_section(
    questions: &[PreScreeningQuestion],
    answers: &ScreeningAnswers,
) -> String {
    let mut body = String::new();
    for question in questions {
        if let Some(answer) = answers.get(&question.id) {
            render_question(&mut body, question, answer);
        }
    }

    if body.is_empty() {
        return String::new();
    }

    format!("\n\nPre-screening Questions and Answers:\n{body}")
}

/// Compile the full screening prompt. Pure function of its inputs.
pub fn compile_prompt(
    posting: &PostingPolicy,
    cv: &ApplicantRecord,
    applicant_name: &str,
    answers: Option<&ScreeningAnswers>,
    instructions: &str,
) -> String {
    let mut cv_text = String::new();
    for section in &cv.sections {
        let _ = write!(cv_text, "{}\n{}\n", section.name, section.content);
    }

    let prescreening = answers
        .map(|answers| prescreening_section(&posting.questions, answers))
        .unwrap_or_default();

    let mut prompt = String::new();
    let _ = write!(
        prompt,
        "You are a helpful AI assistant.\n\
         You are given a candidate's CV and a job description.\n\
         You need to screen the candidate's CV and determine if they are a good fit for the job.\n\
         \n\
         Job Details:\n\
         Job Title:\n\
         {title}\n\
         Job Description:\n\
         {description}\n\
         \n\
         Applicant CV Information:\n\
         Applicant Name: {name}\n\
         \n\
         Applicant CV:\n\
         {cv}{prescreening}\n",
        title = posting.job_title,
        description = posting.description,
        name = applicant_name,
        cv = cv_text,
        prescreening = prescreening,
    );

    if let Some(secret) = posting.secret_prompt.as_deref() {
        let _ = write!(
            prompt,
            "\nIMPORTANT - Priority Evaluation Criteria:\n\
             {secret}\n\
             \n\
             The above criteria MUST be evaluated first and take absolute precedence over all \
             other evaluation criteria below. No other criterion may override it.\n"
        );
    }

    let _ = write!(
        prompt,
        "\nProcessing Steps:\n\
         {instructions}\n\
         \n\
         - Format your response as JSON:\n\
         {{\n\
         \x20 \"result\": <Result (No Fit / Bad Fit / Good Fit / Strong Fit / Ineligible CV / Insufficient Data)>,\n\
         \x20 \"reason\": <Reason>,\n\
         \x20 \"confidence\": <AI Assessment Confidence (0-100)>,\n\
         \x20 \"jobFitScore\": <Overall Score (0-100)>\n\
         }}\n\
         \n\
         Processing Instructions:\n\
         - Return only the JSON object, nothing else.\n"
    );

    if posting.secret_prompt.is_some() {
        prompt.push_str(
            "- CRITICAL: Apply the Priority Evaluation Criteria above FIRST before any other evaluation.\n",
        );
    }

    prompt.push_str(
        "- Carefully analyze the applicant's CV and job description.\n\
         - Be as accurate as possible.\n\
         - Give a detailed reason for the result. Be clear and specific.\n\
         - Set result to \"Ineligible CV\" if the applicant's CV is not in the correct format.\n\
         - Set result to \"Insufficient Data\" if the applicant's CV is missing important information.\n",
    );

    if !prescreening.is_empty() {
        prompt.push_str("- Consider the pre-screening answers in your evaluation.\n");
    }

    prompt.push_str(
        "- Do not include any other text or comments.\n\
         - DO NOT include ```json or ``` around the response.\n",
    );

    prompt
}
