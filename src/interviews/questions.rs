//! Question generation: prompt in, validated list of question strings out.
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::interviews::dto::InterviewSpec;
use crate::llm::{strip_json_fences, GenerativeModel};

const WHAT: &str = "questions";

pub fn build_prompt(spec: &InterviewSpec) -> String {
    format!(
        "Prepare questions for a job interview.\n\
         The job role is {role}.\n\
         The job experience level is {level}.\n\
         The tech stack used in the job is: {stack}.\n\
         The focus between behavioural and technical questions should lean towards: {kind}.\n\
         The amount of questions required is: {count}.\n\
         Please return only the questions, without any additional text.\n\
         The questions are going to be read by a voice assistant so do not use \"/\" or \"*\" \
         or any other special characters which might break the voice assistant.\n\
         Return the response formatted like this:\n\
         [\"Question 1\", \"Question 2\", \"Question 3\"]\n",
        role = spec.job_role,
        level = spec.experience_level.as_str(),
        stack = spec.tech_stack.join(", "),
        kind = spec.interview_type.as_str(),
        count = spec.number_of_questions,
    )
}

/// Model output is untrusted: it must be a JSON array of non-blank strings.
pub fn parse_questions(text: &str) -> Result<Vec<String>, String> {
    let body = strip_json_fences(text);
    if body.is_empty() {
        return Err("empty response".into());
    }
    let raw: Vec<String> =
        serde_json::from_str(body).map_err(|e| format!("not a JSON array of strings: {e}"))?;
    if raw.is_empty() {
        return Err("no questions returned".into());
    }
    let questions: Vec<String> = raw.iter().map(|q| q.trim().to_string()).collect();
    if let Some(pos) = questions.iter().position(|q| q.is_empty()) {
        return Err(format!("question {pos} is blank"));
    }
    Ok(questions)
}

pub async fn generate_questions(
    model: &dyn GenerativeModel,
    spec: &InterviewSpec,
) -> Result<Vec<String>, AppError> {
    let prompt = build_prompt(spec);
    let text = model
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation {
            what: WHAT,
            detail: e.to_string(),
        })?;

    let questions = parse_questions(&text).map_err(|detail| {
        warn!(detail = %detail, "unusable question list from model");
        AppError::Generation { what: WHAT, detail }
    })?;

    if questions.len() != spec.number_of_questions as usize {
        debug!(
            requested = spec.number_of_questions,
            received = questions.len(),
            "question count differs from request"
        );
    }
    Ok(questions)
}
