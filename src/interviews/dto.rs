use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::Lenient;
use crate::errors::{AppError, FieldErrors};
use crate::interviews::repo_types::{ExperienceLevel, Interview, InterviewType};

const ROLE_MIN: usize = 3;
const ROLE_MAX: usize = 50;
const MAX_QUESTIONS: i64 = 50;

/// Body of `POST /interview/generateInterview`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateInterviewRequest {
    /// Sent by the web client; must match the bearer token when present.
    pub userid: Option<Lenient<String>>,
    pub job_role: Option<Lenient<String>>,
    pub experience_level: Option<Lenient<String>>,
    pub tech_stack: Option<Lenient<String>>,
    pub interview_type: Option<Lenient<String>>,
    pub number_of_questions: Option<Lenient<i64>>,
    pub is_public: Option<Lenient<bool>>,
}

/// Validated interview parameters, ready for the question prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSpec {
    pub job_role: String,
    pub experience_level: ExperienceLevel,
    pub tech_stack: Vec<String>,
    pub interview_type: InterviewType,
    pub number_of_questions: u32,
    pub is_public: bool,
}

pub fn split_tech_stack(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn one_of<T: Copy>(values: &[T], name: fn(T) -> &'static str) -> String {
    values.iter().map(|v| name(*v)).collect::<Vec<_>>().join(", ")
}

impl GenerateInterviewRequest {
    pub fn validate(self, owner: Uuid) -> Result<InterviewSpec, AppError> {
        let mut errs = FieldErrors::new();

        if let Some(uid) = errs.optional("userid", "a string", self.userid) {
            if uid.trim().parse::<Uuid>().ok() != Some(owner) {
                errs.push("userid", "userid does not match the signed-in user");
            }
        }

        let job_role = match errs.required("jobRole", "a string", "role is required", self.job_role) {
            None => String::new(),
            Some(r) => {
                let r = r.trim();
                let len = r.chars().count();
                if len < ROLE_MIN {
                    errs.push("jobRole", "role must be at least 3 characters");
                } else if len > ROLE_MAX {
                    errs.push("jobRole", "role cannot exceed 50 characters");
                }
                r.to_string()
            }
        };

        let experience_level = match errs.required(
            "experienceLevel",
            "a string",
            "level is required",
            self.experience_level,
        ) {
            None => None,
            Some(l) => {
                let parsed = ExperienceLevel::parse(&l);
                if parsed.is_none() {
                    errs.push(
                        "experienceLevel",
                        format!(
                            "level must be one of {}",
                            one_of(&ExperienceLevel::ALL, ExperienceLevel::as_str)
                        ),
                    );
                }
                parsed
            }
        };

        let tech_stack = match errs.required(
            "techStack",
            "a comma-separated string",
            "tech stack is required",
            self.tech_stack,
        ) {
            None => Vec::new(),
            Some(csv) => {
                let stack = split_tech_stack(&csv);
                if stack.is_empty() {
                    errs.push("techStack", "tech stack must name at least one technology");
                }
                stack
            }
        };

        let interview_type = match errs.required(
            "interviewType",
            "a string",
            "interview type is required",
            self.interview_type,
        ) {
            None => None,
            Some(t) => {
                let parsed = InterviewType::parse(&t);
                if parsed.is_none() {
                    errs.push(
                        "interviewType",
                        format!(
                            "interview type must be one of {}",
                            one_of(&InterviewType::ALL, InterviewType::as_str)
                        ),
                    );
                }
                parsed
            }
        };

        let number_of_questions = match errs.required(
            "numberOfQuestions",
            "a number",
            "number of questions is required",
            self.number_of_questions,
        ) {
            None => 0,
            Some(n) if !(1..=MAX_QUESTIONS).contains(&n) => {
                errs.push(
                    "numberOfQuestions",
                    "number of questions must be between 1 and 50",
                );
                0
            }
            Some(n) => n as u32,
        };

        let is_public = errs
            .optional("isPublic", "a boolean", self.is_public)
            .unwrap_or(true);

        errs.finish()?;
        match (experience_level, interview_type) {
            (Some(experience_level), Some(interview_type)) => Ok(InterviewSpec {
                job_role,
                experience_level,
                tech_stack,
                interview_type,
                number_of_questions,
                is_public,
            }),
            // finish() has already reported the missing enum
            _ => Err(AppError::invalid("body", "invalid interview parameters")),
        }
    }
}

/// Body of `POST /interview/getAll`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherInterviewsRequest {
    pub user_id: Option<Lenient<String>>,
}

impl OtherInterviewsRequest {
    /// Anonymous visitors send no `userId`; that lists every public interview.
    pub fn validate(self) -> Result<Option<Uuid>, AppError> {
        let mut errs = FieldErrors::new();
        let user_id = errs.optional("userId", "a string", self.user_id);
        errs.finish()?;
        match user_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<Uuid>()
                .map(Some)
                .map_err(|_| AppError::invalid("userId", "userId must be a valid id")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InterviewPayload {
    pub interview: Interview,
}

#[derive(Debug, Serialize)]
pub struct InterviewsPayload {
    pub interviews: Vec<Interview>,
}
