use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::Lenient;
use crate::errors::{AppError, FieldErrors};
use crate::feedback::repo_types::Feedback;

const EMPTY_TRANSCRIPT: &str = "transcript must contain at least one entry";

/// One speaker-tagged utterance captured during the interview.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `POST /feedback/generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateFeedbackRequest {
    pub interview_id: Option<Lenient<String>>,
    pub transcript: Option<Lenient<Vec<TranscriptEntry>>>,
}

#[derive(Debug)]
pub struct FeedbackInput {
    pub interview_id: Uuid,
    pub transcript: Vec<TranscriptEntry>,
}

impl GenerateFeedbackRequest {
    pub fn validate(self) -> Result<FeedbackInput, AppError> {
        let mut errs = FieldErrors::new();

        let interview_id = errs.required(
            "interviewId",
            "a string",
            "interviewId is required",
            self.interview_id,
        );
        let interview_id = match interview_id.as_deref().map(str::trim) {
            None => None,
            Some("") => {
                errs.push("interviewId", "interviewId is required");
                None
            }
            Some(raw) => {
                let parsed = raw.parse::<Uuid>().ok();
                if parsed.is_none() {
                    errs.push("interviewId", "interviewId must be a valid id");
                }
                parsed
            }
        };

        let transcript = errs
            .required(
                "transcript",
                "a list of {role, content} entries",
                EMPTY_TRANSCRIPT,
                self.transcript,
            )
            .unwrap_or_default();
        if transcript.is_empty() && !errs.has("transcript") {
            errs.push("transcript", EMPTY_TRANSCRIPT);
        }
        for (i, entry) in transcript.iter().enumerate() {
            if entry.role.trim().is_empty() {
                errs.push(&format!("transcript.{i}.role"), "role is required");
            }
        }

        errs.finish()?;
        match interview_id {
            Some(interview_id) => Ok(FeedbackInput {
                interview_id,
                transcript,
            }),
            None => Err(AppError::invalid("interviewId", "interviewId is required")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackPayload {
    pub feedback: Feedback,
}
