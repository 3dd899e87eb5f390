use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_type")]
pub enum InterviewType {
    Technical,
    Behavioural,
    Mixed,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }
}

impl InterviewType {
    pub const ALL: [InterviewType; 3] = [Self::Technical, Self::Behavioural, Self::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Behavioural => "Behavioural",
            Self::Mixed => "Mixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }
}

/// Interview record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub created_by: Uuid,
    pub job_role: String,
    pub experience_level: ExperienceLevel,
    pub tech_stack: Vec<String>,
    pub interview_type: InterviewType,
    pub number_of_questions: i32,
    pub questions: Vec<String>,
    pub is_public: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Everything needed to insert an interview; id and timestamp come from the store.
#[derive(Debug, Clone)]
pub struct NewInterview {
    pub created_by: Uuid,
    pub job_role: String,
    pub experience_level: ExperienceLevel,
    pub tech_stack: Vec<String>,
    pub interview_type: InterviewType,
    pub number_of_questions: i32,
    pub questions: Vec<String>,
    pub is_public: bool,
}
