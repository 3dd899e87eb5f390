use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// The five fixed scoring dimensions, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Communication Skills")]
    CommunicationSkills,
    #[serde(rename = "Technical Knowledge")]
    TechnicalKnowledge,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "Cultural Fit")]
    CulturalFit,
    #[serde(rename = "Confidence and Clarity")]
    ConfidenceAndClarity,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::CommunicationSkills,
        Self::TechnicalKnowledge,
        Self::ProblemSolving,
        Self::CulturalFit,
        Self::ConfidenceAndClarity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommunicationSkills => "Communication Skills",
            Self::TechnicalKnowledge => "Technical Knowledge",
            Self::ProblemSolving => "Problem Solving",
            Self::CulturalFit => "Cultural Fit",
            Self::ConfidenceAndClarity => "Confidence and Clarity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }

    /// Position in the canonical order.
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: Category,
    pub score: i32,
    pub comment: String,
}

/// Validated model verdict; `category_scores` holds each category once, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub total_score: i32,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

/// Feedback record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    #[serde(rename = "interview")]
    pub interview_id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub total_score: i32,
    pub category_scores: Json<Vec<CategoryScore>>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub interview_id: Uuid,
    pub user_id: Uuid,
    pub scorecard: Scorecard,
}
