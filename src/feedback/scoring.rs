//! Feedback generation: transcript in, validated scorecard out.
//!
//! The model is asked for a fixed JSON shape, but its answer is still checked
//! here before anything is stored: exactly five categories, each fixed name
//! once, scores within 0..=100. Categories that come back shuffled are put
//! into canonical order.
use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::feedback::dto::TranscriptEntry;
use crate::feedback::repo_types::{Category, CategoryScore, Scorecard};
use crate::llm::GenerativeModel;

const WHAT: &str = "feedback";

const SYSTEM: &str = "You are a professional interviewer analyzing a mock interview. \
Your task is to evaluate the candidate based on structured categories. \
You are giving feedback to the interviewee.";

pub fn format_transcript(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .map(|t| format!("- {}: {}\n", t.role.trim(), t.content.trim()))
        .collect()
}

pub fn build_prompt(transcript: &[TranscriptEntry]) -> String {
    format!(
        "You are an AI interviewer analyzing a mock interview. Your task is to evaluate the \
candidate based on structured categories. Be thorough and detailed in your analysis. Don't be \
lenient with the candidate. If there are mistakes or areas for improvement, point them out.\n\
Transcript:\n{transcript}\n\
Please score the candidate from 0 to 100 in the following areas. Do not add categories other \
than the ones provided, and use these exact names in this order:\n\
- Communication Skills: Clarity, articulation, structured responses.\n\
- Technical Knowledge: Understanding of key concepts for the role.\n\
- Problem Solving: Ability to analyze problems and propose solutions.\n\
- Cultural Fit: Alignment with company values and job role.\n\
- Confidence and Clarity: Confidence in responses, engagement, and clarity.\n",
        transcript = format_transcript(transcript),
    )
}

/// Response schema in the Gemini `responseSchema` dialect.
pub fn feedback_schema() -> Value {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "totalScore": { "type": "INTEGER" },
            "categoryScores": {
                "type": "ARRAY",
                "minItems": 5,
                "maxItems": 5,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "enum": names },
                        "score": { "type": "INTEGER" },
                        "comment": { "type": "STRING" }
                    },
                    "required": ["name", "score", "comment"],
                    "propertyOrdering": ["name", "score", "comment"]
                }
            },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "areasForImprovement": { "type": "ARRAY", "items": { "type": "STRING" } },
            "finalAssessment": { "type": "STRING" }
        },
        "required": [
            "totalScore", "categoryScores", "strengths",
            "areasForImprovement", "finalAssessment"
        ],
        "propertyOrdering": [
            "totalScore", "categoryScores", "strengths",
            "areasForImprovement", "finalAssessment"
        ]
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeedback {
    total_score: f64,
    category_scores: Vec<RawCategory>,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    final_assessment: String,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    score: f64,
    comment: String,
}

fn score(field: &str, value: f64) -> Result<i32, String> {
    let rounded = value.round();
    if !rounded.is_finite() || !(0.0..=100.0).contains(&rounded) {
        return Err(format!("{field} {value} is outside 0..=100"));
    }
    Ok(rounded as i32)
}

/// Checks the model's object against the fixed shape and returns it in canonical form.
pub fn normalize(value: Value) -> Result<Scorecard, String> {
    let raw: RawFeedback =
        serde_json::from_value(value).map_err(|e| format!("unexpected shape: {e}"))?;

    if raw.category_scores.len() != Category::ALL.len() {
        return Err(format!(
            "expected {} category scores, got {}",
            Category::ALL.len(),
            raw.category_scores.len()
        ));
    }

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(Category::ALL.len());
    for entry in raw.category_scores {
        let name = Category::parse(&entry.name)
            .ok_or_else(|| format!("unknown category '{}'", entry.name))?;
        if !seen.insert(name) {
            return Err(format!("category '{}' appears twice", name.as_str()));
        }
        categories.push(CategoryScore {
            name,
            score: score(name.as_str(), entry.score)?,
            comment: entry.comment.trim().to_string(),
        });
    }
    categories.sort_by_key(|c| c.name.rank());

    Ok(Scorecard {
        total_score: score("totalScore", raw.total_score)?,
        category_scores: categories,
        strengths: raw.strengths,
        areas_for_improvement: raw.areas_for_improvement,
        final_assessment: raw.final_assessment.trim().to_string(),
    })
}

pub async fn generate_scorecard(
    model: &dyn GenerativeModel,
    transcript: &[TranscriptEntry],
) -> Result<Scorecard, AppError> {
    let value = model
        .generate_object(SYSTEM, &build_prompt(transcript), &feedback_schema())
        .await
        .map_err(|e| AppError::Generation {
            what: WHAT,
            detail: e.to_string(),
        })?;

    normalize(value).map_err(|detail| {
        warn!(detail = %detail, "model feedback failed schema check");
        AppError::SchemaMismatch { what: WHAT, detail }
    })
}
