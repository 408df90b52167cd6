use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_SCORE: u8 = 100;

/// A role suggested for the candidate. Embedded in an analysis, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub title: String,
    pub match_score: u8,
    pub required_skills: Vec<String>,
}

/// The structured result of analyzing one resume.
///
/// This is both the shape the model is asked to produce and the body the
/// analysis function returns. Unknown fields in the model reply are ignored;
/// missing ones fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub job_recommendations: Vec<JobRecommendation>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{field} must be between 0 and 100, got {value}")]
    ScoreOutOfRange { field: String, value: u8 },

    #[error("{field} contains an empty entry")]
    EmptyEntry { field: String },

    #[error("job_recommendations[{index}] has an empty title")]
    EmptyJobTitle { index: usize },
}

impl AnalysisReport {
    /// Checks the constraints serde cannot express: score ranges and blank strings.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        check_score("overall_score", self.overall_score)?;
        check_entries("strengths", &self.strengths)?;
        check_entries("improvements", &self.improvements)?;
        check_entries("skill_gaps", &self.skill_gaps)?;

        for (index, job) in self.job_recommendations.iter().enumerate() {
            if job.title.trim().is_empty() {
                return Err(SchemaViolation::EmptyJobTitle { index });
            }
            check_score(
                &format!("job_recommendations[{index}].match_score"),
                job.match_score,
            )?;
            check_entries(
                &format!("job_recommendations[{index}].required_skills"),
                &job.required_skills,
            )?;
        }
        Ok(())
    }
}

fn check_score(field: &str, value: u8) -> Result<(), SchemaViolation> {
    if value > MAX_SCORE {
        return Err(SchemaViolation::ScoreOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_entries(field: &str, entries: &[String]) -> Result<(), SchemaViolation> {
    if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(SchemaViolation::EmptyEntry {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub overall_score: i32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub job_recommendations: Json<Vec<JobRecommendation>>,
    pub created_at: DateTime<Utc>,
}

/// One history entry: an analysis joined with the title of its resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub overall_score: i32,
    pub resume_title: String,
}
