//! Storage for resumes and analyses.
//!
//! Every operation is scoped to the caller's identity: a user can only read,
//! reference or remove rows they own. No update operations exist.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::analysis::{AnalysisReport, AnalysisRow, AnalysisSummary};
use crate::models::resume::{NewResume, ResumeRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn insert_resume(&self, user_id: Uuid, resume: &NewResume)
        -> Result<ResumeRow, StoreError>;

    /// Removes a resume that no analysis references. Used for orphan cleanup only.
    async fn delete_orphaned_resume(&self, user_id: Uuid, resume_id: Uuid)
        -> Result<(), StoreError>;

    /// Inserts an analysis for a resume owned by `user_id`.
    /// Fails with `NotFound` when the resume does not exist or belongs to someone else.
    async fn insert_analysis(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        report: &AnalysisReport,
    ) -> Result<AnalysisRow, StoreError>;

    /// All analyses owned by `user_id`, newest first.
    async fn list_analyses(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, StoreError>;
}

pub(crate) fn resume_not_found(resume_id: Uuid) -> StoreError {
    StoreError::NotFound(format!("Resume {resume_id} not found"))
}
