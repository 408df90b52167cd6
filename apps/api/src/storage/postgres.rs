use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{resume_not_found, AnalysisStore, StoreError};
use crate::models::analysis::{AnalysisReport, AnalysisRow, AnalysisSummary};
use crate::models::resume::{NewResume, ResumeRow};

/// PostgreSQL-backed store. Ownership checks live in the `WHERE` clauses.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgStore {
    async fn insert_resume(
        &self,
        user_id: Uuid,
        resume: &NewResume,
    ) -> Result<ResumeRow, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes (user_id, title, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(&resume.title)
        .bind(&resume.content)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume {} for user {user_id}", row.id);
        Ok(row)
    }

    async fn delete_orphaned_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM resumes r
            WHERE r.id = $1 AND r.user_id = $2
              AND NOT EXISTS (SELECT 1 FROM analyses a WHERE a.resume_id = r.id)
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(resume_not_found(resume_id));
        }
        info!("Deleted orphaned resume {resume_id} for user {user_id}");
        Ok(())
    }

    async fn insert_analysis(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        report: &AnalysisReport,
    ) -> Result<AnalysisRow, StoreError> {
        // Selecting through `resumes` ties the new row to a resume the caller owns.
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analyses
                (resume_id, user_id, overall_score, strengths, improvements,
                 skill_gaps, job_recommendations)
            SELECT r.id, r.user_id, $3, $4, $5, $6, $7
            FROM resumes r
            WHERE r.id = $1 AND r.user_id = $2
            RETURNING *
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .bind(i32::from(report.overall_score))
        .bind(&report.strengths)
        .bind(&report.improvements)
        .bind(&report.skill_gaps)
        .bind(Json(&report.job_recommendations))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| resume_not_found(resume_id))?;

        info!("Inserted analysis {} for resume {resume_id}", row.id);
        Ok(row)
    }

    async fn list_analyses(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, StoreError> {
        Ok(sqlx::query_as::<_, AnalysisSummary>(
            r#"
            SELECT a.id, a.created_at, a.overall_score, r.title AS resume_title
            FROM analyses a
            JOIN resumes r ON r.id = a.resume_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
