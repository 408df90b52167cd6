use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{resume_not_found, AnalysisStore, StoreError};
use crate::models::analysis::{AnalysisReport, AnalysisRow, AnalysisSummary};
use crate::models::resume::{NewResume, ResumeRow};

/// In-memory store with the same ownership rules as `PgStore`.
/// Timestamps advance by one second per insert so ordering is deterministic.
#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<Vec<ResumeRow>>,
    analyses: Mutex<Vec<AnalysisRow>>,
    ticks: Mutex<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resumes(&self) -> Vec<ResumeRow> {
        self.resumes.lock().unwrap().clone()
    }

    pub fn analyses(&self) -> Vec<AnalysisRow> {
        self.analyses.lock().unwrap().clone()
    }

    fn next_timestamp(&self) -> chrono::DateTime<Utc> {
        let mut ticks = self.ticks.lock().unwrap();
        *ticks += 1;
        Utc::now() + Duration::seconds(*ticks)
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn insert_resume(
        &self,
        user_id: Uuid,
        resume: &NewResume,
    ) -> Result<ResumeRow, StoreError> {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id,
            title: resume.title.clone(),
            content: resume.content.clone(),
            created_at: self.next_timestamp(),
        };
        self.resumes.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn delete_orphaned_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<(), StoreError> {
        let referenced = self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.resume_id == resume_id);
        let mut resumes = self.resumes.lock().unwrap();
        let position = resumes
            .iter()
            .position(|r| r.id == resume_id && r.user_id == user_id);
        match position {
            Some(index) if !referenced => {
                resumes.remove(index);
                Ok(())
            }
            _ => Err(resume_not_found(resume_id)),
        }
    }

    async fn insert_analysis(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        report: &AnalysisReport,
    ) -> Result<AnalysisRow, StoreError> {
        let owned = self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.id == resume_id && r.user_id == user_id);
        if !owned {
            return Err(resume_not_found(resume_id));
        }
        let row = AnalysisRow {
            id: Uuid::new_v4(),
            resume_id,
            user_id,
            overall_score: i32::from(report.overall_score),
            strengths: report.strengths.clone(),
            improvements: report.improvements.clone(),
            skill_gaps: report.skill_gaps.clone(),
            job_recommendations: Json(report.job_recommendations.clone()),
            created_at: self.next_timestamp(),
        };
        self.analyses.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_analyses(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, StoreError> {
        let resumes = self.resumes.lock().unwrap();
        let mut summaries: Vec<AnalysisSummary> = self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let resume = resumes.iter().find(|r| r.id == a.resume_id)?;
                Some(AnalysisSummary {
                    id: a.id,
                    created_at: a.created_at,
                    overall_score: a.overall_score,
                    resume_title: resume.title.clone(),
                })
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: u8) -> AnalysisReport {
        AnalysisReport {
            overall_score: score,
            strengths: vec!["Concise".into()],
            improvements: vec!["Add metrics".into()],
            skill_gaps: vec!["Go".into()],
            job_recommendations: vec![],
        }
    }

    fn new_resume(title: &str) -> NewResume {
        NewResume {
            title: title.into(),
            content: "Ten years of Rust".into(),
        }
    }

    #[tokio::test]
    async fn test_analysis_requires_owned_resume() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let resume = store.insert_resume(owner, &new_resume("Mine")).await.unwrap();

        let err = store
            .insert_analysis(stranger, resume.id, &report(70))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.analyses().is_empty());

        let row = store.insert_analysis(owner, resume.id, &report(70)).await.unwrap();
        assert_eq!(row.resume_id, resume.id);
        assert_eq!(row.user_id, owner);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        for title in ["First", "Second", "Third"] {
            let resume = store.insert_resume(user, &new_resume(title)).await.unwrap();
            store.insert_analysis(user, resume.id, &report(60)).await.unwrap();
        }
        let foreign = store.insert_resume(other, &new_resume("Other")).await.unwrap();
        store.insert_analysis(other, foreign.id, &report(90)).await.unwrap();

        let titles: Vec<_> = store
            .list_analyses(user)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.resume_title)
            .collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_delete_only_removes_unreferenced_resumes() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let analyzed = store.insert_resume(user, &new_resume("Analyzed")).await.unwrap();
        store.insert_analysis(user, analyzed.id, &report(80)).await.unwrap();
        let orphan = store.insert_resume(user, &new_resume("Orphan")).await.unwrap();

        assert!(store.delete_orphaned_resume(user, analyzed.id).await.is_err());
        assert!(store
            .delete_orphaned_resume(Uuid::new_v4(), orphan.id)
            .await
            .is_err());
        store.delete_orphaned_resume(user, orphan.id).await.unwrap();

        let remaining: Vec<_> = store.resumes().into_iter().map(|r| r.title).collect();
        assert_eq!(remaining, vec!["Analyzed"]);
    }
}
