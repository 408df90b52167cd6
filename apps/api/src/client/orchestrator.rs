use std::sync::Arc;

use tracing::{info, warn};

use crate::client::{Backend, ClientError};
use crate::models::analysis::AnalysisReport;
use crate::models::resume::{NewResume, ResumeRow};

pub const SUCCESS_NOTIFICATION: &str = "Resume analyzed successfully!";

/// What happens to an already-stored resume when its analysis fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OrphanPolicy {
    /// Keep the resume. Storage stays append-only; the row has no analysis.
    #[default]
    Retain,
    /// Delete the resume that was inserted for the failed attempt.
    Discard,
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub resume: ResumeRow,
    pub analysis: AnalysisReport,
    pub notification: &'static str,
}

/// Drives one submission: identity check, resume insert, analysis call.
/// Steps run strictly in order and none is retried.
pub struct SubmissionOrchestrator {
    backend: Arc<dyn Backend>,
    orphans: OrphanPolicy,
}

impl SubmissionOrchestrator {
    pub fn new(backend: Arc<dyn Backend>, orphans: OrphanPolicy) -> Self {
        Self { backend, orphans }
    }

    /// `submission` must already be trimmed and non-empty (see `IntakeForm`).
    pub async fn submit(&self, submission: &NewResume) -> Result<SubmissionOutcome, ClientError> {
        let identity = self
            .backend
            .current_user()
            .await?
            .ok_or(ClientError::NotAuthenticated)?;

        let resume = self.backend.insert_resume(submission).await?;
        info!("Stored resume {} for user {}", resume.id, identity.id);

        let analysis = match self
            .backend
            .invoke_analysis(resume.id, &submission.content)
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                self.handle_orphan(&resume).await;
                return Err(e);
            }
        };

        Ok(SubmissionOutcome {
            resume,
            analysis,
            notification: SUCCESS_NOTIFICATION,
        })
    }

    async fn handle_orphan(&self, resume: &ResumeRow) {
        match self.orphans {
            OrphanPolicy::Retain => {
                info!("Analysis failed; resume {} kept without analysis", resume.id)
            }
            OrphanPolicy::Discard => {
                if let Err(e) = self.backend.delete_resume(resume.id).await {
                    warn!("Could not discard orphaned resume {}: {e}", resume.id);
                }
            }
        }
    }
}
