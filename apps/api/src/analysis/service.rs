use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::prompts::{analysis_prompt, ANALYSIS_SYSTEM};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::AnalysisReport;
use crate::storage::AnalysisStore;

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Body of `POST /functions/v1/analyze-resume`. Both fields are optional at
/// the serde level so a missing field yields the function's own error message.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "resumeId")]
    pub resume_id: Option<String>,
    pub content: Option<String>,
}

impl AnalyzeRequest {
    pub fn into_parts(self) -> Result<(Uuid, String), AppError> {
        let resume_id = self.resume_id.filter(|id| !id.trim().is_empty());
        let content = self.content.filter(|c| !c.trim().is_empty());
        let (Some(resume_id), Some(content)) = (resume_id, content) else {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        };
        let resume_id = Uuid::parse_str(resume_id.trim())
            .map_err(|_| AppError::Validation(format!("Invalid resumeId '{resume_id}'")))?;
        Ok((resume_id, content))
    }
}

/// Runs one analysis for `caller`: a single gateway call, schema validation,
/// then one insert. Nothing is stored unless the reply is valid.
pub async fn analyze_resume(
    llm: &LlmClient,
    store: &dyn AnalysisStore,
    caller: &Identity,
    resume_id: Uuid,
    content: &str,
) -> Result<AnalysisReport, AppError> {
    let report: AnalysisReport = llm
        .call_json(ANALYSIS_SYSTEM, &analysis_prompt(content))
        .await?;
    report.validate().map_err(LlmError::from)?;

    let row = store.insert_analysis(caller.id, resume_id, &report).await?;
    info!(
        "Stored analysis {} (score {}) for resume {resume_id}",
        row.id, report.overall_score
    );

    Ok(report)
}
