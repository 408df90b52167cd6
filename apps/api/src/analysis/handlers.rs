//! Axum route handlers for the analysis function and analysis history.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use tracing::warn;

use crate::analysis::service::{analyze_resume, AnalyzeRequest, MISSING_FIELDS};
use crate::auth::{resolve_caller, AuthUser};
use crate::errors::{AppError, FunctionError};
use crate::models::analysis::{AnalysisReport, AnalysisSummary};
use crate::state::AppState;

/// POST /functions/v1/analyze-resume
///
/// Body `{resumeId, content}` plus a bearer credential. The body is parsed as
/// JSON whatever its content type. Answers 200 with the analysis, or 500 with
/// `{"error": message}` on any failure.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisReport>, FunctionError> {
    let request: AnalyzeRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected analysis request body: {e}");
        AppError::Validation(MISSING_FIELDS.to_string())
    })?;
    let (resume_id, content) = request.into_parts()?;

    let caller = resolve_caller(&state, &headers).await?;

    let report =
        analyze_resume(&state.llm, state.store.as_ref(), &caller, resume_id, &content).await?;

    Ok(Json(report))
}

/// GET /rest/v1/analyses
///
/// The caller's analyses joined with their resume titles, newest first.
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<AnalysisSummary>>, AppError> {
    let analyses = state.store.list_analyses(caller.id).await?;
    Ok(Json(analyses))
}
