use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow};
use crate::state::AppState;

/// POST /rest/v1/resumes
///
/// Stores a resume owned by the caller. Title and content are trimmed and must not be empty.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<NewResume>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let resume = request
        .normalized()
        .ok_or_else(|| AppError::Validation("title and content cannot be empty".to_string()))?;

    let row = state.store.insert_resume(caller.id, &resume).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /rest/v1/resumes/:id
///
/// Removes a caller-owned resume that has no analysis. Anything else is 404.
pub async fn handle_delete_orphaned_resume(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_orphaned_resume(caller.id, resume_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
