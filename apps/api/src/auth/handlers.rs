use axum::Json;

use crate::auth::{AuthUser, Identity};

/// GET /auth/v1/user
///
/// Returns the identity behind the bearer credential, or 401.
pub async fn handle_current_user(AuthUser(identity): AuthUser) -> Json<Identity> {
    Json(identity)
}
