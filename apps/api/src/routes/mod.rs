pub mod health;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::analysis::handlers as analysis;
use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Permissive CORS so browser clients can call the function from any origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route("/auth/v1/user", get(auth::handle_current_user))
        // Storage
        .route("/rest/v1/resumes", post(resumes::handle_create_resume))
        .route(
            "/rest/v1/resumes/:id",
            delete(resumes::handle_delete_orphaned_resume),
        )
        .route("/rest/v1/analyses", get(analysis::handle_list_analyses))
        // Analysis function
        .route(
            "/functions/v1/analyze-resume",
            post(analysis::handle_analyze_resume),
        )
        .layer(cors_layer())
        .with_state(state)
}
