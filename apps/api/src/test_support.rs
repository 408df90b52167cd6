//! Shared fixtures for unit tests: token issuing, a fake AI gateway and an
//! application wired to in-memory storage.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{Claims, JwtIdentityProvider};
use crate::llm_client::LlmClient;
use crate::models::analysis::{AnalysisReport, JobRecommendation};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::memory::MemoryStore;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_AUDIENCE: &str = "authenticated";

pub fn issue_token(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id,
        aud: TEST_AUDIENCE.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        email: Some("candidate@example.com".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn sample_report() -> AnalysisReport {
    AnalysisReport {
        overall_score: 78,
        strengths: vec![
            "Quantified impact in most bullets".into(),
            "Strong backend stack".into(),
        ],
        improvements: vec!["Summary is too long".into()],
        skill_gaps: vec!["Kubernetes".into(), "Terraform".into()],
        job_recommendations: vec![
            JobRecommendation {
                title: "Backend Engineer".into(),
                match_score: 88,
                required_skills: vec!["Rust".into(), "PostgreSQL".into()],
            },
            JobRecommendation {
                title: "Site Reliability Engineer".into(),
                match_score: 67,
                required_skills: vec!["Kubernetes".into()],
            },
        ],
    }
}

pub fn sample_report_json() -> String {
    serde_json::to_string(&sample_report()).unwrap()
}

#[derive(Clone)]
pub enum GatewayReply {
    /// 200 with the given string as the first choice's message content.
    Content(String),
    /// The given status with a plain-text body.
    Status(u16, String),
    /// 200 with the given JSON as the whole response body.
    Raw(Value),
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct GatewayState {
    reply: GatewayReply,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct FakeGateway {
    pub url: String,
    state: Arc<GatewayState>,
}

impl FakeGateway {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

async fn fake_completion(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.seen.lock().unwrap().push(SeenRequest {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });
    match &state.reply {
        GatewayReply::Content(content) => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 240 }
        }))
        .into_response(),
        GatewayReply::Status(code, body) => {
            (StatusCode::from_u16(*code).unwrap(), body.clone()).into_response()
        }
        GatewayReply::Raw(value) => Json(value.clone()).into_response(),
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve_locally(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn spawn_gateway(reply: GatewayReply) -> FakeGateway {
    let state = Arc::new(GatewayState {
        reply,
        seen: Mutex::new(Vec::new()),
    });
    let router = Router::new()
        .route("/v1/chat/completions", post(fake_completion))
        .with_state(state.clone());
    FakeGateway {
        url: serve_locally(router).await,
        state,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub gateway: FakeGateway,
}

/// The full application backed by `MemoryStore` and a fake gateway answering with `reply`.
pub async fn test_app(reply: GatewayReply) -> TestApp {
    let gateway = spawn_gateway(reply).await;
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        identity: Arc::new(JwtIdentityProvider::new(TEST_SECRET, TEST_AUDIENCE)),
        llm: LlmClient::new(gateway.url.clone(), "test-gateway-key").unwrap(),
    };
    TestApp {
        router: build_router(state),
        store,
        gateway,
    }
}
