//! Client side of the analyzer: the intake form, the submission orchestrator,
//! the result renderer and the history viewer, talking to the service through
//! the `Backend` trait.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::auth::Identity;
use crate::models::analysis::{AnalysisReport, AnalysisSummary};
use crate::models::resume::{NewResume, ResumeRow};

pub mod history;
pub mod intake;
pub mod orchestrator;
pub mod render;
pub mod session;

use session::Session;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Not authenticated")]
    NotAuthenticated,

    /// An error reported by the service, carrying its message verbatim.
    #[error("{0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not read resume file: {0}")]
    File(String),
}

/// Operations the client needs from the hosted service.
#[async_trait]
pub trait Backend: Send + Sync {
    /// The identity of the signed-in user, or `None` when there is no valid session.
    async fn current_user(&self) -> Result<Option<Identity>, ClientError>;

    async fn insert_resume(&self, resume: &NewResume) -> Result<ResumeRow, ClientError>;

    async fn invoke_analysis(
        &self,
        resume_id: Uuid,
        content: &str,
    ) -> Result<AnalysisReport, ClientError>;

    async fn delete_resume(&self, resume_id: Uuid) -> Result<(), ClientError>;

    async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `Backend` over HTTP against a running `resume-analyzer serve`.
pub struct HttpBackend {
    http: Client,
    base_url: String,
    session: Session,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .access_token()
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Passes successful responses through; turns the rest into `ClientError::Remote`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        debug!("Service returned {status}: {message}");
        Err(ClientError::Remote(message))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn current_user(&self) -> Result<Option<Identity>, ClientError> {
        let Some(token) = self.session.access_token() else {
            return Ok(None);
        };
        let response = self
            .http
            .get(self.url("/auth/v1/user"))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.sign_out();
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    async fn insert_resume(&self, resume: &NewResume) -> Result<ResumeRow, ClientError> {
        let response = self
            .http
            .post(self.url("/rest/v1/resumes"))
            .bearer_auth(self.token()?)
            .json(resume)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn invoke_analysis(
        &self,
        resume_id: Uuid,
        content: &str,
    ) -> Result<AnalysisReport, ClientError> {
        let response = self
            .http
            .post(self.url("/functions/v1/analyze-resume"))
            .bearer_auth(self.token()?)
            .json(&serde_json::json!({ "resumeId": resume_id, "content": content }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_resume(&self, resume_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/rest/v1/resumes/{resume_id}")))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>, ClientError> {
        let response = self
            .http
            .get(self.url("/rest/v1/analyses"))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
