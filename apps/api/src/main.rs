mod analysis;
mod auth;
mod client;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod resumes;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtIdentityProvider;
use crate::client::history::HistoryViewer;
use crate::client::intake::{read_resume_file, IntakeForm};
use crate::client::orchestrator::{OrphanPolicy, SubmissionOrchestrator};
use crate::client::render::render;
use crate::client::session::{AuthEvent, Session};
use crate::client::HttpBackend;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::PgStore;

#[derive(Parser)]
#[command(name = "resume-analyzer", version, about = "AI-powered resume analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (analysis function, storage and identity routes)
    Serve,
    /// Submit a resume for analysis and print the result
    Analyze {
        /// Resume title
        #[arg(long)]
        title: String,
        /// Resume text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,
        /// Read the resume text from a .txt or .pdf file
        #[arg(long)]
        file: Option<PathBuf>,
        /// What to do with the stored resume if the analysis fails
        #[arg(long, value_enum, default_value_t = OrphanPolicy::Retain)]
        orphans: OrphanPolicy,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// List previous analyses, newest first
    History {
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Args)]
struct ClientArgs {
    /// Base URL of the running service
    #[arg(long, env = "RESUME_API_URL", default_value = "http://localhost:8080")]
    api_url: String,
    /// Access token issued by the identity provider
    #[arg(long, env = "RESUME_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl ClientArgs {
    fn connect(&self) -> (Session, Arc<HttpBackend>) {
        let session = match &self.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        if !session.is_signed_in() {
            warn!("No access token configured; set RESUME_ACCESS_TOKEN or pass --token");
        }
        let backend = Arc::new(HttpBackend::new(self.api_url.clone(), session.clone()));
        (session, backend)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        Command::Analyze {
            title,
            content,
            file,
            orphans,
            client,
        } => {
            init_tracing(&log_level());
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => read_resume_file(&path)?,
                (None, None) => bail!("either --content or --file is required"),
            };
            analyze(title, content, orphans, &client).await
        }
        Command::History { client } => {
            init_tracing(&log_level());
            history(&client).await
        }
    }
}

fn log_level() -> String {
    dotenvy::dotenv().ok();
    std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    let llm = LlmClient::new(config.ai_gateway_url.clone(), config.ai_gateway_api_key.clone())?;
    info!(
        "LLM client initialized (model: {}, gateway: {})",
        llm_client::MODEL,
        config.ai_gateway_url
    );

    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        identity: Arc::new(JwtIdentityProvider::new(
            &config.jwt_secret,
            &config.jwt_audience,
        )),
        llm,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn analyze(
    title: String,
    content: String,
    orphans: OrphanPolicy,
    args: &ClientArgs,
) -> Result<()> {
    let (session, backend) = args.connect();
    let mut events = session.subscribe();
    let orchestrator = SubmissionOrchestrator::new(backend, orphans);
    let mut form = IntakeForm::new(title, content);

    println!("Analyzing...");
    let result = form.submit(&orchestrator).await;

    if events.pending() == Some(AuthEvent::SignedOut) {
        warn!("Session was rejected by the service; sign in again to continue");
    }

    let outcome = result?;
    println!("{}", outcome.notification);
    println!(
        "Stored resume \"{}\" ({})\n",
        outcome.resume.title, outcome.resume.id
    );
    print!("{}", render(&outcome.analysis));
    Ok(())
}

async fn history(args: &ClientArgs) -> Result<()> {
    let (_session, backend) = args.connect();
    let mut viewer = HistoryViewer::new(backend);
    print!("{}", viewer.view());
    let view = viewer.load().await;
    print!("{view}");
    Ok(())
}
