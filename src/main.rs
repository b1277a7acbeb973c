use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use recruit_ai::config::AppConfig;
use recruit_ai::error::AppError;
use recruit_ai::oracle::HttpCompletionOracle;
use recruit_ai::telemetry;
use recruit_ai::workflows::screening::{
    compile_prompt, screening_router, ApplicantRecord, AutoPromotionPolicy, CvScreeningService,
    CvSection, InMemoryScreeningRepository, InterviewId, InterviewRecord, PipelineStatus,
    PostingId, PostingPolicy, ScreeningAnswers, Stage,
};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "CV Screening Orchestrator",
    about = "Run the AI-assisted CV pre-screening service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screening utilities that run without the HTTP server
    Screening {
        #[command(subcommand)]
        command: ScreeningCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed the in-memory store with a demo applicant and posting
    #[arg(long)]
    demo: bool,
}

#[derive(Subcommand, Debug)]
enum ScreeningCommand {
    /// Compile the evaluation prompt from a JSON fixture without calling the model
    PromptPreview(PromptPreviewArgs),
}

#[derive(Args, Debug)]
struct PromptPreviewArgs {
    /// Path to a JSON fixture with posting, cv, applicant_name, and optional answers
    #[arg(long)]
    fixture: PathBuf,
}

/// Offline fixture consumed by `screening prompt-preview`.
#[derive(Debug, Deserialize)]
struct PromptFixture {
    posting: PostingPolicy,
    cv: ApplicantRecord,
    applicant_name: String,
    #[serde(default)]
    answers: Option<ScreeningAnswers>,
    #[serde(default)]
    instructions: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screening {
            command: ScreeningCommand::PromptPreview(args),
        } => run_prompt_preview(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config)?;

    let repository = Arc::new(InMemoryScreeningRepository::default());
    if args.demo {
        seed_demo(&repository);
        info!("demo applicant and posting seeded");
    }

    let oracle = Arc::new(HttpCompletionOracle::new(config.oracle.clone())?);
    let service = Arc::new(CvScreeningService::new(repository, oracle));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(screening_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cv screening orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_prompt_preview(args: PromptPreviewArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.fixture)?;
    let fixture: PromptFixture = serde_json::from_str(&raw)?;

    let instructions = fixture.instructions.unwrap_or_else(|| {
        "Compare the applicant's experience, skills, and education against the job description \
         and classify the overall fit."
            .to_string()
    });

    let prompt = compile_prompt(
        &fixture.posting,
        &fixture.cv,
        &fixture.applicant_name,
        fixture.answers.as_ref(),
        &instructions,
    );

    println!("{prompt}");
    Ok(())
}

fn seed_demo(repository: &InMemoryScreeningRepository) {
    repository.insert_posting(PostingPolicy {
        id: PostingId("demo-posting".to_string()),
        job_title: "Platform Engineer".to_string(),
        description: "Own the hiring platform's ingestion and screening services.".to_string(),
        secret_prompt: None,
        questions: Vec::new(),
        auto_promotion: AutoPromotionPolicy::GoodFitAndAbove,
        last_activity_at: None,
    });
    repository.insert_cv(ApplicantRecord {
        email: "demo.applicant@example.com".to_string(),
        sections: vec![CvSection {
            name: "Experience".to_string(),
            content: "Four years operating Kubernetes clusters and CI pipelines.".to_string(),
        }],
    });
    repository.insert_interview(InterviewRecord {
        interview_id: InterviewId("demo-interview".to_string()),
        email: "demo.applicant@example.com".to_string(),
        posting_id: PostingId("demo-posting".to_string()),
        applicant_name: "Demo Applicant".to_string(),
        current_step: Stage::CvScreening,
        status: PipelineStatus::ForCvScreening,
        cv_status: None,
        state_class: None,
        cv_setting_result: None,
        cv_screening_reason: None,
        confidence: None,
        job_fit_score: None,
        stage_history: Vec::new(),
        application_metadata: None,
        updated_at: Utc::now(),
    });
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
