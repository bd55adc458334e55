use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use campus_placement::config::AppConfig;
use campus_placement::error::AppError;
use campus_placement::telemetry;
use campus_placement::workflows::placement::{
    placement_router, ApplicationStatus, Cgpa, InterviewResult, InterviewStatus, InterviewUpdate,
    Job, JobId, JobRepository, JobStatus, MemoryRecordStore, MinCgpa, PlacementError,
    PlacementServices, RecruiterProfile, RoleProfile, StudentProfile, User, UserId,
    UserRepository,
};
use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Campus Placement Service",
    about = "Run the campus placement workflow service from the command line",
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
    /// Walk a seeded student through the placement pipeline and print the trail
    Demo,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
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
        Command::Demo => run_demo(),
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let store = Arc::new(MemoryRecordStore::new());
    let services = PlacementServices::new(store);

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(placement_router(services))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "campus placement service ready");

    axum::serve(listener, app).await?;
    Ok(())
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

/// Scripted walkthrough for stakeholder demos: seed a recruiter, a posting,
/// and two students, then run one of them through submission, review, two
/// interview rounds, and an offer.
fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(MemoryRecordStore::new());
    seed_demo_records(&store)?;
    let services = PlacementServices::new(store);

    let aditi = UserId("stu-000001".to_string());
    let rahul = UserId("stu-000002".to_string());
    let posting = JobId("job-demo-01".to_string());

    println!("Campus placement walkthrough");

    let eligibility = services
        .applications
        .check_eligibility(&rahul, &posting)
        .map_err(AppError::from)?;
    println!(
        "- {} eligibility for {}: eligible={} reason={}",
        rahul.0,
        posting.0,
        eligibility.is_eligible(),
        eligibility
            .reason()
            .map(|reason| reason.label())
            .unwrap_or("-")
    );

    let application = services
        .applications
        .create(&aditi, &posting)
        .map_err(AppError::from)?;
    println!(
        "- {} applied to {}: {} ({})",
        aditi.0, posting.0, application.id.0, application.status
    );

    let application = services
        .applications
        .set_status(&application.id, ApplicationStatus::UnderReview)
        .map_err(AppError::from)?;
    println!("- application moved to {}", application.status);
    let application = services
        .applications
        .set_status(&application.id, ApplicationStatus::Interview)
        .map_err(AppError::from)?;
    println!("- application moved to {}", application.status);

    let technical = services
        .interviews
        .schedule(
            &application.id,
            "Technical".to_string(),
            Utc::now() + Duration::days(3),
            "Placement cell, room 204".to_string(),
        )
        .map_err(AppError::from)?;
    println!(
        "- scheduled {} round {} at {}",
        technical.id.0, technical.round, technical.location
    );

    services
        .interviews
        .update(
            &technical.id,
            InterviewUpdate {
                status: Some(InterviewStatus::Completed),
                result: Some(InterviewResult::Passed),
                feedback: Some("Strong fundamentals".to_string()),
                further_rounds: true,
                ..InterviewUpdate::default()
            },
        )
        .map_err(AppError::from)?;
    println!("- Technical round passed, further rounds remain");

    let hr = services
        .interviews
        .schedule(
            &application.id,
            "HR".to_string(),
            Utc::now() + Duration::days(7),
            "Placement cell, room 101".to_string(),
        )
        .map_err(AppError::from)?;
    services
        .interviews
        .update(
            &hr.id,
            InterviewUpdate {
                status: Some(InterviewStatus::Completed),
                result: Some(InterviewResult::Passed),
                feedback: Some("Good culture fit".to_string()),
                ..InterviewUpdate::default()
            },
        )
        .map_err(AppError::from)?;

    let final_state = services
        .applications
        .get(&application.id)
        .map_err(AppError::from)?;
    println!("- HR round passed, final state: {}", final_state.status);

    Ok(())
}

fn seed_demo_records(store: &Arc<MemoryRecordStore>) -> Result<(), AppError> {
    let users = vec![
        User {
            id: UserId("rec-000001".to_string()),
            full_name: "Meera Nair".to_string(),
            email: "meera.nair@nimbusworks.example".to_string(),
            phone: None,
            profile: RoleProfile::Recruiter(RecruiterProfile {
                company_name: "Nimbus Works".to_string(),
                designation: "Talent Lead".to_string(),
            }),
        },
        User {
            id: UserId("stu-000001".to_string()),
            full_name: "Aditi Sharma".to_string(),
            email: "aditi.sharma@campus.example".to_string(),
            phone: Some("98450 11223".to_string()),
            profile: RoleProfile::Student(StudentProfile {
                department: "Computer Science".to_string(),
                cgpa: Cgpa::Recorded(8.4),
            }),
        },
        User {
            id: UserId("stu-000002".to_string()),
            full_name: "Rahul Verma".to_string(),
            email: "rahul.verma@campus.example".to_string(),
            phone: None,
            profile: RoleProfile::Student(StudentProfile {
                department: "Mechanical".to_string(),
                cgpa: Cgpa::Recorded(6.9),
            }),
        },
    ];
    for user in users {
        store
            .insert_user(user)
            .map_err(|err| AppError::Workflow(PlacementError::from(err)))?;
    }

    store
        .insert_job(Job {
            id: JobId("job-demo-01".to_string()),
            posted_by: UserId("rec-000001".to_string()),
            title: "Graduate Software Engineer".to_string(),
            description: "Backend services team, Bengaluru".to_string(),
            min_cgpa: MinCgpa::AtLeast(0.75),
            status: JobStatus::Active,
        })
        .map_err(|err| AppError::Workflow(PlacementError::from(err)))?;

    Ok(())
}
