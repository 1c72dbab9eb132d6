use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

mod clipboard;
mod config;
mod generator;
mod models;
mod store;
mod strength;

use clipboard::{Clipboard, ClipboardError, SystemClipboard};
use config::{Cli, Command, GenerateArgs, LogFormat, ServeArgs};
use generator::{GeneratorError, PasswordOptions};
use models::*;
use store::{PasswordStore, StoreError};
use strength::{score_password, Strength};

pub struct AppState {
    store: PasswordStore,
    clipboard: Arc<dyn Clipboard>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Generate(args) => print_generated(args),
        Command::Suggest => {
            let password = generator::suggest_strong_password();
            let report = score_password(&password);
            println!("suggested password : `{}`", password);
            println!("strength : {} {}", report.icon, report.strength);
            Ok(())
        }
        Command::Score { password } => {
            let report = score_password(&password);
            println!("strength : {} {} ({}/7)", report.icon, report.strength, report.score);
            for tip in report.feedback {
                println!("  - {}", tip);
            }
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let logger = match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?
        .add_directive("hyper=error".parse()?);

    let collector = Registry::default().with(logger).with(env_filter);
    tracing::subscriber::set_global_default(collector)?;
    Ok(())
}

fn print_generated(args: GenerateArgs) -> anyhow::Result<()> {
    let password = generator::generate_password(&PasswordOptions {
        length: args.length,
        use_digits: args.digits,
        use_special_chars: args.special,
    })?;
    println!("generated password : `{}`", password);
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting passmint, version {}", env!("CARGO_PKG_VERSION"));

    let state = AppState {
        store: PasswordStore::new(&args.store),
        clipboard: Arc::new(SystemClipboard::default()),
    };
    info!(store = %state.store.path().display(), "Using password store");

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Server running on http://{}", args.bind);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .route("/generate/another", post(generate_another))
        .route("/suggest", post(suggest))
        .route("/strength", post(check_strength))
        .route("/strength/guide", get(strength_guide))
        .route(
            "/passwords",
            get(list_passwords)
                .post(save_password)
                .delete(clear_passwords),
        )
        .route("/passwords/:index", get(get_password))
        .route("/passwords/:index/copy", post(copy_saved_password))
        .route("/clipboard", post(copy_password))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "passmint".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn scored(password: String) -> GeneratedPassword {
    let strength = score_password(&password);
    GeneratedPassword { password, strength }
}

/// An empty body means "use the defaults"; anything else must be a valid
/// `GenerateRequest`.
fn parse_options(body: &[u8]) -> Result<PasswordOptions, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PasswordOptions::default());
    }

    let req: GenerateRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;
    Ok(PasswordOptions::from(req))
}

async fn generate(body: Bytes) -> Result<impl IntoResponse, AppError> {
    let options = parse_options(&body)?;
    let password = generator::generate_password(&options)?;
    Ok(Json(scored(password)))
}

async fn generate_another(body: Bytes) -> Result<impl IntoResponse, AppError> {
    let options = parse_options(&body)?;
    let password = generator::generate_another(&options)?;
    Ok(Json(scored(password)))
}

async fn suggest() -> impl IntoResponse {
    Json(scored(generator::suggest_strong_password()))
}

async fn check_strength(Json(payload): Json<StrengthRequest>) -> impl IntoResponse {
    Json(score_password(&payload.password))
}

async fn strength_guide() -> impl IntoResponse {
    let guide: Vec<GuideEntry> = [
        Strength::Weak,
        Strength::Moderate,
        Strength::Strong,
        Strength::VeryStrong,
    ]
    .into_iter()
    .map(|strength| GuideEntry {
        strength: strength.to_string(),
        icon: strength.icon(),
        description: strength.guide(),
    })
    .collect();

    Json(guide)
}

async fn list_passwords(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RevealQuery>,
) -> impl IntoResponse {
    let saved = state.store.load().await;
    Json(ListPasswordsResponse {
        passwords: reveal_or_mask(saved, query.reveal),
    })
}

async fn save_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SavePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".into()));
    }

    let saved = state.store.save(&payload.password, &payload.label).await?;
    Ok((
        StatusCode::CREATED,
        Json(ListPasswordsResponse {
            passwords: reveal_or_mask(saved, false),
        }),
    ))
}

async fn clear_passwords(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    state.store.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_password(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RevealQuery>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .store
        .get(index)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No saved password at index {}", index)))?;

    Ok(Json(if query.reveal { record } else { record.masked() }))
}

async fn copy_saved_password(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .store
        .get(index)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No saved password at index {}", index)))?;

    state.clipboard.copy(&record.password)?;
    info!(label = %record.label, "Copied saved password to clipboard");
    Ok(Json(CopyResponse { copied: true }))
}

async fn copy_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CopyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".into()));
    }

    state.clipboard.copy(&payload.password)?;
    Ok(Json(CopyResponse { copied: true }))
}

fn reveal_or_mask(saved: Vec<SavedPassword>, reveal: bool) -> Vec<SavedPassword> {
    if reveal {
        saved
    } else {
        saved.iter().map(SavedPassword::masked).collect()
    }
}

#[derive(Debug)]
pub enum AppError {
    StoreError(String),
    NotFound(String),
    BadRequest(String),
    ClipboardUnavailable(String),
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyLabel => AppError::BadRequest(err.to_string()),
            other => AppError::StoreError(other.to_string()),
        }
    }
}

impl From<ClipboardError> for AppError {
    fn from(err: ClipboardError) -> Self {
        warn!(error = %err, "Clipboard copy failed");
        AppError::ClipboardUnavailable(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            AppError::StoreError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ClipboardUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
