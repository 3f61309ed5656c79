//! Web adapter exposing the analysis pipeline over REST.
//!
//! The handlers construct a Measurement from the request, call the
//! aggregator, and render the result; no thresholds or formulas live
//! here. Static files for the form frontend are served as a fallback.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::analysis::{self, MetricsResult};
use crate::auth::{self, AuthError};
use crate::domain::Measurement;
use crate::export;
use crate::storage::{self, ClientRecord};

/// Shared application state.
pub struct AppState {
    /// Connection pool for the history and users database.
    pub pool: SqlitePool,
}

// === JSON Request/Response Types ===

#[derive(Deserialize)]
pub struct AnalysisRequest {
    /// When present, the result is persisted under this name.
    pub name: Option<String>,
    #[serde(flatten)]
    pub measurement: Measurement,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub saved_id: Option<i64>,
    pub metrics: MetricsResult,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
}

// === Router Setup ===

/// Creates the application router.
pub fn create_router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/api/analysis", post(post_analysis))
        .route("/api/history", get(get_history))
        .route("/api/history/{name}", get(get_history_for))
        .route("/api/history.csv", get(get_history_csv))
        .route("/api/register", post(post_register))
        .route("/api/login", post(post_login))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .with_state(state)
}

/// Runs the web server.
pub async fn run_server(
    state: Arc<AppState>,
    port: u16,
    static_dir: PathBuf,
) -> anyhow::Result<()> {
    let app = create_router(state, static_dir);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    println!("Server running at http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// === API Handlers ===

/// POST /api/analysis - Run the full computation, optionally persisting
/// the result when a name is supplied.
async fn post_analysis(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, String)> {
    // Validation and computation failures are surfaced verbatim so the
    // form can display them next to the offending field
    let metrics = analysis::compute(&request.measurement)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let saved_id = match &request.name {
        Some(name) => {
            let record = ClientRecord::new(name, &request.measurement, &metrics);
            let id = storage::save(&state.pool, &record).await.map_err(|e| {
                log::error!("Failed to save record for {}: {}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to save record".to_string())
            })?;
            Some(id)
        }
        None => None,
    };

    Ok(Json(AnalysisResponse { saved_id, metrics }))
}

/// GET /api/history - All stored records.
async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClientRecord>>, (StatusCode, String)> {
    let records = storage::load_history(&state.pool)
        .await
        .map_err(internal_error)?;
    Ok(Json(records))
}

/// GET /api/history/:name - Records for one person.
async fn get_history_for(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ClientRecord>>, (StatusCode, String)> {
    let records = storage::history_for(&state.pool, &name)
        .await
        .map_err(internal_error)?;
    Ok(Json(records))
}

/// GET /api/history.csv - CSV download of the full history.
async fn get_history_csv(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let records = storage::load_history(&state.pool)
        .await
        .map_err(internal_error)?;

    let csv = export::history_csv(&records).map_err(|e| {
        log::error!("CSV export failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "export failed".to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// POST /api/register - Create a new account.
async fn post_register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<StatusCode, (StatusCode, String)> {
    match auth::register(&state.pool, &credentials.username, &credentials.password).await {
        Ok(()) => Ok(StatusCode::CREATED),
        Err(e @ AuthError::UsernameTaken(_)) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(e) => {
            log::error!("Registration failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "registration failed".to_string()))
        }
    }
}

/// POST /api/login - Check credentials.
async fn post_login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let authenticated = auth::verify(&state.pool, &credentials.username, &credentials.password)
        .await
        .map_err(|e| {
            log::error!("Login check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "login failed".to_string())
        })?;

    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    Ok((status, Json(LoginResponse { authenticated })))
}

// === Helper Functions ===

fn internal_error(e: sqlx::Error) -> (StatusCode, String) {
    log::error!("Database error: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
}
