use crate::auth;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Customer, CustomerInput, DeleteResponse, LoginRequest, LoginResponse, Stats};
use crate::store::CustomerStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Returns the service status and version.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "galeri-crm-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/login
///
/// Verifies credentials and returns the user together with a signed access
/// token, or 401 when either the username or the password is wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    tracing::info!(username = %payload.username, "POST /api/login");

    let response = auth::login(&state.db, &state.config, &payload.username, &payload.password)
        .await?;

    Ok(Json(response))
}

/// GET /api/customers
///
/// All customers, newest first. Search/filtering is done client-side.
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, AppError> {
    tracing::debug!("GET /api/customers");

    let customers = CustomerStore::new(state.db.clone()).list().await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
///
/// One customer, or 404 when the id does not exist.
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>, AppError> {
    tracing::debug!(id, "GET /api/customers/:id");

    let customer = CustomerStore::new(state.db.clone()).get(id).await?;
    Ok(Json(customer))
}

/// POST /api/customers
///
/// Creates a customer from the supplied fields and returns the created row
/// with 201. `ad` and `soyad` are required; everything else defaults.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    tracing::info!("POST /api/customers");

    let customer = CustomerStore::new(state.db.clone()).create(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/:id
///
/// Full replace of all mutable fields; 404 when the id does not exist.
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, AppError> {
    tracing::info!(id, "PUT /api/customers/:id");

    let customer = CustomerStore::new(state.db.clone()).update(id, input).await?;
    Ok(Json(customer))
}

/// PATCH /api/customers/:id/premium
///
/// Flips the premium flag and returns the updated row; 404 when absent.
pub async fn toggle_premium(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>, AppError> {
    tracing::info!(id, "PATCH /api/customers/:id/premium");

    let customer = CustomerStore::new(state.db.clone()).toggle_premium(id).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id
///
/// Hard delete; returns a confirmation message, or 404 when absent.
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    tracing::info!(id, "DELETE /api/customers/:id");

    CustomerStore::new(state.db.clone()).delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "Müşteri silindi".to_string(),
    }))
}

/// GET /api/stats
///
/// Aggregate counts for the dashboard.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<Stats>, AppError> {
    tracing::debug!("GET /api/stats");

    let stats = CustomerStore::new(state.db.clone()).stats().await?;
    Ok(Json(stats))
}
