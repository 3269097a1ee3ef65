//! Embedded web server: the Telegram web-app form pages plus the JSON
//! API those pages (and the scheduled performance refresh) call.

pub mod api;
pub mod forms;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/webapp", get(forms::register_page))
        .route("/webapp/submit", post(api::submit_registration))
        .route("/webapp/existing-account", get(forms::account_page))
        .route("/webapp/existing-account/submit", post(api::submit_account))
        .route("/webapp/edit-accounts", get(forms::edit_accounts_page))
        .route("/api/trading_accounts", get(api::list_accounts))
        .route("/api/update_trading_account", post(api::update_account))
        .route("/api/delete_trading_account", post(api::delete_account))
        .route("/update-performances", get(api::refresh_performances))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "web server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
