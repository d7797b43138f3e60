//! Application startup and lifecycle management.
//!
//! Builds the axum router, binds the listener (port 0 friendly for tests),
//! and runs the server until stopped.

use crate::ai::{ChatService, GroqChatClient};
use crate::handlers;
use crate::models::Config;
use crate::{Error, Result};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The chat service is injected at construction; when the upstream API key is
/// absent the slot stays empty and affected requests get a configuration
/// error instead of an ambient per-request env lookup.
#[derive(Clone)]
pub struct AppState {
    pub chat: Option<Arc<dyn ChatService>>,
}

impl AppState {
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self { chat }
    }

    pub fn chat_service(&self) -> Result<&dyn ChatService> {
        self.chat.as_deref().ok_or(Error::Configuration)
    }
}

/// Liveness endpoint for deployment probes.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "book-actions-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the router with both API routes and the health endpoint.
///
/// Non-POST methods on the API routes hit the method fallback before the body
/// is ever read.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/analyze-book",
            post(handlers::analyze_book).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/generate-plan",
            post(handlers::generate_plan).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener and assemble application state from configuration.
    pub async fn build(config: Config) -> Result<Self> {
        let chat: Option<Arc<dyn ChatService>> = config.groq_api_key.as_ref().map(|key| {
            Arc::new(GroqChatClient::new(key.clone(), config.model.clone()))
                as Arc<dyn ChatService>
        });

        if chat.is_some() {
            tracing::info!(model = %config.model, "Initialized Groq chat client");
        }

        let state = AppState::new(chat);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            Error::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the server until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, build_router(self.state)).await
    }
}
