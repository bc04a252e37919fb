//! # HTTP Server
//!
//! Mounts the employee routes under `/api` behind a permissive CORS layer
//! and request tracing.

use std::io;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::employee_routes::{employee_routes, EmployeeState};
use crate::store::EmployeeStore;

/// HTTP Server for the employee API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self::with_config(HttpServerConfig::default(), store)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, store: Arc<dyn EmployeeStore>) -> Self {
        let router = Self::build_router(store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(store: Arc<dyn EmployeeStore>) -> Router {
        let employee_state = Arc::new(EmployeeState::new(store));

        // Any origin, fixed methods and headers
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        Router::new()
            .nest("/api", employee_routes(employee_state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener. The host may be a name, resolved at bind time.
    pub async fn bind(&self) -> Result<TcpListener, io::Error> {
        TcpListener::bind(self.config.socket_addr()).await
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<(), io::Error> {
        let listener = self.bind().await?;
        info!(addr = %listener.local_addr()?, "server started");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
