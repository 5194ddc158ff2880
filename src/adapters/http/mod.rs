pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;

use crate::adapters::clock::SystemClock;
use crate::adapters::random::RngSource;
use crate::core::service::ScanSimulator;
use crate::core::{ConfigProvider, ScanService};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ScanService>,
    /// `None` disables authentication.
    pub bearer_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: Arc<dyn ScanService>, bearer_token: Option<String>) -> Self {
        Self {
            service,
            bearer_token: bearer_token.map(Arc::from),
        }
    }

    /// Wire the production collaborators: OS-seeded randomness and the system clock.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let simulator = ScanSimulator::from_config(
            config,
            Box::new(RngSource::from_entropy()),
            Arc::new(SystemClock),
        );
        Self::new(Arc::new(simulator), config.bearer_token())
    }
}

pub fn router(state: AppState) -> Router {
    let accounts = Router::new()
        .route("/account", post(handlers::create_account))
        .route("/account/", post(handlers::create_account))
        .route("/account/{account_uid}/domain", post(handlers::add_domain))
        .route(
            "/account/{account_uid}/domain/{domain_uid}/scan",
            post(handlers::request_scan).get(handlers::scan_status_by_domain),
        )
        .route(
            "/account/{account_uid}/domain/{domain_uid}/scan/{scan_uid}",
            get(handlers::scan_status),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .merge(accounts)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}", addr);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
