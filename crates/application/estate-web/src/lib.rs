//! Estate Web
//!
//! Server-rendered dashboard with two views:
//!
//! - **Investment Predictor**: property form, verdict and 5-year price forecast
//! - **Insights Dashboard**: four Plotly charts over the reference dataset
//!
//! Pages are askama templates. Requests carrying `HX-Request` get the bare
//! fragment for the `#main` swap, everything else gets the full page shell.

pub mod error;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/predictor") }))
        .merge(routes::predictor::router())
        .merge(routes::insights::router())
        .merge(routes::assets::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Real Estate Advisor listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
