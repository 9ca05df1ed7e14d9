//! HTTP request handlers: landing page and metrics scrape.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use openvpn_exporter_core::exposition::{self, CONTENT_TYPE};

use crate::state::AppState;

pub(crate) async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>OpenVPN Exporter</title></head>\n\
         <body>\n\
         <h1>OpenVPN Exporter</h1>\n\
         <p><a href='{}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        state.telemetry_path
    ))
}

/// Scrapes every status file and renders the exposition.
///
/// Scans read files synchronously, so they run on the blocking pool.
pub(crate) async fn handle_metrics(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let collector = state.collector.clone();
    let body = tokio::task::spawn_blocking(move || exposition::render(&collector.collect()))
        .await
        .map_err(|e| {
            error!(error = %e, "scrape task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!(error = %e, "failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response())
}
