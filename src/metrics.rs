use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::info;

pub trait Metrics: Send + Sync {
    fn record_request_elapsed(
        &self,
        method: &Method,
        path: &str,
        status: StatusCode,
        elapsed: Duration,
    );
}

pub struct LoggingMetrics;

impl Metrics for LoggingMetrics {
    fn record_request_elapsed(
        &self,
        method: &Method,
        path: &str,
        status: StatusCode,
        elapsed: Duration,
    ) {
        info!(
            target: "metrics",
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_us = elapsed.as_micros(),
            "Recorded request duration"
        );
    }
}

/// Times the wrapped route and reports one observation per request.
/// Mounted with `route_layer`, so requests the router cannot match never get here.
pub async fn track_request_metrics(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    app_state
        .metrics
        .record_request_elapsed(&method, &path, response.status(), started.elapsed());

    response
}
