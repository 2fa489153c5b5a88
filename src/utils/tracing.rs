use axum::{body::Body, extract::Request, response::Response};
use color_eyre::eyre::Result;
use std::time::Duration;
use tracing::{Level, Span};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Registers the global tracing subscriber and color-eyre panic hooks.
/// Call once at process start.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    color_eyre::install()
}

/// One span per request, carrying a generated request id so log lines
/// from the same request can be correlated.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = uuid::Uuid::new_v4();
    tracing::span!(
        Level::INFO,
        "[REQUEST]",
        method = tracing::field::display(request.method()),
        uri = tracing::field::display(request.uri()),
        version = tracing::field::debug(request.version()),
        request_id = tracing::field::display(request_id),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::event!(Level::INFO, "[REQUEST START]");
}

pub fn on_response(
    response: &Response,
    latency: Duration,
    _span: &Span,
) {
    tracing::event!(
        Level::INFO,
        latency = ?latency,
        status = tracing::field::display(response.status()),
        "[REQUEST END]"
    );
}
