use crate::metrics::ApiMetrics;
use anyhow::Result;
use axum::body::Body;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Response as HttpResponse, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use mesostic_engine::{ComposeError, Composer};
use mesostic_protocol::{codes, serialize_json, ErrorEnvelope, Submit, TEXT_FIELD};
use std::sync::Arc;

/// Shared per-process state behind the router
pub struct AppState {
    composer: Composer,
    metrics: ApiMetrics,
}

impl AppState {
    pub fn new() -> Result<Self> {
        Ok(Self {
            composer: Composer::default(),
            metrics: ApiMetrics::new()?,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/metrics", get(export_metrics))
        .route("/app", post(submit_json))
        .route("/app/:spine", post(submit_form))
        .with_state(state)
}

pub async fn serve(bind: &str, state: Arc<AppState>) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("serving mesostic API on http://{bind}/app");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Readiness probe: counted but never logged
async fn ping(State(state): State<Arc<AppState>>) -> &'static str {
    state.metrics.ping_total.inc();
    "pong\n"
}

async fn export_metrics(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let body = state
        .metrics
        .render()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(HttpResponse::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .expect("valid HTTP response"))
}

/// POST /app — JSON submission
async fn submit_json(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Response, StatusCode> {
    state.metrics.post_total.inc();
    let timer = state.metrics.post_duration.start_timer();

    let response = match serde_json::from_slice::<Submit>(&body) {
        Ok(submit) => compose_response(&state, &submit.text, &submit.spine_string)?,
        Err(err) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::new(codes::INVALID_REQUEST, format!("invalid JSON body: {err}"))
                .with_hint(r#"send {"Text": "...", "SpineString": "..."}"#),
        )?,
    };

    timer.observe_duration();
    log_request("POST", "/app", &headers, response.status());
    Ok(response)
}

/// POST /app/:spine — multipart form submission, spine taken from the path
async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(spine): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    state.metrics.post_total.inc();
    let timer = state.metrics.post_duration.start_timer();

    let response = match read_text_part(&mut multipart).await {
        Ok(Some(text)) => compose_response(&state, &text, &spine)?,
        Ok(None) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::new(codes::INVALID_REQUEST, "form submission has no text part")
                .with_hint(format!("include a multipart field named '{TEXT_FIELD}'")),
        )?,
        Err(err) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::new(
                codes::INVALID_REQUEST,
                format!("malformed multipart body: {err}"),
            ),
        )?,
    };

    timer.observe_duration();
    log_request("POST", "/app/:spine", &headers, response.status());
    Ok(response)
}

/// Pull the source text out of a multipart form. A field named `text` wins;
/// otherwise the first field is accepted so plain file uploads work.
async fn read_text_part(multipart: &mut Multipart) -> Result<Option<String>, MultipartError> {
    let mut fallback = None;
    while let Some(field) = multipart.next_field().await? {
        let named_text = field.name() == Some(TEXT_FIELD);
        let value = field.text().await?;
        if named_text {
            return Ok(Some(value));
        }
        if fallback.is_none() {
            fallback = Some(value);
        }
    }
    Ok(fallback)
}

/// Run one composition and translate the outcome to a transport response.
///
/// Engine failures are client errors: the process must keep serving.
fn compose_response(state: &AppState, text: &str, spine: &str) -> Result<Response, StatusCode> {
    match state.composer.compose_text(text, spine) {
        Ok(rendered) => Ok(HttpResponse::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(rendered))
            .expect("valid HTTP response")),
        Err(err) => {
            log::warn!("composition failed: {err}");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, envelope_for(&err))
        }
    }
}

fn envelope_for(err: &ComposeError) -> ErrorEnvelope {
    match err {
        ComposeError::EmptySource => ErrorEnvelope::new(codes::EMPTY_SOURCE, err.to_string())
            .with_hint("submit at least one non-empty source line"),
        ComposeError::EmptySpine => ErrorEnvelope::new(codes::EMPTY_SPINE, err.to_string())
            .with_hint("the spine needs at least one alphabetic character"),
        ComposeError::SpineExhaustsSource { position, letter } => {
            ErrorEnvelope::new(codes::SPINE_EXHAUSTS_SOURCE, err.to_string())
                .with_details(serde_json::json!({ "position": position, "letter": letter }))
                .with_hint("supply more source text or a shorter spine")
        }
    }
}

fn error_response(status: StatusCode, envelope: ErrorEnvelope) -> Result<Response, StatusCode> {
    let body = serialize_json(&envelope).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(HttpResponse::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("valid HTTP response"))
}

fn log_request(method: &str, path: &str, headers: &HeaderMap, status: StatusCode) {
    log::info!(
        "{method} {path} host={} xref={} agent={} response={}",
        header_str(headers, "host"),
        header_str(headers, "x-forwarded-for"),
        header_str(headers, "user-agent"),
        status.as_u16(),
    );
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}
