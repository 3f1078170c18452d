//! HTTP adapter: serves events over axum

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::collections::HashMap;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::api::{health_check, InboundRequest, InvocationContext, ResponseEnvelope};
use crate::core::{EmbeddingError, Result};
use crate::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `/health`, `/invoke` for raw events, and a fallback that turns any other
/// request into an event.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/invoke", post(invoke_event))
        .fallback(proxy_request)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Accepts an API Gateway proxy event and returns the envelope as-is, including
/// for events that fail to decode.
pub async fn invoke_event(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ResponseEnvelope> {
    let ctx = InvocationContext::new(request_id(&headers));

    match serde_json::from_slice::<InboundRequest>(&body) {
        Ok(event) => Json(app_state.handler.handle(&event, &ctx).await),
        Err(e) => {
            let err = EmbeddingError::MalformedBody(e.to_string());
            Json(app_state.handler.reject(err, &String::from_utf8_lossy(&body), &ctx))
        }
    }
}

pub async fn proxy_request(
    State(app_state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = InvocationContext::new(request_id(&headers));

    let envelope = match event_from_http(&method, &uri, &body) {
        Ok(event) => app_state.handler.handle(&event, &ctx).await,
        Err(err) => {
            let raw_event = format!("{} {} {}", method, uri, String::from_utf8_lossy(&body));
            app_state.handler.reject(err, &raw_event, &ctx)
        }
    };

    let status = StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        envelope.body,
    )
        .into_response()
}

/// Builds an event from a plain HTTP request. A body that is not valid UTF-8 is
/// malformed rather than repaired.
fn event_from_http(method: &Method, uri: &Uri, body: &[u8]) -> Result<InboundRequest> {
    let query_string_parameters = uri.query().map(|_| {
        Query::<HashMap<String, String>>::try_from_uri(uri)
            .map(|Query(params)| params)
            .unwrap_or_default()
    });

    let body = if body.is_empty() {
        None
    } else {
        let text = String::from_utf8(body.to_vec())
            .map_err(|e| EmbeddingError::MalformedBody(e.to_string()))?;
        Some(text)
    };

    Ok(InboundRequest {
        path: Some(uri.path().to_string()),
        http_method: Some(method.as_str().to_string()),
        query_string_parameters,
        body,
    })
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
