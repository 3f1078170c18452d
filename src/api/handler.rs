//! Request boundary: route, execute, and render every outcome as an envelope

use serde_json::Value;
use tracing::{error, info, warn};

use crate::api::{InboundRequest, InvocationContext, RequestRouter, ResponseEnvelope};
use crate::core::{EmbeddingError, Result, VectorOperationExecutor};

pub struct EventHandler {
    router: RequestRouter,
    executor: VectorOperationExecutor,
}

impl EventHandler {
    pub fn new(router: RequestRouter, executor: VectorOperationExecutor) -> Self {
        Self { router, executor }
    }

    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    /// Handles one event. Never fails: every error becomes a `{error}` envelope.
    pub async fn handle(&self, request: &InboundRequest, ctx: &InvocationContext) -> ResponseEnvelope {
        let raw_event = serde_json::to_string(request).unwrap_or_default();
        info!(request_id = %ctx.request_id, event = %raw_event, "Received event");

        match self.dispatch(request, ctx).await {
            Ok((status, body)) => ResponseEnvelope::json(status, &body),
            Err(err) => self.reject(err, &raw_event, ctx),
        }
    }

    /// Logs a failure against the raw event and renders its envelope. Also used for
    /// events that could not be decoded far enough to reach [`EventHandler::handle`].
    pub fn reject(&self, err: EmbeddingError, raw_event: &str, ctx: &InvocationContext) -> ResponseEnvelope {
        match &err {
            EmbeddingError::InvalidInput(_) | EmbeddingError::RouteNotFound => warn!(
                request_id = %ctx.request_id,
                event = %raw_event,
                error = %err,
                "Request rejected"
            ),
            _ => error!(
                request_id = %ctx.request_id,
                event = %raw_event,
                error = ?err,
                "Request failed"
            ),
        }
        err.into_envelope()
    }

    async fn dispatch(&self, request: &InboundRequest, ctx: &InvocationContext) -> Result<(u16, Value)> {
        let operation = self.router.route(request, ctx)?;
        let status = self.router.success_status(&operation);
        let body = self.executor.execute(operation).await?;
        Ok((status, body))
    }
}
