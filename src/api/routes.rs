//! Maps inbound events onto vector operations
//!
//! Matching is exact on `(path, method)`. Which table is consulted depends on the
//! configured [`RouteSurface`]; the two are never merged.
//!
//! | Surface    | Method | Path                      | Operation            |
//! |------------|--------|---------------------------|----------------------|
//! | collection | GET    | `/embedding-api`          | search (`?query=`)   |
//! | collection | POST   | `/embedding-api`          | create (201)         |
//! | collection | PUT    | `/embedding-api/{id}`     | update               |
//! | collection | DELETE | `/embedding-api/{id}`     | delete               |
//! | action     | POST   | `/embedding-api/upload`   | create (200)         |
//! | action     | POST   | `/embedding-api/search`   | search (body query)  |
//! | action     | POST   | `/embedding-api/delete`   | delete (body id)     |

use crate::api::{InboundRequest, InvocationContext};
use crate::core::{Document, EmbeddingError, Operation, Result, RouteSurface};

pub const COLLECTION_PATH: &str = "/embedding-api";

const UPLOAD_PATH: &str = "/embedding-api/upload";
const SEARCH_PATH: &str = "/embedding-api/search";
const DELETE_PATH: &str = "/embedding-api/delete";

#[derive(Debug, Clone, Copy)]
pub struct RequestRouter {
    surface: RouteSurface,
}

impl RequestRouter {
    pub fn new(surface: RouteSurface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> RouteSurface {
        self.surface
    }

    /// Classifies the request into exactly one operation, or rejects it.
    pub fn route(&self, request: &InboundRequest, ctx: &InvocationContext) -> Result<Operation> {
        match self.surface {
            RouteSurface::Collection => route_collection(request, ctx),
            RouteSurface::Action => route_action(request, ctx),
        }
    }

    /// Status code for a successful operation on this surface.
    pub fn success_status(&self, operation: &Operation) -> u16 {
        match (self.surface, operation) {
            (RouteSurface::Collection, Operation::Create { .. }) => 201,
            _ => 200,
        }
    }
}

fn route_collection(request: &InboundRequest, ctx: &InvocationContext) -> Result<Operation> {
    let path = request.path();
    let method = request.method();

    if path == COLLECTION_PATH {
        return match method.as_str() {
            "GET" => {
                let query = request
                    .query_param("query")
                    .filter(|q| !q.trim().is_empty())
                    .ok_or_else(|| missing("Missing 'query' parameter"))?;
                Ok(Operation::Search {
                    query: query.to_string(),
                })
            }
            "POST" => create(request, ctx),
            _ => Err(EmbeddingError::RouteNotFound),
        };
    }

    if let Some(rest) = path.strip_prefix("/embedding-api/") {
        if method != "PUT" && method != "DELETE" {
            return Err(EmbeddingError::RouteNotFound);
        }

        let id = rest.rsplit('/').next().unwrap_or_default().trim();
        if id.is_empty() {
            return Err(missing("Missing ID in URL"));
        }
        let id = id.to_string();

        return if method == "DELETE" {
            Ok(Operation::Delete { id })
        } else {
            let mut document = Document::from_body(request.body.as_deref())?;
            document.set_id(&id);
            Ok(Operation::Update { id, document })
        };
    }

    Err(EmbeddingError::RouteNotFound)
}

fn route_action(request: &InboundRequest, ctx: &InvocationContext) -> Result<Operation> {
    if request.method() != "POST" {
        return Err(EmbeddingError::RouteNotFound);
    }

    match request.path() {
        UPLOAD_PATH => create(request, ctx),
        SEARCH_PATH => {
            let body = Document::from_body(request.body.as_deref())?;
            let query = body
                .text_field("query")
                .ok_or_else(|| missing("Missing 'query' field"))?;
            Ok(Operation::Search {
                query: query.to_string(),
            })
        }
        DELETE_PATH => {
            let body = Document::from_body(request.body.as_deref())?;
            let id = body.id().ok_or_else(|| missing("Missing 'id' field"))?;
            Ok(Operation::Delete { id })
        }
        _ => Err(EmbeddingError::RouteNotFound),
    }
}

/// Body id when usable, otherwise the invocation's request id.
fn create(request: &InboundRequest, ctx: &InvocationContext) -> Result<Operation> {
    let mut document = Document::from_body(request.body.as_deref())?;
    let id = document.id().unwrap_or_else(|| ctx.request_id.clone());
    document.set_id(&id);
    Ok(Operation::Create { id, document })
}

fn missing(message: &str) -> EmbeddingError {
    EmbeddingError::InvalidInput(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> InvocationContext {
        InvocationContext::new("test-request-id")
    }

    fn collection() -> RequestRouter {
        RequestRouter::new(RouteSurface::Collection)
    }

    fn action() -> RequestRouter {
        RequestRouter::new(RouteSurface::Action)
    }

    #[test]
    fn test_search_requires_query() {
        let request = InboundRequest::new("/embedding-api", "GET").with_query("query", "test search");
        assert_eq!(
            collection().route(&request, &ctx()).unwrap(),
            Operation::Search {
                query: "test search".to_string()
            }
        );

        let request = InboundRequest::new("/embedding-api", "GET");
        assert!(matches!(
            collection().route(&request, &ctx()),
            Err(EmbeddingError::InvalidInput(_))
        ));

        let request = InboundRequest::new("/embedding-api", "GET").with_query("query", "");
        assert!(matches!(
            collection().route(&request, &ctx()),
            Err(EmbeddingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_uses_body_id_or_request_id() {
        let request = InboundRequest::new("/embedding-api", "POST")
            .with_body(json!({"id": "doc123", "title": "Test"}).to_string());
        match collection().route(&request, &ctx()).unwrap() {
            Operation::Create { id, document } => {
                assert_eq!(id, "doc123");
                assert_eq!(document.id().as_deref(), Some("doc123"));
            }
            other => panic!("unexpected operation {:?}", other),
        }

        let request = InboundRequest::new("/embedding-api", "POST")
            .with_body(json!({"id": "", "title": "Test"}).to_string());
        match collection().route(&request, &ctx()).unwrap() {
            Operation::Create { id, document } => {
                assert_eq!(id, "test-request-id");
                assert_eq!(document.id().as_deref(), Some("test-request-id"));
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn test_path_id_overrides_body_id() {
        let request = InboundRequest::new("/embedding-api/doc123", "PUT")
            .with_body(json!({"id": "other", "title": "Updated"}).to_string());
        match collection().route(&request, &ctx()).unwrap() {
            Operation::Update { id, document } => {
                assert_eq!(id, "doc123");
                assert_eq!(document.id().as_deref(), Some("doc123"));
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn test_delete_and_missing_id() {
        let request = InboundRequest::new("/embedding-api/doc123", "DELETE");
        assert_eq!(
            collection().route(&request, &ctx()).unwrap(),
            Operation::Delete {
                id: "doc123".to_string()
            }
        );

        for path in ["/embedding-api/", "/embedding-api/ "] {
            let request = InboundRequest::new(path, "DELETE");
            assert!(matches!(
                collection().route(&request, &ctx()),
                Err(EmbeddingError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_unmatched_routes() {
        let cases = [
            ("/invalid-route", "GET"),
            ("/invalid-route", "POST"),
            ("/embedding-api", "DELETE"),
            ("/embedding-api/doc123", "GET"),
            ("/embedding-api/doc123", "POST"),
            ("/embedding-api-v2", "GET"),
        ];
        for (path, method) in cases {
            let request = InboundRequest::new(path, method);
            assert!(
                matches!(collection().route(&request, &ctx()), Err(EmbeddingError::RouteNotFound)),
                "{} {} should not match",
                method,
                path
            );
        }
    }

    #[test]
    fn test_empty_id_only_checked_for_put_and_delete() {
        for method in ["GET", "POST", "PATCH"] {
            let request = InboundRequest::new("/embedding-api/", method);
            assert!(matches!(
                collection().route(&request, &ctx()),
                Err(EmbeddingError::RouteNotFound)
            ));
        }
        for method in ["PUT", "DELETE"] {
            let request = InboundRequest::new("/embedding-api/", method);
            assert!(matches!(
                collection().route(&request, &ctx()),
                Err(EmbeddingError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_malformed_body() {
        let request = InboundRequest::new("/embedding-api", "POST").with_body("{oops");
        assert!(matches!(
            collection().route(&request, &ctx()),
            Err(EmbeddingError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_action_surface() {
        let request = InboundRequest::new("/embedding-api/upload", "POST")
            .with_body(json!({"title": "Test"}).to_string());
        assert!(matches!(
            action().route(&request, &ctx()).unwrap(),
            Operation::Create { ref id, .. } if id == "test-request-id"
        ));

        let request = InboundRequest::new("/embedding-api/search", "POST")
            .with_body(json!({"query": "two bedrooms"}).to_string());
        assert_eq!(
            action().route(&request, &ctx()).unwrap(),
            Operation::Search {
                query: "two bedrooms".to_string()
            }
        );

        let request = InboundRequest::new("/embedding-api/delete", "POST")
            .with_body(json!({"id": "doc123"}).to_string());
        assert_eq!(
            action().route(&request, &ctx()).unwrap(),
            Operation::Delete {
                id: "doc123".to_string()
            }
        );
    }

    #[test]
    fn test_action_surface_missing_fields() {
        for path in ["/embedding-api/search", "/embedding-api/delete"] {
            let request = InboundRequest::new(path, "POST").with_body("{}");
            assert!(matches!(
                action().route(&request, &ctx()),
                Err(EmbeddingError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_surfaces_do_not_overlap() {
        let request = InboundRequest::new("/embedding-api/upload", "POST").with_body("{}");
        assert!(matches!(
            collection().route(&request, &ctx()),
            Err(EmbeddingError::RouteNotFound)
        ));

        let request = InboundRequest::new("/embedding-api", "GET").with_query("query", "x");
        assert!(matches!(
            action().route(&request, &ctx()),
            Err(EmbeddingError::RouteNotFound)
        ));

        let request = InboundRequest::new("/embedding-api/doc123", "DELETE");
        assert!(matches!(
            action().route(&request, &ctx()),
            Err(EmbeddingError::RouteNotFound)
        ));
    }

    #[test]
    fn test_success_status_by_surface() {
        let create = Operation::Create {
            id: "a".to_string(),
            document: Document::default(),
        };
        let delete = Operation::Delete { id: "a".to_string() };

        assert_eq!(collection().success_status(&create), 201);
        assert_eq!(action().success_status(&create), 200);
        assert_eq!(collection().success_status(&delete), 200);
    }
}
