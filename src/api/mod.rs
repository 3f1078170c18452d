//! API surface of the embedding service

pub mod event;
pub mod handler;
pub mod health;
pub mod http;
pub mod routes;


pub use event::{InboundRequest, InvocationContext, ResponseEnvelope};
pub use handler::EventHandler;
pub use health::health_check;
pub use http::{app, invoke_event, proxy_request};
pub use routes::RequestRouter;
