// ABOUTME: HTTP client surface for the blockchain node's REST endpoints
// Builds endpoint calls, sends them, and normalizes responses into JSON or ApiError

pub mod client;
pub mod endpoint;
pub mod error;
pub mod response;

pub use client::{NodeApi, NodeClient};
pub use endpoint::{Endpoint, EndpointCall, HttpMethod, RegisterNodesRequest, TransactionRequest};
pub use error::{ApiError, ApiResult};
pub use response::{decode_body, unwrap_response, UNKNOWN_ERROR};
