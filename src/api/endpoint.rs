// ABOUTME: Endpoint table and request payloads for the node API
// Each endpoint has a fixed path and method; POST endpoints carry a JSON body

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Chain,
    NewTransaction,
    Mine,
    RegisterNodes,
    ResolveNodes,
}

impl Endpoint {
    pub const ALL: [Self; 5] = [
        Self::Chain,
        Self::NewTransaction,
        Self::Mine,
        Self::RegisterNodes,
        Self::ResolveNodes,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Chain => "/chain",
            Self::NewTransaction => "/transactions/new",
            Self::Mine => "/mine",
            Self::RegisterNodes => "/nodes/register",
            Self::ResolveNodes => "/nodes/resolve",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Self::NewTransaction | Self::RegisterNodes => HttpMethod::Post,
            Self::Chain | Self::Mine | Self::ResolveNodes => HttpMethod::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// One outstanding request against the node.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCall {
    pub endpoint: Endpoint,
    pub payload: Option<Value>,
}

impl EndpointCall {
    pub fn get(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            payload: None,
        }
    }

    pub fn post<T: Serialize>(endpoint: Endpoint, body: &T) -> serde_json::Result<Self> {
        Ok(Self {
            endpoint,
            payload: Some(serde_json::to_value(body)?),
        })
    }

    pub fn method(&self) -> HttpMethod {
        self.endpoint.method()
    }

    pub fn path(&self) -> &'static str {
        self.endpoint.path()
    }
}

/// Transaction amount as typed by the user.
///
/// Integral values that fit an `i64` or `u64` serialize as JSON integers and
/// non-finite values as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(pub f64);

// Integral values at or above this magnitude are written in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;
// 2^64, the first value past `u64::MAX`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl Serialize for Amount {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if !value.is_finite() {
            return serializer.serialize_none();
        }
        if value.fract() != 0.0 || value.abs() >= EXPONENT_THRESHOLD {
            return serializer.serialize_f64(value);
        }
        if value >= 0.0 && value < U64_LIMIT {
            serializer.serialize_u64(value as u64)
        } else if value >= i64::MIN as f64 {
            serializer.serialize_i64(value as i64)
        } else {
            // Integral but outside every integer JSON value
            serializer.serialize_f64(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

impl RegisterNodesRequest {
    pub fn single(address: impl Into<String>) -> Self {
        Self {
            nodes: vec![address.into()],
        }
    }
}
