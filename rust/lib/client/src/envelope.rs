//! Response envelope normalization.
//!
//! The API wraps payloads as `{ data, pagination? }`, but some endpoints
//! answer with a bare value and others nest the envelope once more
//! (`{ data: { data, pagination } }`). [`normalize`] accepts all three and
//! is the only place in the client that looks at the raw shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Pagination descriptor attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Normalized response: payload plus optional pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub pagination: Option<Pagination>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next_page: bool) -> Self {
        Self { items, has_next_page }
    }
}

impl<T> From<Envelope<Vec<T>>> for Page<T> {
    fn from(env: Envelope<Vec<T>>) -> Self {
        let has_next_page = env.pagination.map(|p| p.has_next_page).unwrap_or(false);
        Page { items: env.data, has_next_page }
    }
}

/// Decode any of the accepted response shapes into an [`Envelope`].
pub fn normalize<T: DeserializeOwned>(body: Value) -> Result<Envelope<T>, ApiError> {
    let (payload, pagination) = match body {
        Value::Object(mut outer) if outer.contains_key("data") => {
            let outer_pagination = outer.remove("pagination");
            match outer.remove("data") {
                Some(Value::Object(mut inner)) if inner.contains_key("data") => {
                    let pagination = inner.remove("pagination").or(outer_pagination);
                    (inner.remove("data").unwrap_or(Value::Null), pagination)
                }
                Some(data) => (data, outer_pagination),
                None => (Value::Null, outer_pagination),
            }
        }
        other => (other, None),
    };

    let data = serde_json::from_value::<T>(payload)
        .map_err(|e| ApiError::Decode(format!("payload: {}", e)))?;
    let pagination = match pagination {
        Some(Value::Null) | None => None,
        Some(p) => Some(
            serde_json::from_value::<Pagination>(p)
                .map_err(|e| ApiError::Decode(format!("pagination: {}", e)))?,
        ),
    };

    Ok(Envelope { data, pagination })
}
