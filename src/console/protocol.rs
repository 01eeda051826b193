// Request/response shapes for the JSON-lines console protocol.

use crate::core::pages::PageError;
use serde::Deserialize;
use serde_json::{json, Value};

/// One request per input line, tagged by `op`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Save {
        #[serde(default)]
        title: String,
        #[serde(default)]
        content: String,
    },
    Get {
        slug: String,
    },
    List,
    Delete {
        slug: String,
    },
    Sweep,
    Evictions,
}

pub fn ok(body: Value) -> Value {
    let mut response = json!({ "ok": true });
    if let (Some(target), Value::Object(fields)) = (response.as_object_mut(), body) {
        target.extend(fields);
    }
    response
}

pub fn failure(detail: impl std::fmt::Display) -> Value {
    json!({ "ok": false, "detail": detail.to_string() })
}

impl From<PageError> for Value {
    fn from(err: PageError) -> Self {
        if let PageError::Store(e) = &err {
            tracing::error!("Page store error: {}", e);
        }
        failure(err)
    }
}
