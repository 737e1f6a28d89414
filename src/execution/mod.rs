//! Invocation outcome types: the uniform result of one yutu call.

use serde::Serialize;
use serde_json::{Map, Value};

/// Parsed JSON returned by yutu.
///
/// yutu answers list actions either with a bare array or with an object
/// carrying an `items` array (plus `pageInfo`, `nextPageToken`, ...).
/// Callers go through [`Payload::items`] instead of matching on the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    ItemList(Vec<Value>),
    ItemPage(Map<String, Value>),
}

impl Payload {
    /// Classify a decoded JSON value. Scalars are not valid yutu output.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::ItemList(items)),
            Value::Object(map) => Some(Self::ItemPage(map)),
            _ => None,
        }
    }

    /// The list of resources, whatever the response shape.
    pub fn items(&self) -> &[Value] {
        match self {
            Self::ItemList(items) => items,
            Self::ItemPage(map) => map
                .get("items")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Top-level field of an object response (e.g. the `id` of an inserted resource).
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::ItemPage(map) => map.get(key),
            Self::ItemList(_) => None,
        }
    }

    pub fn first(&self) -> Option<&Value> {
        self.items().first()
    }

    /// `pageInfo.totalResults` when present, otherwise the number of items.
    pub fn total_results(&self) -> u64 {
        match self {
            Self::ItemPage(map) => map
                .get("pageInfo")
                .and_then(|p| p.get("totalResults"))
                .and_then(Value::as_u64)
                .unwrap_or(self.items().len() as u64),
            Self::ItemList(items) => items.len() as u64,
        }
    }
}

/// Outcome of exactly one external-command invocation.
///
/// `data` and `error` are never both set. Build values through
/// [`YutuResult::success`], [`YutuResult::success_with`] and
/// [`YutuResult::failure`] so the invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YutuResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub raw_output: String,
}

impl YutuResult {
    /// Success without parsed data (non-JSON output or empty stdout).
    pub fn success(raw_output: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            raw_output: raw_output.into(),
        }
    }

    pub fn success_with(data: Payload, raw_output: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            raw_output: raw_output.into(),
        }
    }

    pub fn failure(error: impl Into<String>, raw_output: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            raw_output: raw_output.into(),
        }
    }

    /// Items of the payload, empty when there is none.
    pub fn items(&self) -> &[Value] {
        self.data.as_ref().map(Payload::items).unwrap_or(&[])
    }

    /// Error text, or `fallback` when the failure carried no message.
    pub fn error_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.error.as_deref().filter(|e| !e.trim().is_empty()).unwrap_or(fallback)
    }
}
