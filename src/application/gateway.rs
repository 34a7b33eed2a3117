//! Gateway contract: the single seam through which the console talks to the
//! blogging API.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// The only failure the console ever surfaces for a network call.
///
/// Transport errors, non-success statuses, and unparseable bodies all collapse
/// into this variant; the detail is logged by the gateway and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request failed")]
    RequestFailed,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue `method` against `path` (relative to the configured base URL)
    /// with an optional pre-serialized JSON body.
    ///
    /// A successful response with an empty body yields [`Value::Null`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Value, GatewayError>;

    /// POST a multipart form.
    async fn upload(&self, path: &str, body: MultipartBody) -> Result<Value, GatewayError>;

    /// Absolute URL of `path` under the configured base.
    fn resolve(&self, path: &str) -> Result<url::Url, GatewayError>;
}

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Text fields plus at most one file, sent as `multipart/form-data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    pub fields: Vec<(&'static str, String)>,
    pub file: Option<FilePart>,
}

impl MultipartBody {
    /// A form carrying only `file_name` under `field`.
    pub fn with_file(field: &'static str, file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            fields: Vec::new(),
            file: Some(FilePart {
                field,
                file_name: file_name.to_string(),
                bytes,
            }),
        }
    }

    #[must_use]
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|file| file.file_name.as_str())
    }
}

/// Normalize the two list shapes the API returns (`[..]` and
/// `{"data": [..]}`) into one.
pub fn unwrap_list(value: Value) -> Result<Vec<Value>, GatewayError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => {
                tracing::warn!("list response carried no `data` array");
                Err(GatewayError::RequestFailed)
            }
        },
        other => {
            tracing::warn!(kind = value_kind(&other), "unexpected list response shape");
            Err(GatewayError::RequestFailed)
        }
    }
}

/// Decode a JSON value into a typed record.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|err| {
        tracing::warn!(error = %err, "response did not match the expected record");
        GatewayError::RequestFailed
    })
}

/// Decode every element of a list response.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, GatewayError> {
    unwrap_list(value)?.into_iter().map(decode).collect()
}

/// Serialize a request body.
pub fn encode<T: serde::Serialize>(value: &T) -> Result<String, GatewayError> {
    serde_json::to_string(value).map_err(|err| {
        tracing::warn!(error = %err, "failed to serialize request body");
        GatewayError::RequestFailed
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unwrap_list_accepts_both_shapes() {
        let bare = unwrap_list(json!([{"id": 1}])).expect("bare array");
        let wrapped = unwrap_list(json!({"data": [{"id": 1}]})).expect("data envelope");
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn unwrap_list_rejects_other_shapes() {
        assert_eq!(
            unwrap_list(json!({"items": []})),
            Err(GatewayError::RequestFailed)
        );
        assert_eq!(unwrap_list(Value::Null), Err(GatewayError::RequestFailed));
    }

    #[test]
    fn decode_maps_mismatch_to_request_failed() {
        let result: Result<blogdesk_api_types::Analytics, _> = decode(json!({"count": 3}));
        assert_eq!(result, Err(GatewayError::RequestFailed));
    }
}
