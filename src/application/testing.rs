//! In-memory gateway for exercising the screen state machines.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::application::gateway::{Gateway, GatewayError, MultipartBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub multipart: Option<MultipartBody>,
}

type Reply = Result<Value, GatewayError>;

/// Scripted replies keyed by method and path, consumed in order. Unscripted
/// PUT and POST calls echo their body; anything else fails.
#[derive(Default)]
pub(crate) struct StubGateway {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubGateway {
    pub fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .expect("replies lock")
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn calls_with(&self, method: &Method) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == *method)
            .collect()
    }

    fn next_reply(&self, method: &Method, path: &str, body: Option<&str>) -> Reply {
        let scripted = self
            .replies
            .lock()
            .expect("replies lock")
            .get_mut(&(method.clone(), path.to_string()))
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(reply) => reply,
            None if *method == Method::PUT || *method == Method::POST => body
                .map(|raw| serde_json::from_str(raw).map_err(|_| GatewayError::RequestFailed))
                .unwrap_or(Ok(Value::Null)),
            None => Err(GatewayError::RequestFailed),
        }
    }
}

#[async_trait]
impl Gateway for StubGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Value, GatewayError> {
        let reply = self.next_reply(&method, path, body.as_deref());
        self.calls.lock().expect("calls lock").push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            multipart: None,
        });
        reply
    }

    async fn upload(&self, path: &str, body: MultipartBody) -> Result<Value, GatewayError> {
        let reply = self.next_reply(&Method::POST, path, None);
        self.calls.lock().expect("calls lock").push(RecordedCall {
            method: Method::POST,
            path: path.to_string(),
            body: None,
            multipart: Some(body),
        });
        reply
    }

    fn resolve(&self, path: &str) -> Result<url::Url, GatewayError> {
        url::Url::parse("http://stub.test/")
            .and_then(|base| base.join(path))
            .map_err(|_| GatewayError::RequestFailed)
    }
}
