use async_trait::async_trait;
use metrics::counter;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::gateway::{Gateway, GatewayError, MultipartBody};
use crate::config::ApiSettings;
use crate::infra::error::InfraError;

pub(crate) const METRIC_REQUESTS_TOTAL: &str = "blogdesk_gateway_requests_total";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Gateway backed by `reqwest`, rooted at the configured base URL.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(settings.base_url.clone()),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| {
                warn!(path, error = %err, "failed to build request URL");
                GatewayError::RequestFailed
            })
    }

    async fn dispatch(method: &Method, req: RequestBuilder) -> Result<Value, GatewayError> {
        let result = match req.send().await {
            Ok(resp) => Self::handle(resp).await,
            Err(err) => {
                warn!(error = %err, "request could not be sent");
                Err(GatewayError::RequestFailed)
            }
        };
        let outcome = if result.is_ok() { "ok" } else { "failed" };
        counter!(
            METRIC_REQUESTS_TOTAL,
            "method" => method.as_str().to_owned(),
            "outcome" => outcome
        )
        .increment(1);
        result
    }

    async fn handle(resp: Response) -> Result<Value, GatewayError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| {
            warn!(error = %err, "failed to read response body");
            GatewayError::RequestFailed
        })?;
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&bytes),
                "request rejected"
            );
            return Err(GatewayError::RequestFailed);
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(error = %err, "failed to parse response body");
            GatewayError::RequestFailed
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Value, GatewayError> {
        let url = self.url(path)?;
        debug!(method = %method, path, "api request");

        let mut req = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            req = req.body(body);
        }

        Self::dispatch(&method, req).await
    }

    async fn upload(&self, path: &str, body: MultipartBody) -> Result<Value, GatewayError> {
        let url = self.url(path)?;
        debug!(
            path,
            fields = body.fields.len(),
            file = body.file_name(),
            "api upload"
        );

        let mut form = Form::new();
        for (name, value) in body.fields {
            form = form.text(name, value);
        }
        if let Some(file) = body.file {
            let part = Part::bytes(file.bytes).file_name(file.file_name);
            form = form.part(file.field, part);
        }
        let req = self.client.post(url).multipart(form);

        Self::dispatch(&Method::POST, req).await
    }

    fn resolve(&self, path: &str) -> Result<Url, GatewayError> {
        self.url(path)
    }
}

/// Make sure relative joins append to the base path instead of replacing its
/// last segment.
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
