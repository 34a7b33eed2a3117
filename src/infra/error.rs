use thiserror::Error;

/// Failures while wiring up the runtime: the HTTP client or the log pipeline.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}
