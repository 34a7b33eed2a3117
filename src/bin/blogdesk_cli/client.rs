#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::editor::EditorError;
use blogdesk::application::forms::FormError;
use blogdesk::application::gateway::Gateway;
use blogdesk::config::{self, ApiSettings, BrowserSettings, LoadError, Settings};
use blogdesk::infra::error::InfraError;
use blogdesk::infra::http::HttpGateway;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Form(#[from] FormError),
    /// Fixed user-facing message of a failed screen operation.
    #[error("{0}")]
    Failed(&'static str),
    #[error("failed to render output: {0}")]
    Output(String),
}

#[derive(Clone)]
pub struct Ctx {
    pub gateway: Arc<dyn Gateway>,
    pub browser: BrowserSettings,
}

impl Ctx {
    pub fn new(settings: &Settings) -> Result<Self, CliError> {
        let gateway = HttpGateway::new(&settings.api)?;
        Ok(Self {
            gateway: Arc::new(gateway),
            browser: settings.browser.clone(),
        })
    }

    /// Context with default settings rooted at `base`.
    pub fn for_base(base: &str) -> Result<Self, CliError> {
        let url = url::Url::parse(base).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        let gateway = HttpGateway::new(&ApiSettings::new(url))?;
        Ok(Self {
            gateway: Arc::new(gateway),
            browser: BrowserSettings {
                page_size: blogdesk::application::pagination::DEFAULT_PAGE_SIZE,
            },
        })
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(&cli.config)?)
}
