#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::client::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    read_opt_value(val, file)?.ok_or_else(|| CliError::InvalidInput("value required".into()))
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        return read_file(&path).map(Some);
    }
    Ok(val)
}

pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })
}

/// File name and contents of a file to attach to a multipart request.
pub async fn read_upload(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput("upload path has no file name".into()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
    Ok((file_name, bytes))
}

/// One field edit taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: Value,
    /// Text as typed, kept for fields that only accept strings.
    pub raw: String,
}

impl Assignment {
    pub fn text(field: &str, value: String) -> Self {
        Self {
            field: field.to_string(),
            value: Value::String(value.clone()),
            raw: value,
        }
    }
}

/// Split `field=value`; the value is taken as JSON when it parses, otherwise
/// as a plain string.
pub fn parse_assignment(raw: &str) -> Result<Assignment, CliError> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidInput(format!(
            "expected FIELD=VALUE, got `{raw}`"
        )));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(CliError::InvalidInput(format!("missing field name in `{raw}`")));
    }
    let text = value.to_string();
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(text.clone()));
    Ok(Assignment {
        field: field.to_string(),
        value,
        raw: text,
    })
}
