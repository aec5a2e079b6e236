//! Rendering of pipeline responses

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::release::pipeline::Response;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bare versions, one per line
    Text,
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Text output only supports bare versions, not release metadata")]
    ScalarOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Sort the keys of every object
    pub sort_keys: bool,
}

/// Render a response.
///
/// A lone version is printed as a bare scalar whatever the format.
pub fn render(response: &Response, options: RenderOptions) -> Result<String, OutputError> {
    if let Response::Versions(versions) = response {
        if let [version] = versions.as_slice() {
            return Ok(version.clone());
        }
    }

    match options.format {
        OutputFormat::Text => match response {
            Response::Versions(versions) => Ok(versions.join("\n")),
            Response::Index(_) => Err(OutputError::ScalarOnly),
        },
        OutputFormat::Json if options.sort_keys => to_json(&sort_keys(serde_json::to_value(response)?)),
        OutputFormat::Json => to_json(response),
        OutputFormat::Yaml if options.sort_keys => {
            Ok(serde_yaml::to_string(&sort_keys(serde_json::to_value(response)?))?)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(response)?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
