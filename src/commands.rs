//! CLI commands for Retain Theme
//!
//! Each command reads its inputs, does one thing and returns the text to
//! print. Outcomes worth a user notice are queued on the snackbar engine.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use retain_theme_annotated_text::{
    AnnotatedText, RetainAnnotatedString, RetainMutableAnnotatedString, StringDiff,
};
use retain_theme_core::{AppConfig, SnackbarEngine};
use retain_theme_request::Request;

/// Serialized annotated string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Form {
    /// Per-character `{"achars", "startStyle"}`
    Mutable,
    /// Collapsed `{"text", "spanStyles"}`
    Immutable,
}

async fn read_annotated(path: &Path) -> Result<RetainAnnotatedString> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))?;
    Ok(RetainAnnotatedString::deserialize(contents.trim_end_matches('\n')))
}

/// Inspect command options
pub struct InspectCommand {
    pub path: PathBuf,
}

impl InspectCommand {
    /// Describe the text and its style ranges
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        info!("Inspecting {:?}", self.path);
        let annotated = read_annotated(&self.path).await?;
        let native = annotated.to_native(config.text.base_font_size);

        let mut report = String::new();
        writeln!(report, "text: {:?}", annotated.as_str())?;
        writeln!(report, "length: {}", annotated.len())?;
        for (range, native) in annotated.span_styles().iter().zip(&native.span_styles) {
            writeln!(
                report,
                "[{}, {}) {} -> {}sp",
                range.start, range.end, range.item, native.item.font_size
            )?;
        }
        Ok(report)
    }
}

/// Convert command options
pub struct ConvertCommand {
    pub path: PathBuf,
    pub to: Form,
    /// Write here instead of returning the result
    pub output: Option<PathBuf>,
}

impl ConvertCommand {
    /// Re-serialize the file in the requested form
    pub async fn execute(&self, snackbar: &SnackbarEngine) -> Result<String> {
        let annotated = read_annotated(&self.path).await?;
        let json = match self.to {
            Form::Mutable => annotated.to_mutable().serialize()?,
            Form::Immutable => annotated.serialize()?,
        };

        match &self.output {
            Some(output) => {
                tokio::fs::write(output, &json)
                    .await
                    .with_context(|| format!("Failed to write {:?}", output))?;
                snackbar.add_info(format!("Wrote {:?}", output), None);
                Ok(String::new())
            }
            None => Ok(json),
        }
    }
}

/// Diff command options
pub struct DiffCommand {
    pub old: PathBuf,
    pub new: PathBuf,
}

impl DiffCommand {
    /// Report significance plus the char ranges added and removed
    pub async fn execute(&self) -> Result<String> {
        let old = read_annotated(&self.old).await?;
        let new = read_annotated(&self.new).await?;

        let difference = old.diff(&new);
        let changes = StringDiff::new(old.as_str(), new.as_str());

        let mut report = String::new();
        writeln!(report, "difference: {:?}", difference)?;
        writeln!(report, "words changed: {}", changes.words_changed)?;
        for range in &changes.removed {
            writeln!(report, "- [{}, {}) {:?}", range.start, range.end, range.item)?;
        }
        for range in &changes.added {
            writeln!(report, "+ [{}, {}) {:?}", range.start, range.end, range.item)?;
        }
        Ok(report)
    }
}

/// Replay one text snapshot per line onto a mutable string
pub struct ReplayCommand {
    pub path: PathBuf,
}

impl ReplayCommand {
    pub async fn execute(&self) -> Result<String> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {:?}", self.path))?;

        let mut annotated = RetainMutableAnnotatedString::default();
        let mut finished_words = 0;
        for line in contents.lines() {
            if annotated.apply_diff(line) {
                finished_words += 1;
            }
        }
        info!("Replayed {} snapshots", contents.lines().count());

        let mut report = annotated.to_immutable().serialize()?;
        write!(report, "\nword changes: {}", finished_words)?;
        Ok(report)
    }
}

/// Fetch command options
pub struct FetchCommand {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl FetchCommand {
    /// GET the url and return the body, pretty-printed when it is JSON
    pub async fn execute(&self, config: &AppConfig, snackbar: &SnackbarEngine) -> Result<String> {
        let request = self
            .params
            .iter()
            .fold(Request::new(self.url.clone()), |request, (key, value)| {
                request.param(key.clone(), value.clone())
            })
            .with_config(&config.request);

        let response = match request.get_string().await {
            Ok(response) => response,
            Err(e) => {
                snackbar.add_error(e.to_string(), None);
                return Err(e.into());
            }
        };

        info!(
            "HTTP {} in {:?}, {} KB/s",
            response.status,
            response.elapsed,
            response.kbps.unwrap_or(0)
        );

        Ok(match serde_json::from_str::<serde_json::Value>(&response.data) {
            Ok(value) => serde_json::to_string_pretty(&value)?,
            Err(_) => response.data,
        })
    }
}

/// Parse `key=value` pairs given on the command line
pub fn parse_param(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", arg))
}
