//! Export boundary.
//!
//! A finished document leaves the crate as an [`ExportRequest`]. Renderers
//! implement [`Exporter`]; the crate ships a Markdown file exporter used by
//! the CLI.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub content: String,
    /// File name without extension; each exporter adds its own.
    pub file_name: String,
    pub title: String,
}

impl ExportRequest {
    /// Build a request whose file name joins the non-empty `name_parts`.
    pub fn new(content: impl Into<String>, title: impl Into<String>, name_parts: &[&str]) -> Self {
        let joined = name_parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        Self {
            content: content.into(),
            file_name: sanitize_file_name(&joined),
            title: title.into(),
        }
    }
}

/// Whitespace becomes `_`; anything outside `[A-Za-z0-9_-]` is dropped.
pub fn sanitize_file_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let mapped = if c.is_whitespace() {
            Some('_')
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            Some(c)
        } else {
            None
        };
        if let Some(c) = mapped {
            if !(c == '_' && out.ends_with('_')) {
                out.push(c);
            }
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    }
}

pub trait Exporter {
    /// Short format name shown to the user.
    fn format(&self) -> &'static str;

    /// Write the document; returns where it went.
    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ApiError>;
}

/// Writes `<dir>/<file_name>.md` with the title as a level-one heading.
pub struct MarkdownFileExporter {
    dir: PathBuf,
}

impl MarkdownFileExporter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn render(request: &ExportRequest) -> String {
        let mut body = String::new();
        if !request.title.trim().is_empty() {
            body.push_str("# ");
            body.push_str(request.title.trim());
            body.push_str("\n\n");
        }
        body.push_str(request.content.trim_end());
        body.push('\n');
        body
    }
}

impl Exporter for MarkdownFileExporter {
    fn format(&self) -> &'static str {
        "markdown"
    }

    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ApiError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::ExportFailed(format!(
                "Failed to create output directory {:?}: {}",
                self.dir, e
            ))
        })?;

        let path = self.dir.join(format!("{}.md", request.file_name));
        let temp_path = path.with_extension("md.tmp");
        fs::write(&temp_path, Self::render(request)).map_err(|e| {
            ApiError::ExportFailed(format!("Failed to write {:?}: {}", temp_path, e))
        })?;
        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ApiError::ExportFailed(format!("Failed to move export into place at {:?}: {}", path, e))
        })?;

        info!(path = %path.display(), bytes = request.content.len(), "Exported document");
        Ok(path)
    }
}
