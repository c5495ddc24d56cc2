//! Model sources
//!
//! A model source names where a decision model comes from: a file, text
//! read from a byte stream, or a model that was already parsed.

use crate::error::{Result, SdkError};
use dmn_core::ast::DecisionModel;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Label used for streams read without an explicit label
pub const STREAM_LABEL: &str = "<stream>";

/// Where a decision model comes from
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Model file, read on every parse call
    Path(PathBuf),

    /// Model text with the label used in error messages
    Text { label: String, content: String },

    /// Already parsed model
    Model(Arc<DecisionModel>),
}

impl ModelSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ModelSource::Path(path.into())
    }

    pub fn text(label: impl Into<String>, content: impl Into<String>) -> Self {
        ModelSource::Text {
            label: label.into(),
            content: content.into(),
        }
    }

    pub fn model(model: impl Into<Arc<DecisionModel>>) -> Self {
        ModelSource::Model(model.into())
    }

    /// Read a model from a byte stream. The content must be UTF-8.
    pub fn from_reader(label: Option<&str>, mut reader: impl Read) -> Result<Self> {
        let label = label.unwrap_or(STREAM_LABEL).to_string();
        let mut content = String::new();

        reader
            .read_to_string(&mut content)
            .map_err(|source| SdkError::SourceError {
                source_label: label.clone(),
                source,
            })?;

        Ok(ModelSource::Text { label, content })
    }

    /// Label used in error messages: the file name for paths
    pub fn label(&self) -> String {
        match self {
            ModelSource::Path(path) => path_label(path),
            ModelSource::Text { label, .. } => label.clone(),
            ModelSource::Model(model) => model.source_label.clone(),
        }
    }
}

pub(crate) fn path_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        ModelSource::Path(path)
    }
}

impl From<&Path> for ModelSource {
    fn from(path: &Path) -> Self {
        ModelSource::Path(path.to_path_buf())
    }
}

impl From<DecisionModel> for ModelSource {
    fn from(model: DecisionModel) -> Self {
        ModelSource::Model(Arc::new(model))
    }
}

impl From<Arc<DecisionModel>> for ModelSource {
    fn from(model: Arc<DecisionModel>) -> Self {
        ModelSource::Model(model)
    }
}
