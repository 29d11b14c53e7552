//! Structured error types shared across the post-processing crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HicError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, field values, line numbers).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds the offending path as a `path` context entry.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the post-processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HicError {
    /// Invalid invocation (missing arguments, bad option values).
    #[error("usage error: {0}")]
    Usage(ErrorInfo),
    /// Filesystem failures while reading inputs or writing outputs.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Run descriptors or accumulators that cannot be combined.
    #[error("compatibility error: {0}")]
    Compat(ErrorInfo),
    /// Serialization, schema and digest errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// The requested output path is already taken.
    #[error("output exists: {0}")]
    OutputExists(ErrorInfo),
    /// No events survived extraction.
    #[error("no events: {0}")]
    NoEvents(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HicError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HicError::Usage(info)
            | HicError::Io(info)
            | HicError::Compat(info)
            | HicError::Serde(info)
            | HicError::OutputExists(info)
            | HicError::NoEvents(info) => info,
        }
    }

    /// Wraps an I/O failure on `path` under the given error code.
    pub fn io(code: &str, path: &Path, err: std::io::Error) -> Self {
        HicError::Io(ErrorInfo::new(code, err.to_string()).with_path(path))
    }
}
