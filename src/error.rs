//! Tool failure signal.
//!
//! Every precondition violation in a tool invocation is expressed as a
//! [`ToolFailure`] and propagated with `?` up to the invocation boundary, where
//! [`ToolResponse::from_result`] turns it into the caller-visible result.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::BASE_PATH_ENV;

/// A terminal, user-visible failure of a single tool invocation.
///
/// The `Display` output is the exact message shown to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFailure {
    #[error("Output directory ({0}) is relative; set {env} or pass an absolute path", env = BASE_PATH_ENV)]
    InvalidDirectoryConfiguration(String),

    #[error("Directory ({}) is not writeable", .0.display())]
    NotWritable(PathBuf),

    #[error("Must save output to file or return it to the client directly.")]
    NoDestinationSpecified,

    #[error("File path ({0}) must be an absolute path if {env} is not set", env = BASE_PATH_ENV)]
    InvalidInputPath(String),

    #[error("{}", file_not_found_message(.path, .suggestions))]
    FileNotFound {
        path: PathBuf,
        suggestions: Vec<PathBuf>,
    },

    #[error("File ({}) is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("File ({}) is not an audio or video file", .0.display())]
    NotAudioFile(PathBuf),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Message(String),
}

pub type ToolResult<T> = Result<T, ToolFailure>;

/// Coarse classification of a [`ToolFailure`], handy for matching in callers
/// that don't care about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidDirectoryConfiguration,
    NotWritable,
    NoDestinationSpecified,
    InvalidInputPath,
    FileNotFound,
    NotAFile,
    NotAudioFile,
    InvalidArgument,
    Message,
}

impl ToolFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ToolFailure::InvalidDirectoryConfiguration(_) => FailureKind::InvalidDirectoryConfiguration,
            ToolFailure::NotWritable(_) => FailureKind::NotWritable,
            ToolFailure::NoDestinationSpecified => FailureKind::NoDestinationSpecified,
            ToolFailure::InvalidInputPath(_) => FailureKind::InvalidInputPath,
            ToolFailure::FileNotFound { .. } => FailureKind::FileNotFound,
            ToolFailure::NotAFile(_) => FailureKind::NotAFile,
            ToolFailure::NotAudioFile(_) => FailureKind::NotAudioFile,
            ToolFailure::InvalidArgument(_) => FailureKind::InvalidArgument,
            ToolFailure::Message(_) => FailureKind::Message,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Abort the current invocation with `message`.
///
/// ```
/// use audioforge::error::{fail, ToolResult};
///
/// fn pick(voices: &[&str]) -> ToolResult<String> {
///     match voices.first() {
///         Some(v) => Ok(v.to_string()),
///         None => fail("No voices found with that name."),
///     }
/// }
///
/// assert_eq!(pick(&[]).unwrap_err().to_string(), "No voices found with that name.");
/// ```
pub fn fail<T>(message: impl Into<String>) -> ToolResult<T> {
    Err(ToolFailure::Message(message.into()))
}

fn file_not_found_message(path: &std::path::Path, suggestions: &[PathBuf]) -> String {
    if suggestions.is_empty() {
        return format!("File ({}) does not exist", path.display());
    }
    let joined = suggestions
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "File ({}) does not exist. Did you mean any of these files: {}?",
        path.display(),
        joined
    )
}

/// Caller-visible result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub is_error: bool,
    pub text: String,
}

impl ToolResponse {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            text: text.into(),
        }
    }

    pub fn failure(failure: &ToolFailure) -> Self {
        Self {
            is_error: true,
            text: failure.message(),
        }
    }

    pub fn from_result(result: ToolResult<String>) -> Self {
        match result {
            Ok(text) => Self::success(text),
            Err(failure) => {
                tracing::debug!(kind = ?failure.kind(), "tool invocation failed");
                Self::failure(&failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_carries_exact_message() {
        let err = fail::<()>("Duration must be between 0.5 and 5 seconds").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Message);
        assert_eq!(err.message(), "Duration must be between 0.5 and 5 seconds");
    }

    #[test]
    fn response_contains_only_the_message() {
        let failure = ToolFailure::NotWritable(PathBuf::from("/srv/out"));
        let response = ToolResponse::from_result(Err(failure));
        assert!(response.is_error);
        assert_eq!(response.text, "Directory (/srv/out) is not writeable");
    }

    #[test]
    fn file_not_found_lists_suggestions() {
        let failure = ToolFailure::FileNotFound {
            path: PathBuf::from("/a/voice.mp3"),
            suggestions: vec![PathBuf::from("/a/voices.mp3"), PathBuf::from("/a/voice1.mp3")],
        };
        assert_eq!(
            failure.to_string(),
            "File (/a/voice.mp3) does not exist. Did you mean any of these files: /a/voices.mp3,/a/voice1.mp3?"
        );
    }

    #[test]
    fn success_is_not_error() {
        let response = ToolResponse::from_result(Ok("Success.".to_string()));
        assert_eq!(response, ToolResponse::success("Success."));
    }
}
