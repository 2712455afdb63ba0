//! Error types for panrun-pandoc.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or running pandoc.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No pandoc installation was found in any candidate location.
    #[error("pandoc not found; install it or set {var}", var = crate::locate::DIR_ENV_VAR)]
    ToolNotFound,

    /// Input files live in different directories and no working directory was given.
    #[error("input files are in multiple directories ({}); pass an explicit working directory", join_paths(dirs))]
    InputLayout { dirs: Vec<PathBuf> },

    /// A precondition on the process environment does not hold.
    #[error("environment error: {0}")]
    Environment(String),

    /// pandoc ran and exited unsuccessfully.
    #[error("{}", conversion_message(*code))]
    ConversionFailed { code: Option<i32> },

    /// The `--version` output could not be parsed.
    #[error("failed to parse pandoc version from {output:?}")]
    VersionParse { output: String },

    /// An external tool could not be executed.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a version parse error.
    pub fn version_parse(output: impl Into<String>) -> Self {
        Self::VersionParse {
            output: output.into(),
        }
    }

    /// Exit code carried by a conversion failure, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ConversionFailed { code } => *code,
            _ => None,
        }
    }
}

fn join_paths(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn conversion_message(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("pandoc document conversion failed with error {code}"),
        None => "pandoc document conversion was terminated by a signal".to_string(),
    }
}
