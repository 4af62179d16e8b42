//! Error types and handling for the CLI
//!
//! Every failure the binary can report is one `Error` variant with its
//! own exit code. Core transform errors keep their exact messages.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from proptransform-core; displayed verbatim
    #[error("{0}")]
    Core(#[from] proptransform_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(e) if e.is_configuration() => 2,
            Self::Core(_) => 3,
            Self::FileNotFound { .. } => 4,
            Self::Config(_) => 5,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::TomlDe(_) | Self::TomlSer(_) => 14,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        match self {
            Self::Core(e) => e.is_configuration(),
            _ => false,
        }
    }
}

/// Format an error for display to the user, including its causes
pub fn format_error(error: &Error, use_color: bool) -> String {
    let mut message = if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    let mut source = error.source();
    // Core errors are transparent, so their own source is the first cause
    if let Error::Core(inner) = error {
        source = inner.source();
    }
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_messages_are_verbatim() {
        let err = Error::from(proptransform_core::Error::MissingTypeAttribute);
        assert_eq!(format_error(&err, false), "Error: Type not specified.");
        assert_eq!(err.exit_code(), 2);
        assert!(err.should_show_help());
    }

    #[test]
    fn test_format_error_includes_causes() {
        let err = Error::from(proptransform_core::Error::TransformerInstantiationFailed {
            type_id: "broken".to_string(),
            source: anyhow::anyhow!("factory exploded"),
        });
        let text = format_error(&err, false);
        assert!(text.starts_with("Error: Unable to instantiate transformer of type \"broken\"."));
        assert!(text.contains("caused by: factory exploded"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            Error::config("x").exit_code(),
            Error::from(proptransform_core::Error::MissingPrefix).exit_code(),
            Error::from(proptransform_core::Error::TransformFailed {
                strategy: "x".to_string(),
                message: "x".to_string(),
            })
            .exit_code(),
            Error::FileNotFound { path: PathBuf::from("x") }.exit_code(),
            Error::Io(io::Error::new(io::ErrorKind::Other, "x")).exit_code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }
}
