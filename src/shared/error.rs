use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - decomposition finished, no gating failure
    Success = 0,
    /// `--fail-on-vulnerable` was set and the root is transitively exposed
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable BOM, malformed graph, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors raised around the decomposition core.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("SBOM file not found: {path}\n\n💡 Hint: {suggestion}")]
    BomNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse SBOM file: {path}\nDetails: {details}\n\n💡 Hint: Only CycloneDX JSON documents are supported")]
    BomParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a regular CycloneDX JSON file")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Validation error for options and config values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },
}

/// Errors raised by the dependency graph engine.
///
/// Every variant is terminal for the decomposition call that raised it:
/// no partial graph is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompositionError {
    /// Two input components share the same bom-ref
    #[error("Duplicate component reference: '{bom_ref}'\n\n💡 Hint: Every component in the SBOM must carry a unique bom-ref")]
    DuplicateComponentRef { bom_ref: String },

    /// No declared metadata component, or no component free to hang below it
    #[error("Dependency graph is missing a root component: {reason}")]
    MissingRootComponent { reason: String },

    /// A component was revisited while still on the current traversal path
    #[error("Dependency cycle detected at component '{component}'")]
    CycleDetected { component: String },
}
