//! Result and error types for covpaint.

use thiserror::Error;

/// Result type for covpaint operations
pub type CoverResult<T> = Result<T, CoverError>;

/// Errors that can occur while annotating coverage
#[derive(Debug, Error)]
pub enum CoverError {
    /// A profile's file reference could not be resolved to a file on disk
    #[error("can't find {reference:?}: {reason}")]
    SourceNotFound {
        /// File reference as written in the profile
        reference: String,
        /// Why resolution failed
        reason: String,
    },

    /// No profiled file declares a function with this name
    #[error("could not find function {name}")]
    FunctionNotFound {
        /// Requested function name
        name: String,
    },

    /// No profiled file matches the requested name
    #[error("could not find profiled file matching {name:?}")]
    FileNotProfiled {
        /// Requested file name fragment
        name: String,
    },

    /// Profile positions or function extents disagree with the source bytes
    #[error("{file}: {message}")]
    Inconsistent {
        /// File being resolved
        file: String,
        /// Expected vs found position
        message: String,
    },

    /// Coverage percentage requested over zero statements
    #[error("coverage of {subject} is undefined: no instrumented statements")]
    DivisionUndefined {
        /// What the percentage was requested for
        subject: String,
    },

    /// Malformed coverage profile text
    #[error("profile line {line}: {message}")]
    ProfileParse {
        /// 1-based line in the profile file
        line: usize,
        /// Error message
        message: String,
    },

    /// Source file could not be parsed for function declarations
    #[error("failed to parse {file}: {message}")]
    SourceParse {
        /// Source file path
        file: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoverError {
    /// Create a source-not-found error
    #[must_use]
    pub fn source_not_found(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceNotFound {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Create a function lookup miss
    #[must_use]
    pub fn function_not_found(name: impl Into<String>) -> Self {
        Self::FunctionNotFound { name: name.into() }
    }

    /// Create a file lookup miss
    #[must_use]
    pub fn file_not_profiled(name: impl Into<String>) -> Self {
        Self::FileNotProfiled { name: name.into() }
    }

    /// Create an internal inconsistency error
    #[must_use]
    pub fn inconsistent(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inconsistent {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a zero-statement error
    #[must_use]
    pub fn division_undefined(subject: impl Into<String>) -> Self {
        Self::DivisionUndefined {
            subject: subject.into(),
        }
    }

    /// Create a profile parse error
    #[must_use]
    pub fn profile_parse(line: usize, message: impl Into<String>) -> Self {
        Self::ProfileParse {
            line,
            message: message.into(),
        }
    }

    /// Create a source parse error
    #[must_use]
    pub fn source_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Lookup misses are reported to the user but are not internal failures
    #[must_use]
    pub const fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::FunctionNotFound { .. } | Self::FileNotProfiled { .. }
        )
    }
}
