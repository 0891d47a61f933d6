//! Error types for the grundbuch-core library.

use thiserror::Error;

/// Main error type for the grundbuch library.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A named pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// The argument object could not be parsed.
    #[error("invalid argument object: {0}")]
    Arguments(#[from] serde_json::Error),

    /// A routine reported a failure.
    #[error("routine error: {0}")]
    Routine(#[from] RoutineError),
}

/// Errors raised while compiling a pattern.
#[derive(Error, Debug)]
#[error("failed to compile pattern `{name}`")]
pub struct PatternError {
    /// Name of the pattern, or the pattern text for anonymous ones.
    pub name: String,
    #[source]
    pub source: regex::Error,
}

/// A token that is not a member of its vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("unknown {vocabulary} token: {token:?}")]
    UnknownToken {
        vocabulary: &'static str,
        token: String,
    },
}

/// Errors reported by extraction routines.
#[derive(Error, Debug)]
pub enum RoutineError {
    /// A required argument was not supplied.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The routine looked up a pattern that is not configured.
    #[error("no pattern named `{0}`")]
    UnknownPattern(String),

    /// Nothing in the input satisfied the routine.
    #[error("nothing found: {0}")]
    NotFound(String),

    /// A vocabulary token could not be resolved.
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    /// A pattern supplied to the routine failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Free-form failure from a host-supplied routine.
    #[error("{0}")]
    Failed(String),
}

/// Errors raised while decoding an envelope line on the host side.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error text is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("error text is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for grundbuch operations.
pub type Result<T> = std::result::Result<T, ScriptError>;
