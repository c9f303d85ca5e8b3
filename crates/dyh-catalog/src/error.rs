#![deny(unsafe_code)]

use std::path::PathBuf;

/// Fatal catalog configuration errors.
///
/// Every variant means the catalog must not be used; callers are expected to
/// refuse to start rather than fall back to a partial rule set.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog header: {message}")]
    InvalidHeader { message: String },

    #[error("catalog declares no strategies")]
    EmptyCatalog,

    #[error("duplicate question id: {id}")]
    DuplicateQuestion { id: String },

    #[error("duplicate strategy id: {id}")]
    DuplicateStrategy { id: String },

    #[error("strategy {id} has no priority")]
    MissingPriority { id: String },

    #[error("strategies {first} and {second} share priority {priority}")]
    DuplicatePriority {
        priority: u32,
        first: String,
        second: String,
    },

    #[error("strategy {strategy} references unknown question {question}")]
    UnknownQuestion { strategy: String, question: String },

    #[error("strategy {strategy} tests non-critical question {question} for a no-answer")]
    NotCritical { strategy: String, question: String },

    #[error("strategy {strategy} has an invalid answer condition on {question}: {message}")]
    InvalidCondition {
        strategy: String,
        question: String,
        message: String,
    },

    #[error("field alias {field} points at unknown question {question}")]
    UnknownFieldTarget { field: String, question: String },

    #[error("field alias {field} maps to both {first} and {second}")]
    ConflictingAlias {
        field: String,
        first: String,
        second: String,
    },

    #[error("field alias {field} has since {since} after until {until}")]
    InvalidAliasRange { field: String, since: u32, until: u32 },

    #[error("unreachable strategies (never the winning match): {ids}")]
    Unreachable { ids: String },

    #[error("catalog has {assignments} answer combinations to analyze (limit {limit})")]
    AnalysisTooLarge { assignments: String, limit: u64 },

    #[error("invalid sha256 pin: {message}")]
    InvalidSha256 { message: String },

    #[error("catalog sha256 mismatch (expected {expected}, got {actual})")]
    Sha256Mismatch { expected: String, actual: String },

    #[error("failed to fingerprint catalog: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
