//! Error types.
//!
//! None of these cross the public operation boundary of the canvas: every
//! canvas operation contains its own faults, logs them, and reports failure
//! through its return value. They exist so the internals can use `?`.

/// Stable machine-readable code for an error value.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("tile name is blank")]
    BlankName,
    #[error("tile already exists: {0}")]
    DuplicateName(String),
    #[error("tile not found: {0}")]
    NotFound(String),
    #[error("grid unit must be positive, got {0}")]
    InvalidGridUnit(i32),
    #[error("data source has no entry for {0}")]
    MissingEntry(String),
    #[error("data source error: {0}")]
    Source(#[from] SourceError),
}

impl ErrorCode for PlacementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BlankName => "E_BLANK_NAME",
            Self::DuplicateName(_) => "E_DUPLICATE_NAME",
            Self::NotFound(_) => "E_TILE_NOT_FOUND",
            Self::InvalidGridUnit(_) => "E_INVALID_GRID_UNIT",
            Self::MissingEntry(_) => "E_MISSING_ENTRY",
            Self::Source(e) => e.error_code(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("lookup failed for {name}: {reason}")]
    Lookup { name: String, reason: String },
    #[error("malformed source document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "E_SOURCE_LOOKUP",
            Self::Parse(_) => "E_SOURCE_PARSE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}
