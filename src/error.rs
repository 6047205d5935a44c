//! Crate error type

/// Errors raised by the contest core.
///
/// Configuration errors are fatal to the feature that needs the missing
/// collaborator; the caller logs them and keeps running without it.
#[derive(Debug)]
pub enum ContestError {
    /// A required scene collaborator (opponent rig, gaze point) is absent
    ConfigurationMissing(&'static str),
    /// An action draw fell outside the enumerated action set
    UnreachableState(u32),
    /// Tuning/settings file could not be read
    Io(std::io::Error),
    /// Tuning/settings file is not valid JSON for the expected shape
    Json(serde_json::Error),
}

impl std::fmt::Display for ContestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationMissing(what) => write!(f, "missing scene object: {}", what),
            Self::UnreachableState(index) => write!(f, "action not recognized: {}", index),
            Self::Io(e) => write!(f, "io error: {}", e),
            Self::Json(e) => write!(f, "invalid json: {}", e),
        }
    }
}

impl std::error::Error for ContestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ContestError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ContestError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, ContestError>;
