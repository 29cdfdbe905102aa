use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostApiError {
    #[error("Host API not available: {api}")]
    Unavailable { api: String },

    #[error("Host API {api} failed: {reason}")]
    Failed { api: String, reason: String },
}

impl HostApiError {
    pub fn unavailable(api: &str) -> Self {
        HostApiError::Unavailable {
            api: api.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error(transparent)]
    Host(#[from] HostApiError),

    #[error("Architecture detection failed: legacy pathway: {legacy}; modern pathway: {modern}")]
    Exhausted { legacy: String, modern: String },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid JSON format: {reason}")]
    InvalidJson { reason: String },

    #[error("Invalid YAML format: {reason}")]
    InvalidYaml { reason: String },

    #[error("Unknown snapshot format")]
    UnknownFormat,
}
