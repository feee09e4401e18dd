use thiserror::Error;

/// Errors raised while talking to the CMS backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Errors the fetch policy must never retry.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Message fit for showing in the admin UI.
    pub fn detail(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            Self::Unauthorized => "Your session has expired".to_string(),
            Self::NotFound(_) => "Not found".to_string(),
            Self::Http(_) => "Backend unavailable".to_string(),
            Self::Json(e) => format!("Invalid response: {e}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Settings must be a JSON object")]
    NotAnObject,

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
