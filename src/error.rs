use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ImportanceError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportanceError {
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ImportanceError>;
