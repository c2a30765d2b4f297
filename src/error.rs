#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ViewError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ViewError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
