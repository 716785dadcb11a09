#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("env var {0} is required and must be nonempty")]
    MissingEnv(&'static str),

    #[error("failed to get node {name}: {reason}")]
    NodeLookup { name: String, reason: String },

    #[error("failed to create app meta json: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to set app meta cache data: {0}")]
    CacheWrite(String),
}

pub type MetaResult<T> = Result<T, MetaError>;
