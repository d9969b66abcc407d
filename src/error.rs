pub type HeartpopResult<T> = Result<T, HeartpopError>;

#[derive(thiserror::Error, Debug)]
pub enum HeartpopError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl HeartpopError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
