#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("No visions found in {0}")]
    NoVisions(String),

    #[error(transparent)]
    Common(#[from] ternary_common::error::CommonError),
}
