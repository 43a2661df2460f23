use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Template error: {0}")]
    Template(#[from] serde_json::Error),

    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),
}
