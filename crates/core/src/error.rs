#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity}")]
    NotFound { entity: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}
