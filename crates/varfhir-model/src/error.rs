use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid stable identifier: {value}")]
    InvalidStableId {
        value: String,
        #[source]
        source: uuid::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
