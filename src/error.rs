use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenureError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}
