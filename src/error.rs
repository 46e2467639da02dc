use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Population error
pub enum PopulationError {
    #[error("Unexpected repository kind: {0}")]
    UnsupportedRepositoryKind(String),

    #[error("Object construction from: {0}")]
    Construction(String),

    #[error("Initializer from: {0}")]
    Initializer(String),

    #[error("Persist from: {0}")]
    Persist(String),

    #[error("Flush from: {0}")]
    Flush(String),

    #[error("Clear from: {0}")]
    Clear(String),

    #[error("Fixture: {0}")]
    Fixture(String),
}
