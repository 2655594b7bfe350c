use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RoastError {
    #[error("store error: {0}")]
    Store(String),
    #[error("inventory error: {0}")]
    Inventory(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;

/// Map a boxed collaborator error to a typed store error.
pub(crate) fn map_store_error(e: roast_traits::BoxError) -> RoastError {
    RoastError::Store(e.to_string())
}

/// Map a boxed collaborator error to a typed inventory error.
pub(crate) fn map_inventory_error(e: roast_traits::BoxError) -> RoastError {
    RoastError::Inventory(e.to_string())
}
