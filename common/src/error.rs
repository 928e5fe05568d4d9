use thiserror::Error;

/// Errors surfaced by the organization store.
///
/// Every repository method returns this explicitly so callers can map
/// failures to HTTP responses instead of logging and dropping them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}
