//! Error type for `encore-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] encore_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A column held text that does not decode to its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("concert not found: {0}")]
  ConcertNotFound(uuid::Uuid),

  #[error("photo not found: {0}")]
  PhotoNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
