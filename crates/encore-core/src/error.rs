//! Error types for `encore-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("concert not found: {0}")]
  ConcertNotFound(Uuid),

  #[error("photo not found: {0}")]
  PhotoNotFound(Uuid),

  #[error("invalid date {0:?}: expected YYYY-MM-DD, YYYY-MM or YYYY")]
  InvalidDate(String),

  #[error("invalid concert: {0}")]
  Validation(#[from] ValidationError),
}

/// A draft that does not meet the minimum field requirements for saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("a concert needs a venue name")]
  MissingVenueName,

  #[error("a festival needs a festival name")]
  MissingFestivalName,

  #[error("at least one artist with a name is required")]
  NoArtists,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
