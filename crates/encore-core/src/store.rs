//! The `ConcertStore` trait.
//!
//! Implemented by storage backends (`encore-store-sqlite`, and
//! [`crate::memory::MemoryStore`] for tests). The command-line front end
//! depends on this abstraction, never on a concrete backend; the aggregation
//! engine never sees a store at all, only the snapshot it returns.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  draft::ConcertDraft,
  photo::{NewPhoto, PhotoRecord},
  record::ConcertRecord,
};

/// Row counts per entity, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStats {
  pub concerts: usize,
  pub artists:  usize,
  pub photos:   usize,
}

/// Abstraction over an Encore record store backend.
///
/// Callers validate drafts before writing; the store persists whatever it is
/// given. Reads after a write from the same handle observe that write.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait ConcertStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Concerts ──────────────────────────────────────────────────────────

  /// Persist a new concert built from `draft` and return it.
  fn create(
    &self,
    draft: ConcertDraft,
  ) -> impl Future<Output = Result<ConcertRecord, Self::Error>> + Send + '_;

  /// Replace every field of concert `id` with `draft`. The artist list is
  /// discarded and rebuilt; photos are kept.
  fn update(
    &self,
    id: Uuid,
    draft: ConcertDraft,
  ) -> impl Future<Output = Result<ConcertRecord, Self::Error>> + Send + '_;

  /// Delete a concert together with its artists and photos.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a concert by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ConcertRecord>, Self::Error>> + Send + '_;

  /// A snapshot of every concert, newest date first.
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<ConcertRecord>, Self::Error>> + Send + '_;

  // ── Photos ────────────────────────────────────────────────────────────

  /// Attach a photo reference to a concert. `date_added` is set by the store.
  fn add_photo(
    &self,
    concert_id: Uuid,
    photo: NewPhoto,
  ) -> impl Future<Output = Result<PhotoRecord, Self::Error>> + Send + '_;

  fn remove_photo(
    &self,
    photo_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Diagnostics ───────────────────────────────────────────────────────

  fn data_stats(
    &self,
  ) -> impl Future<Output = Result<DataStats, Self::Error>> + Send + '_;

  /// Remove every photo reference, leaving concerts intact.
  fn clear_photos(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove everything.
  fn clear_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
