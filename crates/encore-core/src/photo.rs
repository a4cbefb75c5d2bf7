//! Photo references attached to a concert.
//!
//! Only the platform asset identifier is stored; the image or video itself
//! never enters Encore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::ConcertRecord;

/// A reference to a photo or video in the user's media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
  pub photo_id:   Uuid,
  /// Back-reference to the owning concert.
  pub concert_id: Uuid,
  /// Opaque identifier into the platform media library.
  pub asset_id:   String,
  /// Store-assigned timestamp.
  pub date_added: DateTime<Utc>,
  pub is_video:   bool,
}

/// Input to [`crate::store::ConcertStore::add_photo`].
/// `date_added` is always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
  pub asset_id: String,
  pub is_video: bool,
}

impl NewPhoto {
  pub fn image(asset_id: impl Into<String>) -> Self {
    Self { asset_id: asset_id.into(), is_video: false }
  }

  pub fn video(asset_id: impl Into<String>) -> Self {
    Self { asset_id: asset_id.into(), is_video: true }
  }
}

/// Drop candidates whose asset is already attached to `concert`, as well as
/// repeats within the batch itself. Order is preserved.
///
/// The store does not enforce uniqueness; callers run picks through this
/// before inserting.
pub fn unseen_assets(concert: &ConcertRecord, candidates: Vec<NewPhoto>) -> Vec<NewPhoto> {
  let mut out: Vec<NewPhoto> = Vec::with_capacity(candidates.len());
  for candidate in candidates {
    let seen = concert.has_photo_asset(&candidate.asset_id)
      || out.iter().any(|p| p.asset_id == candidate.asset_id);
    if !seen {
      out.push(candidate);
    }
  }
  out
}
