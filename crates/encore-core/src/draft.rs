//! Create/update payloads and the boundary where defaults are applied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  ValidationError,
  record::{ArtistRecord, ConcertKind, ConcertRecord, DateGranularity, UNKNOWN_VENUE},
};

// ─── Friend tags ─────────────────────────────────────────────────────────────

/// Split a comma-separated tag string, trimming each tag and dropping empties.
pub fn split_friend_tags(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_owned)
    .collect()
}

/// Inverse of [`split_friend_tags`].
pub fn join_friend_tags(tags: &[String]) -> String { tags.join(", ") }

// ─── Drafts ──────────────────────────────────────────────────────────────────

/// One line of a draft's bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDraft {
  pub name:         String,
  pub is_headliner: bool,
}

/// Input to [`crate::store::ConcertStore::create`] and
/// [`crate::store::ConcertStore::update`].
///
/// Fields are raw user input; nothing is trimmed or defaulted until
/// [`ConcertDraft::into_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcertDraft {
  pub date:          NaiveDate,
  pub granularity:   DateGranularity,
  pub kind:          ConcertKind,
  pub venue_name:    String,
  pub festival_name: String,
  pub city:          String,
  pub region:        String,
  pub description:   String,
  pub setlist_url:   String,
  /// Comma-separated, as typed.
  pub friend_tags:   String,
  pub artists:       Vec<ArtistDraft>,
}

impl ConcertDraft {
  /// A draft with every optional field empty.
  pub fn new(date: NaiveDate, kind: ConcertKind) -> Self {
    Self {
      date,
      granularity: DateGranularity::Exact,
      kind,
      venue_name: String::new(),
      festival_name: String::new(),
      city: String::new(),
      region: String::new(),
      description: String::new(),
      setlist_url: String::new(),
      friend_tags: String::new(),
      artists: Vec::new(),
    }
  }

  pub fn standard(date: NaiveDate, venue_name: impl Into<String>) -> Self {
    Self {
      venue_name: venue_name.into(),
      ..Self::new(date, ConcertKind::Standard)
    }
  }

  pub fn festival(date: NaiveDate, festival_name: impl Into<String>) -> Self {
    Self {
      festival_name: festival_name.into(),
      ..Self::new(date, ConcertKind::Festival)
    }
  }

  pub fn with_artist(mut self, name: impl Into<String>, is_headliner: bool) -> Self {
    self.artists.push(ArtistDraft { name: name.into(), is_headliner });
    self
  }

  pub fn in_city(mut self, city: impl Into<String>, region: impl Into<String>) -> Self {
    self.city = city.into();
    self.region = region.into();
    self
  }

  pub fn with_granularity(mut self, granularity: DateGranularity) -> Self {
    self.granularity = granularity;
    self
  }

  /// Check the minimum field requirements for saving.
  ///
  /// Standard concerts need a venue, festivals need a festival name, and
  /// every record needs at least one named artist.
  pub fn validate(&self) -> Result<(), ValidationError> {
    match self.kind {
      ConcertKind::Standard if self.venue_name.trim().is_empty() => {
        return Err(ValidationError::MissingVenueName);
      }
      ConcertKind::Festival if self.festival_name.trim().is_empty() => {
        return Err(ValidationError::MissingFestivalName);
      }
      _ => {}
    }
    if !self.artists.iter().any(|a| !a.name.trim().is_empty()) {
      return Err(ValidationError::NoArtists);
    }
    Ok(())
  }

  /// Build the stored form of this draft under `concert_id`.
  ///
  /// Strings are trimmed, unnamed artists dropped, the venue defaulted, the
  /// date pinned to its granularity, and children sorted. Each artist gets a
  /// fresh id; edits replace the whole bill. The record has no photos.
  pub fn into_record(self, concert_id: Uuid) -> ConcertRecord {
    let venue_name = match self.venue_name.trim() {
      "" => UNKNOWN_VENUE.to_owned(),
      v => v.to_owned(),
    };

    let artists = self
      .artists
      .into_iter()
      .filter_map(|a| {
        let name = a.name.trim();
        (!name.is_empty()).then(|| ArtistRecord {
          artist_id: Uuid::new_v4(),
          concert_id,
          name: name.to_owned(),
          is_headliner: a.is_headliner,
        })
      })
      .collect();

    let mut record = ConcertRecord {
      concert_id,
      date: self.granularity.normalize(self.date),
      granularity: self.granularity,
      kind: self.kind,
      venue_name,
      festival_name: self.festival_name.trim().to_owned(),
      city: self.city.trim().to_owned(),
      region: self.region.trim().to_owned(),
      description: non_empty(self.description),
      setlist_url: non_empty(self.setlist_url),
      friend_tags: split_friend_tags(&self.friend_tags),
      artists,
      photos: Vec::new(),
    };
    record.sort_children();
    record
  }
}

/// Pre-fill a draft with a stored record's values, as an edit form would.
impl From<&ConcertRecord> for ConcertDraft {
  fn from(record: &ConcertRecord) -> Self {
    Self {
      date:          record.date,
      granularity:   record.granularity,
      kind:          record.kind,
      venue_name:    record.venue_name.clone(),
      festival_name: record.festival_name.clone(),
      city:          record.city.clone(),
      region:        record.region.clone(),
      description:   record.description.clone().unwrap_or_default(),
      setlist_url:   record.setlist_url.clone().unwrap_or_default(),
      friend_tags:   join_friend_tags(&record.friend_tags),
      artists:       record
        .artists
        .iter()
        .map(|a| ArtistDraft { name: a.name.clone(), is_headliner: a.is_headliner })
        .collect(),
    }
  }
}

fn non_empty(s: String) -> Option<String> {
  let trimmed = s.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
