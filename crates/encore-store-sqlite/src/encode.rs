//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, timestamps as RFC 3339 strings, UUIDs as
//! hyphenated lowercase strings and enumerations by their lowercase name.
//! Nullable text columns decode to the record defaults.

use chrono::{DateTime, NaiveDate, Utc};
use encore_core::{
  draft::{join_friend_tags, split_friend_tags},
  photo::PhotoRecord,
  record::{
    ArtistRecord, ConcertKind, ConcertRecord, DateGranularity, UNKNOWN_ARTIST,
    UNKNOWN_VENUE,
  },
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

pub fn encode_date(date: NaiveDate) -> String { date.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

fn decode_kind(s: &str) -> Result<ConcertKind> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown concert kind: {s:?}")))
}

fn decode_granularity(s: &str) -> Result<DateGranularity> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown date granularity: {s:?}")))
}

/// Trimmed text, or `fallback` when the column is NULL or blank.
fn text_or(value: Option<String>, fallback: &str) -> String {
  match value.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => v.to_owned(),
    _ => fallback.to_owned(),
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

// ─── Concert columns ─────────────────────────────────────────────────────────

/// Owned column values for one `concerts` row, ready to bind.
pub struct ConcertColumns {
  pub concert_id:    String,
  pub date:          String,
  pub granularity:   String,
  pub kind:          String,
  pub venue_name:    String,
  pub festival_name: String,
  pub city:          String,
  pub region:        String,
  pub description:   Option<String>,
  pub setlist_url:   Option<String>,
  pub friend_tags:   String,
}

impl ConcertColumns {
  pub fn of(c: &ConcertRecord) -> Self {
    Self {
      concert_id:    encode_uuid(c.concert_id),
      date:          encode_date(c.date),
      granularity:   c.granularity.to_string(),
      kind:          c.kind.to_string(),
      venue_name:    c.venue_name.clone(),
      festival_name: c.festival_name.clone(),
      city:          c.city.clone(),
      region:        c.region.clone(),
      description:   c.description.clone(),
      setlist_url:   c.setlist_url.clone(),
      friend_tags:   join_friend_tags(&c.friend_tags),
    }
  }
}

/// Owned column values for one `artists` row.
pub struct ArtistColumns {
  pub artist_id:    String,
  pub concert_id:   String,
  pub name:         String,
  pub is_headliner: bool,
}

impl ArtistColumns {
  pub fn of(a: &ArtistRecord) -> Self {
    Self {
      artist_id:    encode_uuid(a.artist_id),
      concert_id:   encode_uuid(a.concert_id),
      name:         a.name.clone(),
      is_headliner: a.is_headliner,
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONCERT_SELECT: &str = "SELECT
     concert_id, date, date_granularity, kind, venue_name, festival_name,
     city, region, description, setlist_url, friend_tags
   FROM concerts";

pub const ARTIST_SELECT: &str =
  "SELECT artist_id, concert_id, name, is_headliner FROM artists";

pub const PHOTO_SELECT: &str =
  "SELECT photo_id, concert_id, asset_id, date_added, is_video FROM photos";

/// Raw strings read directly from a `concerts` row.
pub struct RawConcert {
  pub concert_id:    String,
  pub date:          String,
  pub granularity:   String,
  pub kind:          String,
  pub venue_name:    Option<String>,
  pub festival_name: Option<String>,
  pub city:          Option<String>,
  pub region:        Option<String>,
  pub description:   Option<String>,
  pub setlist_url:   Option<String>,
  pub friend_tags:   Option<String>,
}

impl RawConcert {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      concert_id:    row.get(0)?,
      date:          row.get(1)?,
      granularity:   row.get(2)?,
      kind:          row.get(3)?,
      venue_name:    row.get(4)?,
      festival_name: row.get(5)?,
      city:          row.get(6)?,
      region:        row.get(7)?,
      description:   row.get(8)?,
      setlist_url:   row.get(9)?,
      friend_tags:   row.get(10)?,
    })
  }

  /// Decode the row, attaching its already-decoded children.
  pub fn into_record(
    self,
    artists: Vec<ArtistRecord>,
    photos: Vec<PhotoRecord>,
  ) -> Result<ConcertRecord> {
    let granularity = decode_granularity(&self.granularity)?;
    let mut record = ConcertRecord {
      concert_id: decode_uuid(&self.concert_id)?,
      date: granularity.normalize(decode_date(&self.date)?),
      granularity,
      kind: decode_kind(&self.kind)?,
      venue_name: text_or(self.venue_name, UNKNOWN_VENUE),
      festival_name: text_or(self.festival_name, ""),
      city: text_or(self.city, ""),
      region: text_or(self.region, ""),
      description: non_blank(self.description),
      setlist_url: non_blank(self.setlist_url),
      friend_tags: self
        .friend_tags
        .as_deref()
        .map(split_friend_tags)
        .unwrap_or_default(),
      artists,
      photos,
    };
    record.sort_children();
    Ok(record)
  }
}

/// Raw values read directly from an `artists` row.
pub struct RawArtist {
  pub artist_id:    String,
  pub concert_id:   String,
  pub name:         Option<String>,
  pub is_headliner: bool,
}

impl RawArtist {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      artist_id:    row.get(0)?,
      concert_id:   row.get(1)?,
      name:         row.get(2)?,
      is_headliner: row.get(3)?,
    })
  }

  pub fn into_artist(self) -> Result<ArtistRecord> {
    Ok(ArtistRecord {
      artist_id:    decode_uuid(&self.artist_id)?,
      concert_id:   decode_uuid(&self.concert_id)?,
      name:         text_or(self.name, UNKNOWN_ARTIST),
      is_headliner: self.is_headliner,
    })
  }
}

/// Raw values read directly from a `photos` row.
pub struct RawPhoto {
  pub photo_id:   String,
  pub concert_id: String,
  pub asset_id:   String,
  pub date_added: String,
  pub is_video:   bool,
}

impl RawPhoto {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      photo_id:   row.get(0)?,
      concert_id: row.get(1)?,
      asset_id:   row.get(2)?,
      date_added: row.get(3)?,
      is_video:   row.get(4)?,
    })
  }

  pub fn into_photo(self) -> Result<PhotoRecord> {
    Ok(PhotoRecord {
      photo_id:   decode_uuid(&self.photo_id)?,
      concert_id: decode_uuid(&self.concert_id)?,
      asset_id:   self.asset_id,
      date_added: decode_dt(&self.date_added)?,
      is_video:   self.is_video,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn null_columns_decode_to_defaults() {
    let raw = RawConcert {
      concert_id:    encode_uuid(Uuid::new_v4()),
      date:          "2022-06-18".into(),
      granularity:   "full".into(),
      kind:          "standard".into(),
      venue_name:    None,
      festival_name: None,
      city:          Some("  ".into()),
      region:        None,
      description:   Some("".into()),
      setlist_url:   None,
      friend_tags:   None,
    };
    let record = raw.into_record(vec![], vec![]).unwrap();
    assert_eq!(record.granularity, DateGranularity::Exact);
    assert_eq!(record.venue_name, UNKNOWN_VENUE);
    assert_eq!(record.city, "");
    assert_eq!(record.description, None);
    assert!(record.friend_tags.is_empty());

    let artist = RawArtist {
      artist_id:    encode_uuid(Uuid::new_v4()),
      concert_id:   encode_uuid(record.concert_id),
      name:         None,
      is_headliner: true,
    };
    assert_eq!(artist.into_artist().unwrap().name, UNKNOWN_ARTIST);
  }

  #[test]
  fn stored_dates_are_renormalised() {
    let raw = RawConcert {
      concert_id:    encode_uuid(Uuid::new_v4()),
      date:          "2022-06-18".into(),
      granularity:   "year".into(),
      kind:          "festival".into(),
      venue_name:    None,
      festival_name: Some("Riot Fest".into()),
      city:          None,
      region:        None,
      description:   None,
      setlist_url:   None,
      friend_tags:   Some("Ana,Ben".into()),
    };
    let record = raw.into_record(vec![], vec![]).unwrap();
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
    assert_eq!(record.kind, ConcertKind::Festival);
    assert_eq!(record.friend_tags, ["Ana", "Ben"]);
  }

  #[test]
  fn bad_text_is_a_decode_error() {
    assert!(matches!(decode_date("18/06/2022"), Err(Error::Decode(_))));
    assert!(matches!(decode_kind("gig"), Err(Error::Decode(_))));
    assert!(matches!(decode_dt("yesterday"), Err(Error::Decode(_))));
    assert!(decode_uuid("not-a-uuid").is_err());
  }
}
