//! Concert records, the unit every view and export is derived from.
//!
//! Records are built with non-optional fields. Defaults ("Unknown Venue",
//! "Unknown Artist", empty city) are applied once, when a record is created
//! from a draft or decoded from storage, never on access.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, photo::PhotoRecord};

/// Venue name substituted when a standard concert has none.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";
/// Artist name substituted when a stored artist has none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Display name for a festival whose name is empty.
pub const UNKNOWN_FESTIVAL: &str = "Unknown Festival";

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Whether a record is a single show at a venue or a festival appearance.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConcertKind {
  #[default]
  Standard,
  Festival,
}

impl ConcertKind {
  /// Capitalised label used in exports.
  pub fn label(self) -> &'static str {
    match self {
      Self::Standard => "Standard",
      Self::Festival => "Festival",
    }
  }
}

/// How much of a record's date is meaningful.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum DateGranularity {
  /// Day, month and year are all known. `full` is the legacy spelling.
  #[default]
  #[serde(alias = "full")]
  #[strum(to_string = "exact", serialize = "full")]
  Exact,
  /// Only the month and year are known; the day is pinned to the 1st.
  #[strum(to_string = "month")]
  Month,
  /// Only the year is known; the date is pinned to January 1st.
  #[strum(to_string = "year")]
  Year,
}

impl DateGranularity {
  /// Pin the parts of `date` this granularity does not cover.
  pub fn normalize(self, date: NaiveDate) -> NaiveDate {
    match self {
      Self::Exact => date,
      Self::Month => date.with_day(1).unwrap_or(date),
      Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
  }
}

/// What an artist did at one particular concert.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Headliner,
  Opener,
  Festival,
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Render `date` at the precision its granularity allows.
///
/// `Exact` → `2024-05-17`, `Month` → `May 2024`, `Year` → `2024`.
pub fn format_date(date: NaiveDate, granularity: DateGranularity) -> String {
  match granularity {
    DateGranularity::Exact => date.format("%Y-%m-%d").to_string(),
    DateGranularity::Month => date.format("%B %Y").to_string(),
    DateGranularity::Year => date.format("%Y").to_string(),
  }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, inferring the granularity from
/// the form. The returned date is already normalised.
pub fn parse_partial_date(input: &str) -> Result<(NaiveDate, DateGranularity)> {
  let s = input.trim();
  let invalid = || Error::InvalidDate(input.to_owned());

  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok((date, DateGranularity::Exact));
  }

  let parts: Vec<&str> = s.split('-').collect();
  match parts.as_slice() {
    [year, month] if year.len() == 4 => {
      let year: i32 = year.parse().map_err(|_| invalid())?;
      let month: u32 = month.parse().map_err(|_| invalid())?;
      let date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
      Ok((date, DateGranularity::Month))
    }
    [year] if year.len() == 4 => {
      let year: i32 = year.parse().map_err(|_| invalid())?;
      let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
      Ok((date, DateGranularity::Year))
    }
    _ => Err(invalid()),
  }
}

// ─── Names ───────────────────────────────────────────────────────────────────

/// The grouping key for an artist name: trimmed and case-folded.
///
/// Two spellings that differ only in case or surrounding whitespace are the
/// same artist everywhere in Encore.
pub fn name_key(name: &str) -> String { name.trim().to_lowercase() }

/// Case-insensitive ordering used for every alphabetical tie-break.
pub fn cmp_case_insensitive(a: &str, b: &str) -> std::cmp::Ordering {
  a.to_lowercase()
    .cmp(&b.to_lowercase())
    .then_with(|| a.cmp(b))
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// An artist on a concert's bill. Owned by exactly one concert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
  pub artist_id:    Uuid,
  /// Back-reference to the owning concert.
  pub concert_id:   Uuid,
  pub name:         String,
  /// Only meaningful for standard concerts; see [`ConcertRecord::role_of`].
  pub is_headliner: bool,
}

/// One attended concert or festival day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcertRecord {
  pub concert_id:    Uuid,
  pub date:          NaiveDate,
  pub granularity:   DateGranularity,
  pub kind:          ConcertKind,
  /// Primary for standard concerts; [`UNKNOWN_VENUE`] when not given.
  pub venue_name:    String,
  /// Primary for festivals; may be empty.
  pub festival_name: String,
  /// Empty when unknown.
  pub city:          String,
  /// State, province or region; empty when unknown.
  pub region:        String,
  pub description:   Option<String>,
  pub setlist_url:   Option<String>,
  pub friend_tags:   Vec<String>,
  /// Headliners first, then by name.
  pub artists:       Vec<ArtistRecord>,
  /// Most recently added first.
  pub photos:        Vec<PhotoRecord>,
}

impl ConcertRecord {
  pub fn is_festival(&self) -> bool { self.kind == ConcertKind::Festival }

  pub fn year(&self) -> i32 { self.date.year() }

  /// Restore the canonical child ordering: headliners first then name
  /// (ordinal comparison), and photos newest first.
  pub fn sort_children(&mut self) {
    self.artists.sort_by(|a, b| {
      b.is_headliner
        .cmp(&a.is_headliner)
        .then_with(|| a.name.cmp(&b.name))
    });
    self.photos.sort_by(|a, b| b.date_added.cmp(&a.date_added));
  }

  pub fn festival_display_name(&self) -> &str {
    if self.festival_name.is_empty() {
      UNKNOWN_FESTIVAL
    } else {
      &self.festival_name
    }
  }

  /// The name a list row shows for this record: the festival for festivals,
  /// otherwise the first headliner, the first artist, or [`UNKNOWN_ARTIST`].
  pub fn primary_name(&self) -> &str {
    if self.is_festival() {
      return self.festival_display_name();
    }
    self
      .artists
      .iter()
      .find(|a| a.is_headliner)
      .or_else(|| self.artists.first())
      .map(|a| a.name.as_str())
      .unwrap_or(UNKNOWN_ARTIST)
  }

  /// The role `artist` played at this concert.
  pub fn role_of(&self, artist: &ArtistRecord) -> Role {
    if self.is_festival() {
      Role::Festival
    } else if artist.is_headliner {
      Role::Headliner
    } else {
      Role::Opener
    }
  }

  /// Find an artist on the bill by case-insensitive trimmed name.
  pub fn find_artist(&self, name: &str) -> Option<&ArtistRecord> {
    let key = name_key(name);
    self.artists.iter().find(|a| name_key(&a.name) == key)
  }

  /// The role of the named artist, or `None` if they are not on the bill.
  pub fn role_for_name(&self, name: &str) -> Option<Role> {
    self.find_artist(name).map(|a| self.role_of(a))
  }

  /// Whether the record has a usable venue for venue-based views.
  pub fn has_known_venue(&self) -> bool {
    !self.is_festival()
      && !self.venue_name.is_empty()
      && self.venue_name != UNKNOWN_VENUE
  }

  /// `"City, Region"`, `"City"`, or an empty string.
  pub fn location(&self) -> String {
    match (self.city.is_empty(), self.region.is_empty()) {
      (false, false) => format!("{}, {}", self.city, self.region),
      (false, true) => self.city.clone(),
      _ => String::new(),
    }
  }

  pub fn display_date(&self) -> String { format_date(self.date, self.granularity) }

  pub fn has_photo_asset(&self, asset_id: &str) -> bool {
    self.photos.iter().any(|p| p.asset_id == asset_id)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn artist(concert_id: Uuid, name: &str, is_headliner: bool) -> ArtistRecord {
    ArtistRecord {
      artist_id: Uuid::new_v4(),
      concert_id,
      name: name.into(),
      is_headliner,
    }
  }

  fn bare(kind: ConcertKind) -> ConcertRecord {
    ConcertRecord {
      concert_id:    Uuid::new_v4(),
      date:          date(2024, 5, 17),
      granularity:   DateGranularity::Exact,
      kind,
      venue_name:    "The Fillmore".into(),
      festival_name: String::new(),
      city:          "San Francisco".into(),
      region:        "CA".into(),
      description:   None,
      setlist_url:   None,
      friend_tags:   vec![],
      artists:       vec![],
      photos:        vec![],
    }
  }

  #[test]
  fn granularity_normalizes_dates() {
    let d = date(2024, 5, 17);
    assert_eq!(DateGranularity::Exact.normalize(d), d);
    assert_eq!(DateGranularity::Month.normalize(d), date(2024, 5, 1));
    assert_eq!(DateGranularity::Year.normalize(d), date(2024, 1, 1));
  }

  #[test]
  fn granularity_parses_legacy_full() {
    assert_eq!("full".parse::<DateGranularity>().unwrap(), DateGranularity::Exact);
    assert_eq!("exact".parse::<DateGranularity>().unwrap(), DateGranularity::Exact);
    assert_eq!(DateGranularity::Exact.to_string(), "exact");
    assert_eq!(DateGranularity::Year.as_ref(), "year");
  }

  #[test]
  fn format_date_per_granularity() {
    let d = date(2023, 8, 4);
    assert_eq!(format_date(d, DateGranularity::Exact), "2023-08-04");
    assert_eq!(format_date(d, DateGranularity::Month), "August 2023");
    assert_eq!(format_date(d, DateGranularity::Year), "2023");
  }

  #[test]
  fn parse_partial_date_infers_granularity() {
    assert_eq!(
      parse_partial_date("2023-08-04").unwrap(),
      (date(2023, 8, 4), DateGranularity::Exact)
    );
    assert_eq!(
      parse_partial_date("2023-08").unwrap(),
      (date(2023, 8, 1), DateGranularity::Month)
    );
    assert_eq!(
      parse_partial_date(" 2023 ").unwrap(),
      (date(2023, 1, 1), DateGranularity::Year)
    );
    assert!(parse_partial_date("2023-13").is_err());
    assert!(parse_partial_date("yesterday").is_err());
    assert!(parse_partial_date("23").is_err());
  }

  #[test]
  fn artists_sort_headliners_first_then_ordinal_name() {
    let mut c = bare(ConcertKind::Standard);
    let id = c.concert_id;
    c.artists = vec![
      artist(id, "beta", false),
      artist(id, "Alpha", false),
      artist(id, "Zed", true),
      artist(id, "Bravo", true),
    ];
    c.sort_children();
    let names: Vec<_> = c.artists.iter().map(|a| a.name.as_str()).collect();
    // Ordinal: uppercase sorts before lowercase.
    assert_eq!(names, ["Bravo", "Zed", "Alpha", "beta"]);
  }

  #[test]
  fn photos_sort_newest_first() {
    let mut c = bare(ConcertKind::Standard);
    let id = c.concert_id;
    let photo = |asset: &str, secs: i64| PhotoRecord {
      photo_id:   Uuid::new_v4(),
      concert_id: id,
      asset_id:   asset.into(),
      date_added: Utc.timestamp_opt(secs, 0).unwrap(),
      is_video:   false,
    };
    c.photos = vec![photo("old", 10), photo("new", 30), photo("mid", 20)];
    c.sort_children();
    let assets: Vec<_> = c.photos.iter().map(|p| p.asset_id.as_str()).collect();
    assert_eq!(assets, ["new", "mid", "old"]);
    assert!(c.has_photo_asset("mid"));
    assert!(!c.has_photo_asset("missing"));
  }

  #[test]
  fn primary_name_prefers_headliner_then_first_artist() {
    let mut c = bare(ConcertKind::Standard);
    assert_eq!(c.primary_name(), UNKNOWN_ARTIST);

    let id = c.concert_id;
    c.artists = vec![artist(id, "Opener Band", false)];
    assert_eq!(c.primary_name(), "Opener Band");

    c.artists.push(artist(id, "Main Act", true));
    c.sort_children();
    assert_eq!(c.primary_name(), "Main Act");
  }

  #[test]
  fn festival_primary_name_uses_festival() {
    let mut c = bare(ConcertKind::Festival);
    let id = c.concert_id;
    c.artists = vec![artist(id, "Someone", true)];
    assert_eq!(c.primary_name(), UNKNOWN_FESTIVAL);
    c.festival_name = "Riot Fest".into();
    assert_eq!(c.primary_name(), "Riot Fest");
  }

  #[test]
  fn role_is_per_concert() {
    let mut show = bare(ConcertKind::Standard);
    let id = show.concert_id;
    show.artists = vec![artist(id, "Headliner", true), artist(id, "Support", false)];
    assert_eq!(show.role_of(&show.artists[0]), Role::Headliner);
    assert_eq!(show.role_of(&show.artists[1]), Role::Opener);
    assert_eq!(show.role_for_name("  support "), Some(Role::Opener));
    assert_eq!(show.role_for_name("nobody"), None);

    let mut fest = bare(ConcertKind::Festival);
    let id = fest.concert_id;
    fest.artists = vec![artist(id, "Headliner", true)];
    assert_eq!(fest.role_of(&fest.artists[0]), Role::Festival);
  }

  #[test]
  fn known_venue_excludes_festivals_and_sentinel() {
    let mut c = bare(ConcertKind::Standard);
    assert!(c.has_known_venue());
    c.venue_name = UNKNOWN_VENUE.into();
    assert!(!c.has_known_venue());
    c.venue_name = String::new();
    assert!(!c.has_known_venue());

    let f = bare(ConcertKind::Festival);
    assert!(!f.has_known_venue());
  }

  #[test]
  fn location_formats() {
    let mut c = bare(ConcertKind::Standard);
    assert_eq!(c.location(), "San Francisco, CA");
    c.region.clear();
    assert_eq!(c.location(), "San Francisco");
    c.city.clear();
    assert_eq!(c.location(), "");
  }

  #[test]
  fn case_insensitive_compare_is_total() {
    use std::cmp::Ordering;
    assert_eq!(cmp_case_insensitive("abc", "ABD"), Ordering::Less);
    assert_eq!(cmp_case_insensitive("B", "a"), Ordering::Greater);
    assert_ne!(cmp_case_insensitive("abc", "ABC"), Ordering::Equal);
  }
}
