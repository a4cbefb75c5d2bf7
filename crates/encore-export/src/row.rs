//! Flattening records into export rows.

use encore_core::{draft::join_friend_tags, record::ConcertRecord};
use serde::Serialize;

/// One line of an export, every column already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
  pub date:          String,
  pub kind:          String,
  pub festival_name: String,
  pub venue_name:    String,
  pub artist_name:   String,
  pub artist_role:   String,
  pub city:          String,
  pub region:        String,
  pub description:   String,
  pub friends:       String,
  pub setlist_url:   String,
}

impl ExportRow {
  /// Columns in output order.
  pub fn fields(&self) -> [&str; 11] {
    [
      self.date.as_str(),
      self.kind.as_str(),
      self.festival_name.as_str(),
      self.venue_name.as_str(),
      self.artist_name.as_str(),
      self.artist_role.as_str(),
      self.city.as_str(),
      self.region.as_str(),
      self.description.as_str(),
      self.friends.as_str(),
      self.setlist_url.as_str(),
    ]
  }
}

/// One row per (concert, artist) in bill order, or one row for a concert
/// with no artists. Concerts are emitted newest first.
///
/// Festival rows leave the venue blank; standard rows leave the festival
/// blank.
pub fn export_rows(records: &[ConcertRecord]) -> Vec<ExportRow> {
  let mut sorted: Vec<&ConcertRecord> = records.iter().collect();
  sorted.sort_by(|a, b| b.date.cmp(&a.date));

  let mut rows = Vec::new();
  for concert in sorted {
    let base = ExportRow {
      date:          concert.display_date(),
      kind:          concert.kind.label().to_owned(),
      festival_name: if concert.is_festival() {
        concert.festival_display_name().to_owned()
      } else {
        String::new()
      },
      venue_name:    if concert.is_festival() {
        String::new()
      } else {
        concert.venue_name.clone()
      },
      artist_name:   String::new(),
      artist_role:   String::new(),
      city:          concert.city.clone(),
      region:        concert.region.clone(),
      description:   concert.description.clone().unwrap_or_default(),
      friends:       join_friend_tags(&concert.friend_tags),
      setlist_url:   concert.setlist_url.clone().unwrap_or_default(),
    };

    if concert.artists.is_empty() {
      rows.push(base);
      continue;
    }
    for artist in &concert.artists {
      rows.push(ExportRow {
        artist_name: artist.name.clone(),
        artist_role: concert.role_of(artist).to_string(),
        ..base.clone()
      });
    }
  }
  rows
}
