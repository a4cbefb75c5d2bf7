//! Venue grouping and venue history.

use std::collections::HashSet;

use encore_core::record::{ConcertRecord, cmp_case_insensitive};
use serde::{Deserialize, Serialize};

use crate::{artists::artist_keys, concerts::newest_first, search::Searchable, tally::Tally};

/// A venue is identified by its name together with its location; two rooms
/// called "The Roxy" in different cities are different venues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueKey {
  pub name:   String,
  pub city:   String,
  pub region: String,
}

impl VenueKey {
  pub fn new(
    name: impl Into<String>,
    city: impl Into<String>,
    region: impl Into<String>,
  ) -> Self {
    Self { name: name.into(), city: city.into(), region: region.into() }
  }

  /// The venue `record` took place at, if it counts as a venue at all.
  /// Festivals and records without a real venue name yield `None`.
  pub fn of(record: &ConcertRecord) -> Option<Self> {
    record.has_known_venue().then(|| {
      Self::new(&record.venue_name, &record.city, &record.region)
    })
  }

  fn cmp_display(&self, other: &Self) -> std::cmp::Ordering {
    cmp_case_insensitive(&self.name, &other.name)
      .then_with(|| cmp_case_insensitive(&self.city, &other.city))
      .then_with(|| cmp_case_insensitive(&self.region, &other.region))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueCount {
  pub venue: VenueKey,
  pub count: usize,
}

impl Searchable for VenueCount {
  fn search_fields(&self) -> Vec<&str> {
    vec![self.venue.name.as_str(), self.venue.city.as_str()]
  }
}

/// Count shows per venue, busiest first; ties ordered by name, then city,
/// then region.
pub fn venue_counts(records: &[ConcertRecord]) -> Vec<VenueCount> {
  let mut tally = Tally::new();
  for key in records.iter().filter_map(VenueKey::of) {
    tally.add(key.clone(), || key);
  }

  let mut counts: Vec<VenueCount> = tally
    .into_entries()
    .into_iter()
    .map(|(venue, count)| VenueCount { venue, count })
    .collect();
  counts.sort_by(|a, b| {
    b.count
      .cmp(&a.count)
      .then_with(|| a.venue.cmp_display(&b.venue))
  });
  counts
}

/// Number of distinct venues, with the same exclusions as [`venue_counts`].
pub fn unique_venue_count(records: &[ConcertRecord]) -> usize {
  records
    .iter()
    .filter_map(VenueKey::of)
    .collect::<HashSet<_>>()
    .len()
}

/// The shows seen at one venue.
#[derive(Debug, Clone, Serialize)]
pub struct VenueHistory<'a> {
  pub venue:          VenueKey,
  /// Newest first.
  pub concerts:       Vec<&'a ConcertRecord>,
  pub unique_artists: usize,
}

pub fn venue_history<'a>(records: &'a [ConcertRecord], venue: &VenueKey) -> VenueHistory<'a> {
  let concerts = newest_first(
    records
      .iter()
      .filter(|r| VenueKey::of(r).as_ref() == Some(venue)),
  );
  let unique_artists = artist_keys(concerts.iter().copied()).len();
  VenueHistory { venue: venue.clone(), concerts, unique_artists }
}
