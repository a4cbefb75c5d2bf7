//! City grouping and city history.

use std::collections::HashSet;

use encore_core::record::{ConcertRecord, cmp_case_insensitive};
use serde::{Deserialize, Serialize};

use crate::{concerts::newest_first, search::Searchable, tally::Tally};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityKey {
  pub city:   String,
  pub region: String,
}

impl CityKey {
  pub fn new(city: impl Into<String>, region: impl Into<String>) -> Self {
    Self { city: city.into(), region: region.into() }
  }

  /// `None` for records without a city.
  pub fn of(record: &ConcertRecord) -> Option<Self> {
    (!record.city.is_empty()).then(|| Self::new(&record.city, &record.region))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
  pub city:  CityKey,
  pub count: usize,
}

impl Searchable for CityCount {
  fn search_fields(&self) -> Vec<&str> {
    vec![self.city.city.as_str(), self.city.region.as_str()]
  }
}

/// Count shows per (city, region), busiest first, ties by city then region.
pub fn city_counts(records: &[ConcertRecord]) -> Vec<CityCount> {
  let mut tally = Tally::new();
  for key in records.iter().filter_map(CityKey::of) {
    tally.add(key.clone(), || key);
  }

  let mut counts: Vec<CityCount> = tally
    .into_entries()
    .into_iter()
    .map(|(city, count)| CityCount { city, count })
    .collect();
  counts.sort_by(|a, b| {
    b.count
      .cmp(&a.count)
      .then_with(|| cmp_case_insensitive(&a.city.city, &b.city.city))
      .then_with(|| cmp_case_insensitive(&a.city.region, &b.city.region))
  });
  counts
}

/// Number of distinct (city, region) pairs; always equals the number of
/// groups [`city_counts`] returns.
pub fn unique_city_count(records: &[ConcertRecord]) -> usize {
  records
    .iter()
    .filter_map(CityKey::of)
    .collect::<HashSet<_>>()
    .len()
}

/// Everything seen in one city.
#[derive(Debug, Clone, Serialize)]
pub struct CityHistory<'a> {
  pub city:           CityKey,
  /// Newest first; festivals included.
  pub concerts:       Vec<&'a ConcertRecord>,
  /// Distinct named venues among the standard shows.
  pub unique_venues:  usize,
  pub festival_count: usize,
}

pub fn city_history<'a>(records: &'a [ConcertRecord], city: &CityKey) -> CityHistory<'a> {
  let concerts = newest_first(
    records
      .iter()
      .filter(|r| r.city == city.city && r.region == city.region),
  );
  let unique_venues = concerts
    .iter()
    .filter(|r| r.has_known_venue())
    .map(|r| r.venue_name.as_str())
    .collect::<HashSet<_>>()
    .len();
  let festival_count = concerts.iter().filter(|r| r.is_festival()).count();

  CityHistory { city: city.clone(), concerts, unique_venues, festival_count }
}
