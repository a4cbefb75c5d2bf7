//! Headline numbers for the insights screen.

use chrono::NaiveDate;
use encore_core::record::ConcertRecord;
use serde::Serialize;

use crate::{
  artists::artist_keys,
  cities::unique_city_count,
  venues::unique_venue_count,
  yearly::concerts_in_year,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub total_concerts:     usize,
  pub total_festivals:    usize,
  pub unique_artists:     usize,
  pub unique_venues:      usize,
  pub unique_cities:      usize,
  pub concerts_this_year: usize,
}

impl Summary {
  pub fn compute(records: &[ConcertRecord], today: NaiveDate) -> Self {
    Self {
      total_concerts:     records.len(),
      total_festivals:    records.iter().filter(|r| r.is_festival()).count(),
      unique_artists:     artist_keys(records).len(),
      unique_venues:      unique_venue_count(records),
      unique_cities:      unique_city_count(records),
      concerts_this_year: concerts_in_year(records, today).len(),
    }
  }
}
