//! The Encore aggregation engine.
//!
//! Pure, synchronous functions over a snapshot of [`ConcertRecord`]s. Nothing
//! is cached: every call recomputes from the slice it is given, so calling
//! twice on the same snapshot yields the same output. No function here can
//! fail; absent fields were already defaulted when the records were built.
//!
//! # Quick start
//!
//! ```no_run
//! use encore_insights::Insights;
//!
//! # fn records() -> Vec<encore_core::record::ConcertRecord> { vec![] }
//! let records = records();
//! let today = chrono::Local::now().date_naive();
//! let insights = Insights::derive(&records, today);
//! println!("{} concerts, {} artists", insights.summary.total_concerts, insights.artists.len());
//! ```

pub mod artists;
pub mod cities;
pub mod concerts;
pub mod festivals;
pub mod search;
pub mod summary;
pub mod venues;
pub mod yearly;

mod tally;

use chrono::NaiveDate;
use encore_core::record::ConcertRecord;
use serde::Serialize;

pub use artists::{ArtistCount, ArtistHistory, artist_counts, artist_directory, artist_history};
pub use cities::{CityCount, CityHistory, CityKey, city_counts, city_history};
pub use concerts::{ConcertFilter, filter_concerts, newest_first};
pub use festivals::{FestivalGroup, festival_groups};
pub use search::{Searchable, search};
pub use summary::Summary;
pub use venues::{VenueCount, VenueHistory, VenueKey, venue_counts, venue_history};
pub use yearly::{concerts_in_year, this_year};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Every grouped view, derived together from one snapshot.
///
/// Build one per data refresh and hand it to the front end; rebuild after
/// the next write.
#[derive(Debug, Clone, Serialize)]
pub struct Insights<'a> {
  pub summary:   Summary,
  pub artists:   Vec<ArtistCount>,
  pub venues:    Vec<VenueCount>,
  pub cities:    Vec<CityCount>,
  pub festivals: Vec<FestivalGroup<'a>>,
  pub this_year: Vec<&'a ConcertRecord>,
}

impl<'a> Insights<'a> {
  pub fn derive(records: &'a [ConcertRecord], today: NaiveDate) -> Self {
    Self {
      summary:   Summary::compute(records, today),
      artists:   artist_counts(records),
      venues:    venue_counts(records),
      cities:    city_counts(records),
      festivals: festival_groups(records),
      this_year: concerts_in_year(records, today),
    }
  }
}

// ─── Test fixtures ───────────────────────────────────────────────────────────
