//! The "this year" view.

use chrono::{Datelike, Local, NaiveDate};
use encore_core::record::ConcertRecord;

use crate::concerts::newest_first;

/// Records dated between January 1st and December 31st (inclusive) of the
/// calendar year containing `today`, newest first.
pub fn concerts_in_year(records: &[ConcertRecord], today: NaiveDate) -> Vec<&ConcertRecord> {
  let year = today.year();
  newest_first(records.iter().filter(|r| r.date.year() == year))
}

/// [`concerts_in_year`] evaluated against the local clock.
pub fn this_year(records: &[ConcertRecord]) -> Vec<&ConcertRecord> {
  concerts_in_year(records, Local::now().date_naive())
}
