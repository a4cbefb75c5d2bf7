//! The plain concert list: ordering, kind filter and search.

use encore_core::record::{ConcertKind, ConcertRecord};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::search::search;

/// Collect `records` newest first. Equal dates keep their input order.
pub fn newest_first<'a>(
  records: impl IntoIterator<Item = &'a ConcertRecord>,
) -> Vec<&'a ConcertRecord> {
  let mut out: Vec<&ConcertRecord> = records.into_iter().collect();
  out.sort_by(|a, b| b.date.cmp(&a.date));
  out
}

/// Which kinds of record the concert list shows.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ConcertFilter {
  #[default]
  All,
  FestivalsOnly,
  ConcertsOnly,
}

impl ConcertFilter {
  pub fn admits(self, record: &ConcertRecord) -> bool {
    match self {
      Self::All => true,
      Self::FestivalsOnly => record.kind == ConcertKind::Festival,
      Self::ConcertsOnly => record.kind == ConcertKind::Standard,
    }
  }
}

/// The concert list: records admitted by `filter` and matching `query`,
/// newest first.
pub fn filter_concerts<'a>(
  records: &'a [ConcertRecord],
  filter: ConcertFilter,
  query: &str,
) -> Vec<&'a ConcertRecord> {
  let admitted = newest_first(records.iter().filter(|r| filter.admits(r)));
  search(admitted, query)
}
