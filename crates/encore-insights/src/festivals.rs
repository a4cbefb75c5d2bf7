//! Festival grouping: one group per festival, across every year attended.

use std::collections::HashMap;

use encore_core::record::{ConcertKind, ConcertRecord, cmp_case_insensitive, name_key};
use serde::Serialize;

use crate::{artists::artist_keys, concerts::newest_first, search::Searchable};

/// One year's visit to a festival.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalAttendance<'a> {
  pub concert: &'a ConcertRecord,
  pub year:    i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FestivalGroup<'a> {
  pub name:           String,
  /// Number of records in the group.
  pub attendance:     usize,
  /// Distinct artists across every attended edition.
  pub unique_artists: usize,
  /// Newest first.
  pub attended:       Vec<FestivalAttendance<'a>>,
}

impl Searchable for FestivalGroup<'_> {
  fn search_fields(&self) -> Vec<&str> {
    std::iter::once(self.name.as_str())
      .chain(self.attended.iter().map(|a| a.concert.city.as_str()))
      .collect()
  }
}

/// Group festival records by festival name, ignoring case. Each group keeps
/// the first spelling seen. Standard concerts never appear.
///
/// Groups are ordered by attendance, most-attended first, then by name.
pub fn festival_groups(records: &[ConcertRecord]) -> Vec<FestivalGroup<'_>> {
  let mut index: HashMap<String, usize> = HashMap::new();
  let mut members: Vec<(&str, Vec<&ConcertRecord>)> = Vec::new();

  for record in records.iter().filter(|r| r.kind == ConcertKind::Festival) {
    let name = record.festival_display_name();
    match index.get(&name_key(name)) {
      Some(&i) => members[i].1.push(record),
      None => {
        index.insert(name_key(name), members.len());
        members.push((name, vec![record]));
      }
    }
  }

  let mut groups: Vec<FestivalGroup<'_>> = members
    .into_iter()
    .map(|(name, concerts)| {
      let unique_artists = artist_keys(concerts.iter().copied()).len();
      let attended = newest_first(concerts)
        .into_iter()
        .map(|concert| FestivalAttendance { concert, year: concert.year() })
        .collect::<Vec<_>>();
      FestivalGroup {
        name: name.to_owned(),
        attendance: attended.len(),
        unique_artists,
        attended,
      }
    })
    .collect();

  groups.sort_by(|a, b| {
    b.attendance
      .cmp(&a.attendance)
      .then_with(|| cmp_case_insensitive(&a.name, &b.name))
  });
  groups
}
