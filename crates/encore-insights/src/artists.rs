//! Artist-centred views: play counts, the alphabetical directory, and one
//! artist's history.

use std::collections::HashSet;

use encore_core::record::{ConcertRecord, Role, cmp_case_insensitive, name_key};
use serde::Serialize;

use crate::{concerts::newest_first, search::Searchable, tally::Tally};

/// How many times an artist was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
  /// The first spelling seen for this artist.
  pub name:  String,
  pub count: usize,
}

impl Searchable for ArtistCount {
  fn search_fields(&self) -> Vec<&str> { vec![self.name.as_str()] }
}

/// Every non-empty artist name across `records`, trimmed, in snapshot order.
fn artist_names(records: &[ConcertRecord]) -> impl Iterator<Item = &str> {
  records
    .iter()
    .flat_map(|r| r.artists.iter())
    .map(|a| a.name.trim())
    .filter(|n| !n.is_empty())
}

/// The set of distinct artist keys across `records`.
pub(crate) fn artist_keys<'a>(
  records: impl IntoIterator<Item = &'a ConcertRecord>,
) -> HashSet<String> {
  records
    .into_iter()
    .flat_map(|r| r.artists.iter())
    .map(|a| name_key(&a.name))
    .filter(|k| !k.is_empty())
    .collect()
}

/// Count appearances per artist, most-seen first, ties alphabetical.
///
/// Every bill entry counts once, so an artist's count is the number of
/// concerts they appeared at (the sum can exceed the number of records).
pub fn artist_counts(records: &[ConcertRecord]) -> Vec<ArtistCount> {
  let mut tally = Tally::new();
  for name in artist_names(records) {
    tally.add(name_key(name), || name.to_owned());
  }

  let mut counts: Vec<ArtistCount> = tally
    .into_entries()
    .into_iter()
    .map(|(name, count)| ArtistCount { name, count })
    .collect();
  counts.sort_by(|a, b| {
    b.count
      .cmp(&a.count)
      .then_with(|| cmp_case_insensitive(&a.name, &b.name))
  });
  counts
}

/// Every distinct artist, sorted alphabetically ignoring case.
pub fn artist_directory(records: &[ConcertRecord]) -> Vec<String> {
  let mut tally = Tally::new();
  for name in artist_names(records) {
    tally.add(name_key(name), || name.to_owned());
  }
  let mut names: Vec<String> =
    tally.into_entries().into_iter().map(|(name, _)| name).collect();
  names.sort_by(|a, b| cmp_case_insensitive(a, b));
  names
}

/// One concert an artist played, with the role they played there.
#[derive(Debug, Clone, Serialize)]
pub struct Appearance<'a> {
  pub concert: &'a ConcertRecord,
  pub role:    Role,
}

/// Everything the log knows about one artist.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistHistory<'a> {
  pub name:            String,
  /// Newest first.
  pub appearances:     Vec<Appearance<'a>>,
  pub headliner_count: usize,
  pub opener_count:    usize,
  pub festival_count:  usize,
}

/// Collect the concerts featuring `name` (matched ignoring case and
/// surrounding whitespace). The role is resolved per concert.
pub fn artist_history<'a>(records: &'a [ConcertRecord], name: &str) -> ArtistHistory<'a> {
  let concerts = newest_first(records.iter().filter(|r| r.find_artist(name).is_some()));

  let display = records
    .iter()
    .find_map(|r| r.find_artist(name))
    .map(|a| a.name.trim().to_owned())
    .unwrap_or_else(|| name.trim().to_owned());

  let appearances: Vec<Appearance<'a>> = concerts
    .into_iter()
    .filter_map(|concert| {
      concert
        .role_for_name(name)
        .map(|role| Appearance { concert, role })
    })
    .collect();

  let count = |role: Role| appearances.iter().filter(|a| a.role == role).count();

  ArtistHistory {
    name:            display,
    headliner_count: count(Role::Headliner),
    opener_count:    count(Role::Opener),
    festival_count:  count(Role::Festival),
    appearances,
  }
}
