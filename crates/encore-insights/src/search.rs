//! The case-insensitive substring filter shared by every list view.

use encore_core::record::ConcertRecord;

/// A list item that can be narrowed by a free-text query.
pub trait Searchable {
  /// The fields a query is matched against.
  fn search_fields(&self) -> Vec<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
  fn search_fields(&self) -> Vec<&str> { (**self).search_fields() }
}

impl Searchable for String {
  fn search_fields(&self) -> Vec<&str> { vec![self.as_str()] }
}

/// Concert rows match on what the row shows: the primary name, the venue,
/// the festival and the city.
impl Searchable for ConcertRecord {
  fn search_fields(&self) -> Vec<&str> {
    vec![
      self.primary_name(),
      self.venue_name.as_str(),
      self.festival_name.as_str(),
      self.city.as_str(),
    ]
  }
}

/// True when any field contains `query`, ignoring case. A blank query
/// matches everything.
pub fn matches(fields: &[&str], query: &str) -> bool {
  let needle = query.trim().to_lowercase();
  if needle.is_empty() {
    return true;
  }
  fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Keep the items whose search fields match `query`, preserving order.
pub fn search<I>(items: I, query: &str) -> Vec<I::Item>
where
  I: IntoIterator,
  I::Item: Searchable,
{
  items
    .into_iter()
    .filter(|item| matches(&item.search_fields(), query))
    .collect()
}
