//! Comma-separated export.

use encore_core::record::ConcertRecord;

use crate::row::export_rows;

pub const CSV_HEADER: &str = "Date,Type,Festival Name,Venue Name,Artist Name,Artist Role,City,State,Description,Friends,Setlist URL";

/// Quote `field` if it contains a comma, a double quote or a newline,
/// doubling any quotes inside.
pub fn escape_field(field: &str) -> String {
  if field.contains([',', '"', '\n']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_owned()
  }
}

/// Render `records` as CSV with a header line. Every line, the last
/// included, ends with `\n`.
pub fn to_csv(records: &[ConcertRecord]) -> String {
  let mut out = String::with_capacity(CSV_HEADER.len() + 1);
  out.push_str(CSV_HEADER);
  out.push('\n');

  for row in export_rows(records) {
    let line = row
      .fields()
      .iter()
      .map(|f| escape_field(f))
      .collect::<Vec<_>>()
      .join(",");
    out.push_str(&line);
    out.push('\n');
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::records;

  #[test]
  fn escaping_rules() {
    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field(""), "");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
  }

  #[test]
  fn empty_snapshot_is_header_only() {
    assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
  }

  #[test]
  fn full_export() {
    let csv = to_csv(&records());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
      lines[1],
      "July 2024,Festival,Pitchfork,,Bjork,Festival,Chicago,IL,,,"
    );
    assert_eq!(
      lines[2],
      "2023-04-14,Standard,,Metro,Big Thief,Headliner,Chicago,IL,\
       \"Loud, \"\"great\"\" night\",\"Sam, Jo\",https://www.setlist.fm/setlist/big-thief"
    );
    assert_eq!(lines[4], "2019,Standard,,Empty Bottle,,,,,,,");
  }
}
