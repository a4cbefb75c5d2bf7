//! Paginated fixed-width table export.
//!
//! Rows are laid out on a character grid with fixed column widths. A new page
//! starts, with the column header repeated, once the current page cannot fit
//! another row plus its closing rule.

use encore_core::record::ConcertRecord;
use serde::{Deserialize, Serialize};

use crate::row::export_rows;

const HEADERS: [&str; 11] = [
  "Date", "Type", "Festival", "Venue", "Artist", "Role", "City", "State", "Desc",
  "Friends", "URL",
];

/// Column widths in characters, in [`HEADERS`] order.
const WIDTHS: [usize; 11] = [14, 8, 12, 16, 16, 9, 12, 5, 16, 12, 16];

/// Long free-text columns are shortened before clipping.
const FREE_TEXT_LIMIT: usize = 30;

/// Title (2 lines) + rule, header, rule, one row, closing rule.
const MIN_LINES_PER_PAGE: usize = 7;

/// Page geometry for [`to_table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
  /// Lines available per page; values below the minimum that fits one row
  /// are raised to it.
  pub lines_per_page: usize,
}

impl Default for TableLayout {
  fn default() -> Self { Self { lines_per_page: 60 } }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TablePage {
  pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDocument {
  pub title: String,
  pub pages: Vec<TablePage>,
}

impl TableDocument {
  /// Render every page, separating pages with a form feed.
  pub fn render(&self) -> String {
    let mut out = self
      .pages
      .iter()
      .map(|p| p.lines.join("\n"))
      .collect::<Vec<_>>()
      .join("\n\x0c\n");
    out.push('\n');
    out
  }
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
fn truncate_text(text: &str, max: usize) -> String {
  if text.chars().count() > max {
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
  } else {
    text.to_owned()
  }
}

fn clip(text: &str, width: usize) -> String { text.chars().take(width).collect() }

fn rule() -> String {
  let mut line = String::from("+");
  for w in WIDTHS {
    line.push_str(&"-".repeat(w + 2));
    line.push('+');
  }
  line
}

fn grid_line(cells: &[&str]) -> String {
  let mut line = String::from("|");
  for (cell, w) in cells.iter().zip(WIDTHS) {
    line.push_str(&format!(" {:<w$} |", clip(cell, w)));
  }
  line
}

fn header_block() -> [String; 3] { [rule(), grid_line(&HEADERS), rule()] }

/// Lay out `records` as a paginated grid document.
pub fn to_table(records: &[ConcertRecord], layout: &TableLayout) -> TableDocument {
  let capacity = layout.lines_per_page.max(MIN_LINES_PER_PAGE);
  let count = records.len();
  let title = format!(
    "My Concert History: {count} Concert{}",
    if count == 1 { "" } else { "s" }
  );

  let mut pages = Vec::new();
  let mut current = TablePage::default();
  current.lines.push(title.clone());
  current.lines.push(String::new());
  current.lines.extend(header_block());

  for row in export_rows(records) {
    // Leave room for this row and the closing rule.
    if current.lines.len() + 2 > capacity {
      current.lines.push(rule());
      pages.push(std::mem::take(&mut current));
      current.lines.extend(header_block());
    }

    let mut cells = row.fields();
    let description = truncate_text(cells[8], FREE_TEXT_LIMIT);
    let setlist_url = truncate_text(cells[10], FREE_TEXT_LIMIT);
    cells[8] = &description;
    cells[10] = &setlist_url;
    current.lines.push(grid_line(&cells));
  }

  current.lines.push(rule());
  pages.push(current);

  TableDocument { title, pages }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::records;

  fn data_rows(page: &TablePage) -> usize {
    // Every `|` line except the header row.
    page.lines.iter().filter(|l| l.starts_with('|')).count() - 1
  }

  #[test]
  fn truncation() {
    assert_eq!(truncate_text("short", 30), "short");
    let long = "a".repeat(31);
    let cut = truncate_text(&long, 30);
    assert_eq!(cut.chars().count(), 30);
    assert!(cut.ends_with("..."));
    assert_eq!(clip("héllo", 2), "hé");
  }

  #[test]
  fn single_page_document() {
    let doc = to_table(&records(), &TableLayout::default());
    assert_eq!(doc.title, "My Concert History: 3 Concerts");
    assert_eq!(doc.pages.len(), 1);

    let page = &doc.pages[0];
    assert_eq!(page.lines[0], doc.title);
    assert!(page.lines[3].contains("| Date "));
    assert_eq!(data_rows(page), 4);

    // Every grid line has the same width.
    let width = page.lines[2].chars().count();
    assert!(page.lines[2..].iter().all(|l| l.chars().count() == width));
  }

  #[test]
  fn paginates_when_page_is_full() {
    let doc = to_table(&records(), &TableLayout { lines_per_page: 8 });
    assert_eq!(doc.pages.len(), 2);
    assert!(doc.pages.iter().all(|p| p.lines.len() <= 8));
    assert_eq!(data_rows(&doc.pages[0]) + data_rows(&doc.pages[1]), 4);
    // Continuation pages repeat the header but not the title.
    assert!(doc.pages[1].lines[1].contains("| Date "));
    assert_ne!(doc.pages[1].lines[0], doc.title);
  }

  #[test]
  fn tiny_pages_still_fit_one_row() {
    let doc = to_table(&records(), &TableLayout { lines_per_page: 1 });
    assert!(doc.pages.iter().all(|p| data_rows(p) >= 1));
  }

  #[test]
  fn empty_snapshot_renders_header_only() {
    let doc = to_table(&[], &TableLayout::default());
    assert_eq!(doc.title, "My Concert History: 0 Concerts");
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(data_rows(&doc.pages[0]), 0);
    assert!(!doc.render().contains('\x0c'));
  }

  #[test]
  fn render_separates_pages_with_form_feed() {
    let doc = to_table(&records(), &TableLayout { lines_per_page: 8 });
    assert_eq!(doc.render().matches('\x0c').count(), 1);
  }
}
