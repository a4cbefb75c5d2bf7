//! Export codecs for Encore: a CSV table and a paginated fixed-width
//! document.
//!
//! Both formats share the same rows: one per (concert, artist) pair, or one
//! per concert with an empty bill, newest concert first. Pure synchronous;
//! writing the output anywhere is the caller's business.
//!
//! # Quick start
//!
//! ```no_run
//! use encore_export::{TableLayout, to_csv, to_table};
//!
//! # let records: Vec<encore_core::record::ConcertRecord> = vec![];
//! let csv = to_csv(&records);
//! let doc = to_table(&records, &TableLayout::default());
//! println!("{csv}\n{} pages", doc.pages.len());
//! ```

mod csv;
mod row;
mod table;

use chrono::NaiveDate;

pub use csv::{CSV_HEADER, escape_field, to_csv};
pub use row::{ExportRow, export_rows};
pub use table::{TableDocument, TableLayout, TablePage, to_table};

/// Default download name for an export, e.g. `my_concerts_2024-05-17.csv`.
pub fn export_file_name(extension: &str, today: NaiveDate) -> String {
  format!("my_concerts_{}.{extension}", today.format("%Y-%m-%d"))
}

#[cfg(test)]
pub(crate) mod fixtures {
  use chrono::NaiveDate;
  use encore_core::{draft::ConcertDraft, record::ConcertRecord};
  use uuid::Uuid;

  pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  pub fn records() -> Vec<ConcertRecord> {
    let mut show = ConcertDraft::standard(date(2023, 4, 14), "Metro")
      .in_city("Chicago", "IL")
      .with_artist("Squirrel Flower", false)
      .with_artist("Big Thief", true);
    show.description = "Loud, \"great\" night".into();
    show.friend_tags = "Sam,  Jo".into();
    show.setlist_url = "https://www.setlist.fm/setlist/big-thief".into();

    let fest = ConcertDraft::festival(date(2024, 7, 1), "Pitchfork")
      .in_city("Chicago", "IL")
      .with_artist("Bjork", true)
      .with_granularity(encore_core::record::DateGranularity::Month);

    // Stored without a bill, as legacy records can be.
    let bare = ConcertDraft::standard(date(2019, 1, 1), "Empty Bottle")
      .with_granularity(encore_core::record::DateGranularity::Year);

    vec![
      show.into_record(Uuid::new_v4()),
      fest.into_record(Uuid::new_v4()),
      bare.into_record(Uuid::new_v4()),
    ]
  }
}
