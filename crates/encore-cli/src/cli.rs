//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use encore_core::{
  draft::{ArtistDraft, ConcertDraft},
  record::{ConcertKind, parse_partial_date},
};
use uuid::Uuid;

// ─── Top level ───────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "encore", version, about = "A personal log of concerts and festivals")]
pub struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "encore.toml", global = true)]
  pub config: PathBuf,

  /// Path to the SQLite store; overrides the config file.
  #[arg(long, value_name = "PATH", env = "ENCORE_STORE", global = true)]
  pub store: Option<PathBuf>,

  /// Print views as JSON instead of text.
  #[arg(long, global = true)]
  pub json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Log a new concert or festival.
  Add(ConcertArgs),

  /// Change fields of a logged concert. Omitted fields keep their value;
  /// passing any artist replaces the whole bill.
  Edit {
    id:   Uuid,
    #[command(flatten)]
    args: ConcertArgs,
  },

  /// Delete a concert with its artists and photos.
  Delete { id: Uuid },

  /// Show one concert in full.
  Show { id: Uuid },

  /// List concerts, newest first.
  List {
    /// Only festivals.
    #[arg(long, conflicts_with = "concerts")]
    festivals: bool,
    /// Only standard concerts.
    #[arg(long)]
    concerts:  bool,
    #[arg(short, long)]
    search:    Option<String>,
  },

  /// Every artist seen, most seen first.
  Artists {
    /// List names A to Z instead of counting.
    #[arg(long)]
    alphabetical: bool,
    #[command(flatten)]
    filter:       SearchArgs,
  },
  /// Every venue visited, most visited first.
  Venues(SearchArgs),
  /// Every city, most visited first.
  Cities(SearchArgs),
  /// Festivals grouped across years.
  Festivals(SearchArgs),
  /// Concerts in the current calendar year.
  ThisYear(SearchArgs),

  /// Headline numbers.
  Summary,

  /// Every concert featuring one artist.
  Artist { name: String },

  /// Every show at one venue.
  Venue {
    name:   String,
    #[arg(long)]
    city:   Option<String>,
    #[arg(long)]
    region: Option<String>,
  },

  /// Everything seen in one city.
  City {
    city:   String,
    #[arg(long)]
    region: Option<String>,
  },

  /// Attach or detach photo references.
  #[command(subcommand)]
  Photo(PhotoCommand),

  /// Write the whole log as CSV or a paginated table.
  Export {
    format: ExportFormat,
    /// Output file or directory; stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    out:    Option<PathBuf>,
  },

  /// Row counts per table.
  Diagnostics,

  /// Delete stored data.
  Reset {
    /// Only remove photo references.
    #[arg(long)]
    photos_only: bool,
    /// Confirm the reset.
    #[arg(long)]
    yes:         bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommand {
  Add {
    concert_id: Uuid,
    asset_id:   String,
    #[arg(long)]
    video:      bool,
  },
  Remove { photo_id: Uuid },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
  Csv,
  Table,
}

impl ExportFormat {
  pub fn extension(self) -> &'static str {
    match self {
      Self::Csv => "csv",
      Self::Table => "txt",
    }
  }
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
  /// Case-insensitive substring filter.
  #[arg(short, long)]
  pub search: Option<String>,
}

impl SearchArgs {
  pub fn query(&self) -> &str { self.search.as_deref().unwrap_or_default() }
}

// ─── Concert fields ──────────────────────────────────────────────────────────

#[derive(Args, Debug, Default)]
pub struct ConcertArgs {
  /// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
  #[arg(long)]
  pub date:        Option<String>,
  /// Makes the record a festival with this name.
  #[arg(long)]
  pub festival:    Option<String>,
  /// `standard` or `festival`.
  #[arg(long)]
  pub kind:        Option<ConcertKind>,
  #[arg(long)]
  pub venue:       Option<String>,
  #[arg(long)]
  pub city:        Option<String>,
  /// State, province or region.
  #[arg(long)]
  pub region:      Option<String>,
  #[arg(long = "headliner", value_name = "NAME")]
  pub headliners:  Vec<String>,
  #[arg(long = "opener", value_name = "NAME")]
  pub openers:     Vec<String>,
  #[arg(long)]
  pub description: Option<String>,
  #[arg(long)]
  pub setlist:     Option<String>,
  /// Comma-separated.
  #[arg(long)]
  pub friends:     Option<String>,
}

impl ConcertArgs {
  /// A fresh draft for `add`. The date is required.
  pub fn into_draft(self) -> anyhow::Result<ConcertDraft> {
    let raw = self
      .date
      .as_deref()
      .context("--date is required when adding a concert")?;
    let (date, granularity) = parse_partial_date(raw)?;
    let mut draft =
      ConcertDraft::new(date, ConcertKind::Standard).with_granularity(granularity);
    self.apply_to(&mut draft)?;
    Ok(draft)
  }

  /// Overwrite the fields of `draft` that were given on the command line.
  pub fn apply_to(self, draft: &mut ConcertDraft) -> anyhow::Result<()> {
    if let Some(raw) = self.date.as_deref() {
      let (date, granularity) = parse_partial_date(raw)?;
      draft.date = date;
      draft.granularity = granularity;
    }
    if let Some(name) = self.festival {
      draft.festival_name = name;
      draft.kind = ConcertKind::Festival;
    }
    if let Some(kind) = self.kind {
      draft.kind = kind;
    }

    let set = |field: &mut String, value: Option<String>| {
      if let Some(v) = value {
        *field = v;
      }
    };
    set(&mut draft.venue_name, self.venue);
    set(&mut draft.city, self.city);
    set(&mut draft.region, self.region);
    set(&mut draft.description, self.description);
    set(&mut draft.setlist_url, self.setlist);
    set(&mut draft.friend_tags, self.friends);

    if !self.headliners.is_empty() || !self.openers.is_empty() {
      let headliners = self.headliners.into_iter().map(|name| ArtistDraft { name, is_headliner: true });
      let openers = self.openers.into_iter().map(|name| ArtistDraft { name, is_headliner: false });
      draft.artists = headliners.chain(openers).collect();
    }
    Ok(())
  }
}
