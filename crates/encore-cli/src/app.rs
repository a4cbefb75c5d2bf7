//! Command dispatch over any [`ConcertStore`].
//!
//! Every command reads a fresh snapshot from the store and derives its view
//! from it; nothing is cached between commands.

use std::{io::Write, path::PathBuf};

use anyhow::{Context as _, anyhow, bail};
use chrono::{Local, NaiveDate};
use encore_core::{
  draft::ConcertDraft,
  photo::{NewPhoto, unseen_assets},
  record::{ConcertRecord, cmp_case_insensitive, name_key},
  store::ConcertStore,
};
use encore_export::{TableLayout, export_file_name, to_csv, to_table};
use encore_insights::{
  CityKey, ConcertFilter, Summary, VenueKey, artist_counts, artist_directory, artist_history,
  city_counts, city_history, concerts_in_year, festival_groups, filter_concerts, search,
  venue_counts, venue_history,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
  cli::{Command, ConcertArgs, ExportFormat, PhotoCommand},
  render,
};

pub struct App<S, W> {
  store:  S,
  out:    W,
  json:   bool,
  today:  NaiveDate,
  layout: TableLayout,
}

impl<S, W> App<S, W>
where
  S: ConcertStore,
  W: Write,
{
  pub fn new(store: S, out: W) -> Self {
    Self {
      store,
      out,
      json: false,
      today: Local::now().date_naive(),
      layout: TableLayout::default(),
    }
  }

  pub fn with_json(mut self, json: bool) -> Self {
    self.json = json;
    self
  }

  /// Evaluate year-relative views against `today` instead of the clock.
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn with_layout(mut self, layout: TableLayout) -> Self {
    self.layout = layout;
    self
  }

  pub async fn run(&mut self, command: Command) -> anyhow::Result<()> {
    debug!(?command, "running command");
    match command {
      Command::Add(args) => self.add(args).await,
      Command::Edit { id, args } => self.edit(id, args).await,
      Command::Delete { id } => {
        self.store.delete(id).await?;
        self.say(format!("Deleted {id}"))
      }
      Command::Show { id } => {
        let record = self.require(id).await?;
        self.emit(&record, render::concert_detail(&record))
      }
      Command::List { festivals, concerts, search } => {
        let filter = if festivals {
          ConcertFilter::FestivalsOnly
        } else if concerts {
          ConcertFilter::ConcertsOnly
        } else {
          ConcertFilter::All
        };
        let records = self.snapshot().await?;
        let rows = filter_concerts(&records, filter, search.as_deref().unwrap_or_default());
        self.emit(&rows, render::concert_list(rows.iter().copied()))
      }
      Command::Artists { alphabetical: true, filter } => {
        let records = self.snapshot().await?;
        let names = search(artist_directory(&records), filter.query());
        self.emit(&names, render::artist_directory(&names))
      }
      Command::Artists { alphabetical: false, filter } => {
        let records = self.snapshot().await?;
        let rows = search(artist_counts(&records), filter.query());
        self.emit(&rows, render::artist_counts(&rows))
      }
      Command::Venues(args) => {
        let records = self.snapshot().await?;
        let rows = search(venue_counts(&records), args.query());
        self.emit(&rows, render::venue_counts(&rows))
      }
      Command::Cities(args) => {
        let records = self.snapshot().await?;
        let rows = search(city_counts(&records), args.query());
        self.emit(&rows, render::city_counts(&rows))
      }
      Command::Festivals(args) => {
        let records = self.snapshot().await?;
        let rows = search(festival_groups(&records), args.query());
        self.emit(&rows, render::festival_groups(&rows))
      }
      Command::ThisYear(args) => {
        let records = self.snapshot().await?;
        let rows = search(concerts_in_year(&records, self.today), args.query());
        self.emit(&rows, render::concert_list(rows.iter().copied()))
      }
      Command::Summary => {
        let records = self.snapshot().await?;
        let summary = Summary::compute(&records, self.today);
        self.emit(&summary, render::summary(&summary))
      }
      Command::Artist { name } => {
        let records = self.snapshot().await?;
        let history = artist_history(&records, &name);
        if history.appearances.is_empty() {
          bail!("no concerts featuring {name:?}");
        }
        self.emit(&history, render::artist_history(&history))
      }
      Command::Venue { name, city, region } => {
        let records = self.snapshot().await?;
        let key = resolve_venue(&records, &name, city.as_deref(), region.as_deref())?;
        let history = venue_history(&records, &key);
        self.emit(&history, render::venue_history(&history))
      }
      Command::City { city, region } => {
        let records = self.snapshot().await?;
        let key = resolve_city(&records, &city, region.as_deref())?;
        let history = city_history(&records, &key);
        self.emit(&history, render::city_history(&history))
      }
      Command::Photo(photo) => self.photo(photo).await,
      Command::Export { format, out } => self.export(format, out).await,
      Command::Diagnostics => {
        let stats = self.store.data_stats().await?;
        self.emit(&stats, render::data_stats(&stats))
      }
      Command::Reset { photos_only, yes } => {
        if !yes {
          bail!("reset deletes stored data; pass --yes to confirm");
        }
        if photos_only {
          self.store.clear_photos().await?;
          self.say("Removed every photo reference")
        } else {
          self.store.clear_all().await?;
          self.say("Removed every concert")
        }
      }
    }
  }

  // ─── Writes ────────────────────────────────────────────────────────────────

  async fn add(&mut self, args: ConcertArgs) -> anyhow::Result<()> {
    let draft = args.into_draft()?;
    draft.validate()?;
    let record = self.store.create(draft).await?;
    self.say(format!("Added {}", render::concert_line(&record)))
  }

  async fn edit(&mut self, id: Uuid, args: ConcertArgs) -> anyhow::Result<()> {
    let existing = self.require(id).await?;
    let mut draft = ConcertDraft::from(&existing);
    args.apply_to(&mut draft)?;
    draft.validate()?;
    let record = self.store.update(id, draft).await?;
    self.say(format!("Updated {}", render::concert_line(&record)))
  }

  async fn photo(&mut self, command: PhotoCommand) -> anyhow::Result<()> {
    match command {
      PhotoCommand::Add { concert_id, asset_id, video } => {
        let concert = self.require(concert_id).await?;
        let photo = NewPhoto { asset_id, is_video: video };
        let Some(photo) = unseen_assets(&concert, vec![photo]).pop() else {
          return self.say("That asset is already attached");
        };
        let record = self.store.add_photo(concert_id, photo).await?;
        self.say(format!("Attached photo {}", record.photo_id))
      }
      PhotoCommand::Remove { photo_id } => {
        self.store.remove_photo(photo_id).await?;
        self.say(format!("Removed photo {photo_id}"))
      }
    }
  }

  // ─── Export ────────────────────────────────────────────────────────────────

  async fn export(&mut self, format: ExportFormat, out: Option<PathBuf>) -> anyhow::Result<()> {
    let records = self.snapshot().await?;
    let content = match format {
      ExportFormat::Csv => to_csv(&records),
      ExportFormat::Table => to_table(&records, &self.layout).render(),
    };

    let Some(mut path) = out else {
      self.out.write_all(content.as_bytes())?;
      return Ok(());
    };
    if path.is_dir() {
      path.push(export_file_name(format.extension(), self.today));
    }
    std::fs::write(&path, content)
      .with_context(|| format!("failed to write {}", path.display()))?;
    self.say(format!(
      "Exported {} concerts to {}",
      records.len(),
      path.display()
    ))
  }

  // ─── Helpers ───────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> anyhow::Result<Vec<ConcertRecord>> {
    Ok(self.store.fetch_all().await?)
  }

  async fn require(&self, id: Uuid) -> anyhow::Result<ConcertRecord> {
    self
      .store
      .get(id)
      .await?
      .ok_or_else(|| anyhow!("no concert with id {id}"))
  }

  fn say(&mut self, line: impl AsRef<str>) -> anyhow::Result<()> {
    writeln!(self.out, "{}", line.as_ref())?;
    Ok(())
  }

  /// Write `value` as JSON, or `lines` as text.
  fn emit<T: Serialize + ?Sized>(&mut self, value: &T, lines: Vec<String>) -> anyhow::Result<()> {
    if self.json {
      serde_json::to_writer_pretty(&mut self.out, value)?;
      writeln!(self.out)?;
    } else {
      for line in lines {
        writeln!(self.out, "{line}")?;
      }
    }
    Ok(())
  }
}

/// Find the venue the user meant: name matched ignoring case, optionally
/// narrowed by city and region. The busiest match wins.
fn resolve_venue(
  records: &[ConcertRecord],
  name: &str,
  city: Option<&str>,
  region: Option<&str>,
) -> anyhow::Result<VenueKey> {
  let same = |a: &str, b: Option<&str>| b.is_none_or(|b| name_key(a) == name_key(b));
  venue_counts(records)
    .into_iter()
    .map(|v| v.venue)
    .find(|v| {
      name_key(&v.name) == name_key(name) && same(&v.city, city) && same(&v.region, region)
    })
    .ok_or_else(|| anyhow!("no venue named {name:?}"))
}

fn resolve_city(
  records: &[ConcertRecord],
  city: &str,
  region: Option<&str>,
) -> anyhow::Result<CityKey> {
  let mut keys: Vec<CityKey> = city_counts(records)
    .into_iter()
    .map(|c| c.city)
    .filter(|k| name_key(&k.city) == name_key(city))
    .filter(|k| region.is_none_or(|r| name_key(&k.region) == name_key(r)))
    .collect();
  if keys.len() > 1 && region.is_none() {
    keys.sort_by(|a, b| cmp_case_insensitive(&a.region, &b.region));
    let regions: Vec<&str> = keys.iter().map(|k| k.region.as_str()).collect();
    bail!("{city:?} is in several regions ({}); pass --region", regions.join(", "));
  }
  keys.into_iter().next().ok_or_else(|| anyhow!("no city named {city:?}"))
}
