//! Plain-text rendering of records and views, one `String` per output line.

use encore_core::{
  record::{ConcertRecord, format_date},
  store::DataStats,
};
use encore_insights::{
  ArtistCount, ArtistHistory, CityCount, CityHistory, FestivalGroup, Summary, VenueCount,
  VenueHistory,
};

fn place(city: &str, region: &str) -> String {
  match (city.is_empty(), region.is_empty()) {
    (false, false) => format!("{city}, {region}"),
    (false, true) => city.to_owned(),
    (true, false) => region.to_owned(),
    (true, true) => String::new(),
  }
}

fn or_none(lines: Vec<String>, what: &str) -> Vec<String> {
  if lines.is_empty() { vec![format!("No {what} found.")] } else { lines }
}

/// Where a record took place: the festival or the venue.
fn setting(c: &ConcertRecord) -> &str {
  if c.is_festival() { c.festival_display_name() } else { &c.venue_name }
}

// ─── Concerts ────────────────────────────────────────────────────────────────

/// One list row: id, date, primary name, venue or festival, location.
pub fn concert_line(c: &ConcertRecord) -> String {
  let mut line = format!(
    "{}  {:<14}  {}",
    c.concert_id,
    c.display_date(),
    c.primary_name()
  );
  if !c.is_festival() {
    line.push_str(&format!(" @ {}", c.venue_name));
  }
  let location = c.location();
  if !location.is_empty() {
    line.push_str(&format!(" ({location})"));
  }
  line
}

pub fn concert_list<'a>(records: impl IntoIterator<Item = &'a ConcertRecord>) -> Vec<String> {
  or_none(records.into_iter().map(concert_line).collect(), "concerts")
}

/// The full detail view of one record.
pub fn concert_detail(c: &ConcertRecord) -> Vec<String> {
  let mut lines = vec![
    format!("Concert   {}", c.concert_id),
    format!("Date      {}", c.display_date()),
    format!("Type      {}", c.kind.label()),
  ];
  if c.is_festival() {
    lines.push(format!("Festival  {}", c.festival_display_name()));
  } else {
    lines.push(format!("Venue     {}", c.venue_name));
  }
  let location = c.location();
  if !location.is_empty() {
    lines.push(format!("Location  {location}"));
  }

  lines.push("Artists".to_owned());
  if c.artists.is_empty() {
    lines.push("  (none)".to_owned());
  }
  for artist in &c.artists {
    lines.push(format!("  {} ({})", artist.name, c.role_of(artist)));
  }

  if let Some(description) = &c.description {
    lines.push(format!("Notes     {description}"));
  }
  if let Some(url) = &c.setlist_url {
    lines.push(format!("Setlist   {url}"));
  }
  if !c.friend_tags.is_empty() {
    lines.push(format!("Friends   {}", c.friend_tags.join(", ")));
  }

  if !c.photos.is_empty() {
    lines.push(format!("Photos    {}", c.photos.len()));
    for p in &c.photos {
      let kind = if p.is_video { "video" } else { "image" };
      lines.push(format!("  {}  {kind}  {}", p.photo_id, p.asset_id));
    }
  }
  lines
}

// ─── Grouped views ───────────────────────────────────────────────────────────

pub fn artist_counts(counts: &[ArtistCount]) -> Vec<String> {
  or_none(
    counts.iter().map(|a| format!("{:>4}  {}", a.count, a.name)).collect(),
    "artists",
  )
}

pub fn artist_directory(names: &[String]) -> Vec<String> {
  or_none(names.to_vec(), "artists")
}

pub fn venue_counts(counts: &[VenueCount]) -> Vec<String> {
  let lines = counts
    .iter()
    .map(|v| {
      let location = place(&v.venue.city, &v.venue.region);
      if location.is_empty() {
        format!("{:>4}  {}", v.count, v.venue.name)
      } else {
        format!("{:>4}  {} ({location})", v.count, v.venue.name)
      }
    })
    .collect();
  or_none(lines, "venues")
}

pub fn city_counts(counts: &[CityCount]) -> Vec<String> {
  or_none(
    counts
      .iter()
      .map(|c| format!("{:>4}  {}", c.count, place(&c.city.city, &c.city.region)))
      .collect(),
    "cities",
  )
}

pub fn festival_groups(groups: &[FestivalGroup<'_>]) -> Vec<String> {
  let lines = groups
    .iter()
    .map(|g| {
      let years: Vec<String> = g.attended.iter().map(|a| a.year.to_string()).collect();
      format!(
        "{:>4}  {}  [{}; {} artists]",
        g.attendance,
        g.name,
        years.join(", "),
        g.unique_artists
      )
    })
    .collect();
  or_none(lines, "festivals")
}

pub fn summary(s: &Summary) -> Vec<String> {
  vec![
    format!("Concerts        {}", s.total_concerts),
    format!("Festivals       {}", s.total_festivals),
    format!("Artists         {}", s.unique_artists),
    format!("Venues          {}", s.unique_venues),
    format!("Cities          {}", s.unique_cities),
    format!("This year       {}", s.concerts_this_year),
  ]
}

// ─── Histories ───────────────────────────────────────────────────────────────

pub fn artist_history(h: &ArtistHistory<'_>) -> Vec<String> {
  let mut lines = vec![
    h.name.clone(),
    format!(
      "Seen {} times: {} headlining, {} opening, {} at festivals",
      h.appearances.len(),
      h.headliner_count,
      h.opener_count,
      h.festival_count
    ),
  ];
  for a in &h.appearances {
    lines.push(format!(
      "  {:<14}  {:<9}  {}",
      format_date(a.concert.date, a.concert.granularity),
      a.role.to_string(),
      setting(a.concert)
    ));
  }
  lines
}

pub fn venue_history(h: &VenueHistory<'_>) -> Vec<String> {
  let mut lines = vec![
    match place(&h.venue.city, &h.venue.region).as_str() {
      "" => h.venue.name.clone(),
      location => format!("{} ({location})", h.venue.name),
    },
    format!("{} shows, {} artists", h.concerts.len(), h.unique_artists),
  ];
  lines.extend(h.concerts.iter().map(|c| format!("  {}", concert_line(c))));
  lines
}

pub fn city_history(h: &CityHistory<'_>) -> Vec<String> {
  let mut lines = vec![
    place(&h.city.city, &h.city.region),
    format!(
      "{} concerts, {} venues, {} festivals",
      h.concerts.len(),
      h.unique_venues,
      h.festival_count
    ),
  ];
  lines.extend(h.concerts.iter().map(|c| format!("  {}", concert_line(c))));
  lines
}

pub fn data_stats(s: &DataStats) -> Vec<String> {
  vec![
    format!("Concerts  {}", s.concerts),
    format!("Artists   {}", s.artists),
    format!("Photos    {}", s.photos),
  ]
}
