//! The SQLite implementation of [`ConcertStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};
use uuid::Uuid;

use encore_core::{
  draft::ConcertDraft,
  photo::{NewPhoto, PhotoRecord},
  record::{ArtistRecord, ConcertRecord},
  store::{ConcertStore, DataStats},
};

use crate::{
  Error, Result,
  encode::{
    ARTIST_SELECT, ArtistColumns, CONCERT_SELECT, ConcertColumns, PHOTO_SELECT,
    RawArtist, RawConcert, RawPhoto, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn insert_concert(conn: &rusqlite::Connection, c: &ConcertColumns) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO concerts (
       concert_id, date, date_granularity, kind, venue_name, festival_name,
       city, region, description, setlist_url, friend_tags
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    rusqlite::params![
      c.concert_id,
      c.date,
      c.granularity,
      c.kind,
      c.venue_name,
      c.festival_name,
      c.city,
      c.region,
      c.description,
      c.setlist_url,
      c.friend_tags,
    ],
  )?;
  Ok(())
}

fn insert_artists(conn: &rusqlite::Connection, artists: &[ArtistColumns]) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO artists (artist_id, concert_id, name, is_headliner)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for a in artists {
    stmt.execute(rusqlite::params![a.artist_id, a.concert_id, a.name, a.is_headliner])?;
  }
  Ok(())
}

/// Group child rows under their owning concert id.
fn by_concert<T>(rows: Vec<T>, key: impl Fn(&T) -> &str) -> HashMap<String, Vec<T>> {
  let mut map: HashMap<String, Vec<T>> = HashMap::new();
  for row in rows {
    map.entry(key(&row).to_owned()).or_default().push(row);
  }
  map
}

type RawRows = (Vec<RawConcert>, Vec<RawArtist>, Vec<RawPhoto>);

fn assemble((concerts, artists, photos): RawRows) -> Result<Vec<ConcertRecord>> {
  let mut artists = by_concert(artists, |a| a.concert_id.as_str());
  let mut photos = by_concert(photos, |p| p.concert_id.as_str());

  concerts
    .into_iter()
    .map(|raw| {
      let artists = artists
        .remove(&raw.concert_id)
        .unwrap_or_default()
        .into_iter()
        .map(RawArtist::into_artist)
        .collect::<Result<Vec<ArtistRecord>>>()?;
      let photos = photos
        .remove(&raw.concert_id)
        .unwrap_or_default()
        .into_iter()
        .map(RawPhoto::into_photo)
        .collect::<Result<Vec<PhotoRecord>>>()?;
      raw.into_record(artists, photos)
    })
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Encore record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened concert store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read one concert by id, or every concert newest first, with children.
  async fn load(&self, id: Option<Uuid>) -> Result<Vec<ConcertRecord>> {
    let id_str = id.map(encode_uuid);

    let raws: RawRows = self
      .conn
      .call(move |conn| {
        let (concerts, artists, photos) = match id_str {
          Some(id) => {
            let mut stmt =
              conn.prepare(&format!("{CONCERT_SELECT} WHERE concert_id = ?1"))?;
            let concerts = stmt
              .query_map(rusqlite::params![id], RawConcert::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            let mut stmt =
              conn.prepare(&format!("{ARTIST_SELECT} WHERE concert_id = ?1"))?;
            let artists = stmt
              .query_map(rusqlite::params![id], RawArtist::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            let mut stmt =
              conn.prepare(&format!("{PHOTO_SELECT} WHERE concert_id = ?1"))?;
            let photos = stmt
              .query_map(rusqlite::params![id], RawPhoto::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            (concerts, artists, photos)
          }
          None => {
            // rowid breaks date ties in insertion order.
            let mut stmt =
              conn.prepare(&format!("{CONCERT_SELECT} ORDER BY date DESC, rowid ASC"))?;
            let concerts = stmt
              .query_map([], RawConcert::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            let mut stmt = conn.prepare(ARTIST_SELECT)?;
            let artists = stmt
              .query_map([], RawArtist::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            let mut stmt = conn.prepare(PHOTO_SELECT)?;
            let photos = stmt
              .query_map([], RawPhoto::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            (concerts, artists, photos)
          }
        };
        Ok((concerts, artists, photos))
      })
      .await?;

    assemble(raws)
  }
}

// ─── ConcertStore impl ───────────────────────────────────────────────────────

impl ConcertStore for SqliteStore {
  type Error = Error;

  // ── Concerts ──────────────────────────────────────────────────────────────

  async fn create(&self, draft: ConcertDraft) -> Result<ConcertRecord> {
    let record = draft.into_record(Uuid::new_v4());

    let concert = ConcertColumns::of(&record);
    let artists: Vec<_> = record.artists.iter().map(ArtistColumns::of).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_concert(&tx, &concert)?;
        insert_artists(&tx, &artists)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(concert_id = %record.concert_id, artists = record.artists.len(), "created concert");
    Ok(record)
  }

  async fn update(&self, id: Uuid, draft: ConcertDraft) -> Result<ConcertRecord> {
    let record = draft.into_record(id);

    let concert = ConcertColumns::of(&record);
    let artists: Vec<_> = record.artists.iter().map(ArtistColumns::of).collect();

    let found: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let c = &concert;
        let changed = tx.execute(
          "UPDATE concerts SET
             date = ?2, date_granularity = ?3, kind = ?4, venue_name = ?5,
             festival_name = ?6, city = ?7, region = ?8, description = ?9,
             setlist_url = ?10, friend_tags = ?11
           WHERE concert_id = ?1",
          rusqlite::params![
            c.concert_id,
            c.date,
            c.granularity,
            c.kind,
            c.venue_name,
            c.festival_name,
            c.city,
            c.region,
            c.description,
            c.setlist_url,
            c.friend_tags,
          ],
        )?;
        if changed == 0 {
          return Ok(false);
        }

        // The bill is replaced wholesale; photos are untouched.
        tx.execute(
          "DELETE FROM artists WHERE concert_id = ?1",
          rusqlite::params![c.concert_id],
        )?;
        insert_artists(&tx, &artists)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::ConcertNotFound(id));
    }
    debug!(concert_id = %id, "updated concert");

    self.get(id).await?.ok_or(Error::ConcertNotFound(id))
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        // Artists and photos go with it via ON DELETE CASCADE.
        Ok(conn.execute(
          "DELETE FROM concerts WHERE concert_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::ConcertNotFound(id));
    }
    debug!(concert_id = %id, "deleted concert");
    Ok(())
  }

  async fn get(&self, id: Uuid) -> Result<Option<ConcertRecord>> {
    Ok(self.load(Some(id)).await?.into_iter().next())
  }

  async fn fetch_all(&self) -> Result<Vec<ConcertRecord>> { self.load(None).await }

  // ── Photos ────────────────────────────────────────────────────────────────

  async fn add_photo(&self, concert_id: Uuid, photo: NewPhoto) -> Result<PhotoRecord> {
    let record = PhotoRecord {
      photo_id: Uuid::new_v4(),
      concert_id,
      asset_id: photo.asset_id,
      date_added: Utc::now(),
      is_video: photo.is_video,
    };

    let photo_id_str   = encode_uuid(record.photo_id);
    let concert_id_str = encode_uuid(concert_id);
    let asset_id       = record.asset_id.clone();
    let added_str      = encode_dt(record.date_added);
    let is_video       = record.is_video;

    let found: bool = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM concerts WHERE concert_id = ?1",
            rusqlite::params![concert_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO photos (photo_id, concert_id, asset_id, date_added, is_video)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![photo_id_str, concert_id_str, asset_id, added_str, is_video],
        )?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::ConcertNotFound(concert_id));
    }
    debug!(%concert_id, photo_id = %record.photo_id, "attached photo");
    Ok(record)
  }

  async fn remove_photo(&self, photo_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(photo_id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM photos WHERE photo_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::PhotoNotFound(photo_id));
    }
    debug!(%photo_id, "removed photo");
    Ok(())
  }

  // ── Diagnostics ───────────────────────────────────────────────────────────

  async fn data_stats(&self) -> Result<DataStats> {
    let (concerts, artists, photos): (i64, i64, i64) = self
      .conn
      .call(|conn| {
        let count = |table: &str| -> rusqlite::Result<i64> {
          conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        };
        Ok((count("concerts")?, count("artists")?, count("photos")?))
      })
      .await?;

    Ok(DataStats {
      concerts: concerts as usize,
      artists:  artists as usize,
      photos:   photos as usize,
    })
  }

  async fn clear_photos(&self) -> Result<()> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM photos", [])?))
      .await?;
    info!(removed, "cleared photo references");
    Ok(())
  }

  async fn clear_all(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM photos;
           DELETE FROM artists;
           DELETE FROM concerts;",
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    info!("cleared all concerts");
    Ok(())
  }
}
