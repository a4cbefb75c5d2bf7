//! An in-process [`ConcertStore`] for tests and previews.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  draft::ConcertDraft,
  photo::{NewPhoto, PhotoRecord},
  record::ConcertRecord,
  store::{ConcertStore, DataStats},
};

/// A store that keeps every record in memory, in insertion order.
///
/// Nothing is persisted; dropping the store drops the data.
#[derive(Debug, Default)]
pub struct MemoryStore {
  concerts: RwLock<Vec<ConcertRecord>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `drafts`, in order.
  pub fn with_drafts(drafts: impl IntoIterator<Item = ConcertDraft>) -> Self {
    let concerts = drafts
      .into_iter()
      .map(|d| d.into_record(Uuid::new_v4()))
      .collect();
    Self { concerts: RwLock::new(concerts) }
  }

  fn read(&self) -> RwLockReadGuard<'_, Vec<ConcertRecord>> {
    self.concerts.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, Vec<ConcertRecord>> {
    self.concerts.write().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ConcertStore for MemoryStore {
  type Error = Error;

  async fn create(&self, draft: ConcertDraft) -> Result<ConcertRecord> {
    let record = draft.into_record(Uuid::new_v4());
    self.write().push(record.clone());
    Ok(record)
  }

  async fn update(&self, id: Uuid, draft: ConcertDraft) -> Result<ConcertRecord> {
    let mut concerts = self.write();
    let slot = concerts
      .iter_mut()
      .find(|c| c.concert_id == id)
      .ok_or(Error::ConcertNotFound(id))?;

    let mut record = draft.into_record(id);
    record.photos = std::mem::take(&mut slot.photos);
    record.sort_children();
    *slot = record.clone();
    Ok(record)
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let mut concerts = self.write();
    let before = concerts.len();
    concerts.retain(|c| c.concert_id != id);
    if concerts.len() == before {
      return Err(Error::ConcertNotFound(id));
    }
    Ok(())
  }

  async fn get(&self, id: Uuid) -> Result<Option<ConcertRecord>> {
    Ok(self.read().iter().find(|c| c.concert_id == id).cloned())
  }

  async fn fetch_all(&self) -> Result<Vec<ConcertRecord>> {
    let mut all = self.read().clone();
    // Stable: equal dates keep insertion order.
    all.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(all)
  }

  async fn add_photo(&self, concert_id: Uuid, photo: NewPhoto) -> Result<PhotoRecord> {
    let mut concerts = self.write();
    let concert = concerts
      .iter_mut()
      .find(|c| c.concert_id == concert_id)
      .ok_or(Error::ConcertNotFound(concert_id))?;

    let record = PhotoRecord {
      photo_id: Uuid::new_v4(),
      concert_id,
      asset_id: photo.asset_id,
      date_added: Utc::now(),
      is_video: photo.is_video,
    };
    concert.photos.push(record.clone());
    concert.sort_children();
    Ok(record)
  }

  async fn remove_photo(&self, photo_id: Uuid) -> Result<()> {
    let mut concerts = self.write();
    for concert in concerts.iter_mut() {
      if let Some(pos) = concert.photos.iter().position(|p| p.photo_id == photo_id) {
        concert.photos.remove(pos);
        return Ok(());
      }
    }
    Err(Error::PhotoNotFound(photo_id))
  }

  async fn data_stats(&self) -> Result<DataStats> {
    let concerts = self.read();
    Ok(DataStats {
      concerts: concerts.len(),
      artists:  concerts.iter().map(|c| c.artists.len()).sum(),
      photos:   concerts.iter().map(|c| c.photos.len()).sum(),
    })
  }

  async fn clear_photos(&self) -> Result<()> {
    for concert in self.write().iter_mut() {
      concert.photos.clear();
    }
    Ok(())
  }

  async fn clear_all(&self) -> Result<()> {
    self.write().clear();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn show(d: NaiveDate, venue: &str, artist: &str) -> ConcertDraft {
    ConcertDraft::standard(d, venue).with_artist(artist, true)
  }

  #[tokio::test]
  async fn create_then_get() {
    let s = MemoryStore::new();
    let created = s.create(show(date(2023, 4, 1), "Metro", "Alvvays")).await.unwrap();
    let fetched = s.get(created.concert_id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert!(s.get(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn fetch_all_is_newest_first() {
    let s = MemoryStore::new();
    s.create(show(date(2021, 1, 1), "A", "One")).await.unwrap();
    s.create(show(date(2023, 1, 1), "B", "Two")).await.unwrap();
    s.create(show(date(2022, 1, 1), "C", "Three")).await.unwrap();

    let years: Vec<_> = s
      .fetch_all()
      .await
      .unwrap()
      .iter()
      .map(|c| c.year())
      .collect();
    assert_eq!(years, [2023, 2022, 2021]);
  }

  #[tokio::test]
  async fn update_replaces_artists_and_keeps_photos() {
    let s = MemoryStore::new();
    let created = s.create(show(date(2023, 4, 1), "Metro", "Alvvays")).await.unwrap();
    let old_artist_id = created.artists[0].artist_id;
    s.add_photo(created.concert_id, NewPhoto::image("a1")).await.unwrap();

    let updated = s
      .update(
        created.concert_id,
        show(date(2023, 4, 2), "Thalia Hall", "Alvvays").with_artist("Slow Pulp", false),
      )
      .await
      .unwrap();

    assert_eq!(updated.venue_name, "Thalia Hall");
    assert_eq!(updated.artists.len(), 2);
    assert_ne!(updated.artists[0].artist_id, old_artist_id);
    assert_eq!(updated.photos.len(), 1);
    assert_eq!(s.get(created.concert_id).await.unwrap().unwrap(), updated);
  }

  #[tokio::test]
  async fn update_and_delete_unknown_ids_fail() {
    let s = MemoryStore::new();
    let id = Uuid::new_v4();
    assert!(matches!(
      s.update(id, show(date(2023, 1, 1), "X", "Y")).await,
      Err(Error::ConcertNotFound(missing)) if missing == id
    ));
    assert!(matches!(s.delete(id).await, Err(Error::ConcertNotFound(_))));
    assert!(matches!(s.remove_photo(id).await, Err(Error::PhotoNotFound(_))));
    assert!(matches!(
      s.add_photo(id, NewPhoto::image("x")).await,
      Err(Error::ConcertNotFound(_))
    ));
  }

  #[tokio::test]
  async fn delete_cascades_and_stats_follow() {
    let s = MemoryStore::with_drafts([
      show(date(2023, 1, 1), "A", "One").with_artist("Two", false),
      show(date(2023, 2, 1), "B", "Three"),
    ]);
    let all = s.fetch_all().await.unwrap();
    s.add_photo(all[0].concert_id, NewPhoto::video("v")).await.unwrap();

    assert_eq!(
      s.data_stats().await.unwrap(),
      DataStats { concerts: 2, artists: 3, photos: 1 }
    );

    s.delete(all[0].concert_id).await.unwrap();
    assert_eq!(
      s.data_stats().await.unwrap(),
      DataStats { concerts: 1, artists: 2, photos: 0 }
    );
  }

  #[tokio::test]
  async fn clear_operations() {
    let s = MemoryStore::new();
    let c = s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap();
    let p = s.add_photo(c.concert_id, NewPhoto::image("a")).await.unwrap();
    assert_eq!(p.concert_id, c.concert_id);

    s.clear_photos().await.unwrap();
    let stats = s.data_stats().await.unwrap();
    assert_eq!((stats.concerts, stats.photos), (1, 0));

    s.clear_all().await.unwrap();
    assert_eq!(s.data_stats().await.unwrap(), DataStats::default());
  }
}
