//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use encore_core::{
  draft::ConcertDraft,
  photo::NewPhoto,
  record::{ConcertKind, DateGranularity, UNKNOWN_VENUE},
  store::{ConcertStore, DataStats},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn show(d: NaiveDate, venue: &str, headliner: &str) -> ConcertDraft {
  ConcertDraft::standard(d, venue)
    .in_city("Chicago", "IL")
    .with_artist(headliner, true)
}

// ─── Concerts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trips_every_field() {
  let s = store().await;

  let mut draft = show(date(2023, 4, 14), "Metro", "Big Thief")
    .with_artist("Squirrel Flower", false)
    .with_granularity(DateGranularity::Exact);
  draft.description = "Loud night".into();
  draft.setlist_url = "https://setlist.fm/x".into();
  draft.friend_tags = "Sam, Jo".into();

  let created = s.create(draft).await.unwrap();
  let fetched = s.get(created.concert_id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.friend_tags, ["Sam", "Jo"]);
  assert_eq!(fetched.artists[0].name, "Big Thief");
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn partial_dates_and_festivals_persist() {
  let s = store().await;
  let draft = ConcertDraft::festival(date(2024, 7, 19), "Pitchfork")
    .with_granularity(DateGranularity::Month)
    .with_artist("Bjork", false);

  let created = s.create(draft).await.unwrap();
  let fetched = s.get(created.concert_id).await.unwrap().unwrap();
  assert_eq!(fetched.kind, ConcertKind::Festival);
  assert_eq!(fetched.granularity, DateGranularity::Month);
  assert_eq!(fetched.date, date(2024, 7, 1));
  assert_eq!(fetched.venue_name, UNKNOWN_VENUE);
}

#[tokio::test]
async fn fetch_all_is_newest_first_with_stable_ties() {
  let s = store().await;
  s.create(show(date(2021, 5, 1), "A", "One")).await.unwrap();
  s.create(show(date(2023, 5, 1), "B", "Two")).await.unwrap();
  s.create(show(date(2023, 5, 1), "C", "Three")).await.unwrap();
  s.create(show(date(2022, 5, 1), "D", "Four")).await.unwrap();

  let venues: Vec<_> = s
    .fetch_all()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.venue_name)
    .collect();
  assert_eq!(venues, ["B", "C", "D", "A"]);
}

#[tokio::test]
async fn update_replaces_bill_and_keeps_photos() {
  let s = store().await;
  let created = s.create(show(date(2023, 4, 1), "Metro", "Alvvays")).await.unwrap();
  let photo = s
    .add_photo(created.concert_id, NewPhoto::image("asset-1"))
    .await
    .unwrap();

  let updated = s
    .update(
      created.concert_id,
      show(date(2023, 4, 2), "Thalia Hall", "Alvvays").with_artist("Slow Pulp", false),
    )
    .await
    .unwrap();

  assert_eq!(updated.venue_name, "Thalia Hall");
  assert_eq!(updated.date, date(2023, 4, 2));
  assert_eq!(updated.artists.len(), 2);
  assert_ne!(updated.artists[0].artist_id, created.artists[0].artist_id);
  assert_eq!(updated.photos, [photo]);

  let stats = s.data_stats().await.unwrap();
  assert_eq!(stats, DataStats { concerts: 1, artists: 2, photos: 1 });
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();

  assert!(matches!(
    s.update(id, show(date(2023, 1, 1), "X", "Y")).await,
    Err(Error::ConcertNotFound(missing)) if missing == id
  ));
  assert!(matches!(s.delete(id).await, Err(Error::ConcertNotFound(_))));
  assert!(matches!(
    s.add_photo(id, NewPhoto::image("a")).await,
    Err(Error::ConcertNotFound(_))
  ));
  assert!(matches!(s.remove_photo(id).await, Err(Error::PhotoNotFound(_))));
}

#[tokio::test]
async fn delete_cascades_to_children() {
  let s = store().await;
  let keep = s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap();
  let gone = s
    .create(show(date(2023, 2, 1), "B", "Two").with_artist("Three", false))
    .await
    .unwrap();
  s.add_photo(gone.concert_id, NewPhoto::video("v1")).await.unwrap();

  s.delete(gone.concert_id).await.unwrap();

  assert!(s.get(gone.concert_id).await.unwrap().is_none());
  assert!(s.get(keep.concert_id).await.unwrap().is_some());
  assert_eq!(
    s.data_stats().await.unwrap(),
    DataStats { concerts: 1, artists: 1, photos: 0 }
  );
}

// ─── Photos ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn photos_attach_and_detach() {
  let s = store().await;
  let c = s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap();

  let first = s.add_photo(c.concert_id, NewPhoto::image("img")).await.unwrap();
  let second = s.add_photo(c.concert_id, NewPhoto::video("vid")).await.unwrap();
  assert!(second.is_video);

  let fetched = s.get(c.concert_id).await.unwrap().unwrap();
  assert_eq!(fetched.photos.len(), 2);
  assert!(fetched.has_photo_asset("img"));
  // Newest first.
  assert!(fetched.photos[0].date_added >= fetched.photos[1].date_added);

  s.remove_photo(first.photo_id).await.unwrap();
  let fetched = s.get(c.concert_id).await.unwrap().unwrap();
  assert_eq!(fetched.photos, [second]);
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn clear_photos_keeps_concerts() {
  let s = store().await;
  let c = s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap();
  s.add_photo(c.concert_id, NewPhoto::image("a")).await.unwrap();
  s.add_photo(c.concert_id, NewPhoto::image("b")).await.unwrap();

  s.clear_photos().await.unwrap();
  assert_eq!(
    s.data_stats().await.unwrap(),
    DataStats { concerts: 1, artists: 1, photos: 0 }
  );
}

#[tokio::test]
async fn clear_all_empties_the_store() {
  let s = store().await;
  let c = s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap();
  s.add_photo(c.concert_id, NewPhoto::image("a")).await.unwrap();

  s.clear_all().await.unwrap();
  assert_eq!(s.data_stats().await.unwrap(), DataStats::default());
  assert!(s.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("encore-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("concerts.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(show(date(2023, 1, 1), "A", "One")).await.unwrap().concert_id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.get(id).await.unwrap().is_some());
  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
