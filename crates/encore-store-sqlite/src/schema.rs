//! SQL schema for the Encore SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS concerts (
    concert_id       TEXT PRIMARY KEY,
    date             TEXT NOT NULL,   -- YYYY-MM-DD, pinned to granularity
    date_granularity TEXT NOT NULL DEFAULT 'exact',  -- 'exact' | 'month' | 'year'
    kind             TEXT NOT NULL DEFAULT 'standard', -- 'standard' | 'festival'
    venue_name       TEXT,
    festival_name    TEXT,
    city             TEXT,
    region           TEXT,
    description      TEXT,
    setlist_url      TEXT,
    friend_tags      TEXT             -- comma-separated
);

CREATE TABLE IF NOT EXISTS artists (
    artist_id    TEXT PRIMARY KEY,
    concert_id   TEXT NOT NULL REFERENCES concerts(concert_id) ON DELETE CASCADE,
    name         TEXT,
    is_headliner INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS photos (
    photo_id   TEXT PRIMARY KEY,
    concert_id TEXT NOT NULL REFERENCES concerts(concert_id) ON DELETE CASCADE,
    asset_id   TEXT NOT NULL,
    date_added TEXT NOT NULL,         -- RFC 3339 UTC
    is_video   INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS concerts_date_idx  ON concerts(date);
CREATE INDEX IF NOT EXISTS artists_concert_idx ON artists(concert_id);
CREATE INDEX IF NOT EXISTS photos_concert_idx  ON photos(concert_id);

PRAGMA user_version = 1;
";
