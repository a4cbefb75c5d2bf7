//! Core types and trait definitions for the Encore concert log.
//!
//! No database or terminal dependencies live here. Every other crate in the
//! workspace depends on this one and speaks in terms of
//! [`record::ConcertRecord`].

// Trait methods spell out `Send` futures; impls use plain `async fn`.
#![allow(async_fn_in_trait)]

pub mod draft;
pub mod error;
pub mod memory;
pub mod photo;
pub mod record;
pub mod store;

pub use error::{Error, Result, ValidationError};
