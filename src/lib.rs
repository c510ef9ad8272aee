//! Client-side codec for activity-feed service documents.
//!
//! The service speaks loosely typed JSON: unknown activity fields have to
//! survive as metadata, recipient lists come in more than one shape, and
//! timestamps use a fixed text format without a zone. This crate turns those
//! documents into [`Activity`] values and back. Transport, signing and URL
//! construction live elsewhere.

pub mod activity;
mod error;
pub mod feed;
pub mod listing;

pub use activity::{Activity, Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use feed::{AggregatedFeed, Feed, FeedId, FlatFeed, GeneralFeed, NotificationFeed};
