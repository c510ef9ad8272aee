//! Activities and their wire representation.
//!
//! The wire document is a flat JSON object. A fixed set of keys maps onto
//! typed fields, every other string-valued key is carried as metadata, and
//! the encoder fills in the timestamp when the caller left it empty.

mod decode;
mod encode;
pub mod recipients;
mod time;

use std::collections::HashMap;

use jiff::civil::DateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::feed::{Feed, FeedId, GeneralFeed};

pub use self::recipients::recipient_string;
pub use self::time::{Clock, FixedClock, SystemClock, format_time, parse_time};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub actor: FeedId,
    pub verb: String,
    pub object: FeedId,
    pub target: FeedId,
    pub origin: FeedId,
    pub time: Option<DateTime>,
    pub foreign_id: String,
    pub data: Option<Value>,
    pub metadata: HashMap<String, String>,
    pub to: Vec<GeneralFeed>,
}

impl Activity {
    pub fn new(
        actor: impl Into<FeedId>,
        verb: impl Into<String>,
        object: impl Into<FeedId>,
    ) -> Activity {
        Activity {
            actor: actor.into(),
            verb: verb.into(),
            object: object.into(),
            ..Activity::default()
        }
    }
    pub fn with_time(mut self, time: DateTime) -> Activity {
        self.time = Some(time);
        self
    }
    pub fn with_foreign_id(mut self, foreign_id: impl Into<String>) -> Activity {
        self.foreign_id = foreign_id.into();
        self
    }
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Activity {
        self.metadata.insert(key.into(), value.into());
        self
    }
    /// Copy the activity to another feed as well.
    pub fn with_recipient(mut self, feed: &impl Feed) -> Activity {
        self.to.push(GeneralFeed::from(feed));
        self
    }
}

/// Serializes through the encoder using the system clock.
impl Serialize for Activity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let document = self.encode().map_err(serde::ser::Error::custom)?;
        document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Activity::from_map(document))
    }
}
