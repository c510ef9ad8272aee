use serde_json::{Map, Value};
use tracing::debug;

use super::Activity;
use super::recipients::decode_recipients;
use super::time::parse_time;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Actor,
    Verb,
    ForeignId,
    Object,
    Origin,
    Target,
    Time,
    Data,
    To,
}

const KNOWN_FIELDS: [(&str, Field); 10] = [
    ("id", Field::Id),
    ("actor", Field::Actor),
    ("verb", Field::Verb),
    ("foreign_id", Field::ForeignId),
    ("object", Field::Object),
    ("origin", Field::Origin),
    ("target", Field::Target),
    ("time", Field::Time),
    ("data", Field::Data),
    ("to", Field::To),
];

impl Field {
    /// Case-insensitive lookup in the known key table.
    fn classify(key: &str) -> Option<Field> {
        let key = key.to_lowercase();
        KNOWN_FIELDS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, field)| *field)
    }
}

impl Activity {
    /// Parses an inbound activity document.
    ///
    /// Only a document that is not a JSON object is an error. Fields that
    /// cannot be understood are skipped and the rest of the activity is kept.
    pub fn from_slice(bytes: &[u8]) -> Result<Activity> {
        let document: Map<String, Value> = serde_json::from_slice(bytes)?;
        Ok(Activity::from_map(document))
    }

    pub fn from_map(document: Map<String, Value>) -> Activity {
        let mut activity = Activity::default();
        for (key, value) in document {
            if value.is_null() {
                continue;
            }
            match Field::classify(&key) {
                Some(field) => activity.apply(field, value),
                None => match value {
                    Value::String(text) => {
                        activity.metadata.insert(key, text);
                    }
                    other => {
                        debug!(target: "codec", key, value = %other, "skipping non-string metadata");
                    }
                },
            }
        }
        activity
    }

    fn apply(&mut self, field: Field, value: Value) {
        match (field, value) {
            (Field::Data, value) => self.data = Some(value),
            (Field::To, value) => self.to.extend(decode_recipients(value)),
            (Field::Time, Value::String(text)) => match parse_time(&text) {
                Some(time) => self.time = Some(time),
                None => debug!(target: "codec", time = %text, "skipping unparseable time"),
            },
            (Field::Id, Value::String(text)) => self.id = text,
            (Field::Actor, Value::String(text)) => self.actor = text.into(),
            (Field::Verb, Value::String(text)) => self.verb = text,
            (Field::ForeignId, Value::String(text)) => self.foreign_id = text,
            (Field::Object, Value::String(text)) => self.object = text.into(),
            (Field::Origin, Value::String(text)) => self.origin = text.into(),
            (Field::Target, Value::String(text)) => self.target = text.into(),
            (field, value) => {
                debug!(target: "codec", ?field, %value, "skipping field with unexpected type");
            }
        }
    }
}
