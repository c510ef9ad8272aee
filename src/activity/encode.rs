use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::Activity;
use super::recipients::encode_recipients;
use super::time::{Clock, SystemClock, format_time};
use crate::error::{Error, Result};

static FOREIGN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]{8}-[a-z0-9]{4}-[1-5][a-z0-9]{3}-[a-z0-9]{4}-[a-z0-9]{12}$").unwrap()
});

impl Activity {
    /// Builds the outbound document, stamping the current UTC time if the
    /// activity has none.
    pub fn encode(&self) -> Result<Map<String, Value>> {
        self.encode_with(&SystemClock)
    }

    pub fn encode_with(&self, clock: &dyn Clock) -> Result<Map<String, Value>> {
        let mut document: Map<String, Value> = self
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        document.insert("actor".to_string(), self.actor.as_str().into());
        document.insert("verb".to_string(), self.verb.as_str().into());
        document.insert("object".to_string(), self.object.as_str().into());
        document.insert("origin".to_string(), self.origin.as_str().into());

        if !self.id.is_empty() {
            document.insert("id".to_string(), self.id.as_str().into());
        }
        if !self.target.is_empty() {
            document.insert("target".to_string(), self.target.as_str().into());
        }
        if let Some(data) = &self.data {
            document.insert("data".to_string(), data.clone());
        }
        if !self.foreign_id.is_empty() {
            if !FOREIGN_ID.is_match(&self.foreign_id) {
                return Err(Error::validation("invalid ForeignID"));
            }
            document.insert("foreign_id".to_string(), self.foreign_id.as_str().into());
        }

        let time = self.time.unwrap_or_else(|| clock.now());
        document.insert("time".to_string(), format_time(&time).into());

        if !self.to.is_empty() {
            document.insert("to".to_string(), encode_recipients(&self.to).into());
        }
        Ok(document)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        self.to_vec_with(&SystemClock)
    }

    pub fn to_vec_with(&self, clock: &dyn Clock) -> Result<Vec<u8>> {
        let document = self.encode_with(clock)?;
        Ok(serde_json::to_vec(&document)?)
    }
}
