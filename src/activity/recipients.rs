//! Recipient (`to`) lists.
//!
//! Outbound, each recipient is a single `"slug:id"` or `"slug:id token"`
//! string. Inbound, depending on the service version, the list holds those
//! strings or `[reference]` / `[reference, token]` pairs. Both shapes are
//! normalized to the string form before the feed parts are extracted.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::feed::{Feed, GeneralFeed};

// Slug and user id are ASCII word characters only.
static WITH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?-u:\w)+:(?-u:\w)+ .*$").unwrap());
static WITHOUT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?-u:\w)+:(?-u:\w)+$").unwrap());

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireRecipients {
    Flat(Vec<Option<String>>),
    Paired(Vec<Option<Vec<Option<String>>>>),
}

impl WireRecipients {
    fn into_strings(self) -> Vec<String> {
        match self {
            WireRecipients::Flat(entries) => entries.into_iter().flatten().collect(),
            WireRecipients::Paired(pairs) => pairs
                .into_iter()
                .flatten()
                .map(|pair| pair.into_iter().flatten().collect::<Vec<_>>())
                .filter_map(|pair| match <[String; 2]>::try_from(pair) {
                    Ok([reference, token]) => Some(format!("{reference} {token}")),
                    Err(mut single) if single.len() == 1 => single.pop(),
                    Err(other) => {
                        debug!(target: "codec", entry = ?other, "dropping recipient pair");
                        None
                    }
                })
                .collect(),
        }
    }
}

/// Wire form of one recipient.
pub fn recipient_string(feed: &impl Feed) -> String {
    let reference = feed.feed_id();
    match feed.token() {
        Some(token) if !token.is_empty() => format!("{reference} {token}"),
        _ => reference.into(),
    }
}

pub(crate) fn encode_recipients(feeds: &[GeneralFeed]) -> Vec<String> {
    feeds.iter().map(recipient_string).collect()
}

/// Decodes whatever the service sent under `to`. Entries that cannot be
/// understood are dropped rather than failing the activity.
pub(crate) fn decode_recipients(value: Value) -> Vec<GeneralFeed> {
    let entries = match serde_json::from_value::<WireRecipients>(value) {
        Ok(recipients) => recipients.into_strings(),
        Err(error) => {
            debug!(target: "codec", %error, "ignoring unrecognized recipient list");
            return vec![];
        }
    };
    entries
        .iter()
        .filter_map(|entry| {
            let feed = parse_recipient(entry);
            if feed.is_none() {
                debug!(target: "codec", entry, "dropping unrecognized recipient");
            }
            feed
        })
        .collect()
}

fn parse_recipient(entry: &str) -> Option<GeneralFeed> {
    if WITH_TOKEN.is_match(entry) {
        let (slug, rest) = entry.split_once(':')?;
        let (user_id, token) = rest.split_once(' ')?;
        return Some(GeneralFeed::from_wire(slug, user_id, Some(token)));
    }
    if WITHOUT_TOKEN.is_match(entry) {
        let (slug, user_id) = entry.split_once(':')?;
        return Some(GeneralFeed::from_wire(slug, user_id, None));
    }
    None
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use crate::feed::{Feed, FeedId, FlatFeed, GeneralFeed};

    use super::{decode_recipients, encode_recipients, parse_recipient, recipient_string};

    #[test]
    fn encodes_with_and_without_token() -> Result<()> {
        assert_eq!(recipient_string(&FlatFeed::new("user", "1")?), "user:1");
        assert_eq!(
            recipient_string(&FlatFeed::new("user", "1")?.with_token("tok")),
            "user:1 tok"
        );
        Ok(())
    }

    #[test]
    fn encoding_keeps_order() -> Result<()> {
        let feeds = vec![
            GeneralFeed::from(&FlatFeed::new("b", "2")?),
            GeneralFeed::from(&FlatFeed::new("a", "1")?.with_token("t")),
        ];
        assert_eq!(encode_recipients(&feeds), vec!["b:2", "a:1 t"]);
        Ok(())
    }

    #[test]
    fn decodes_flat_form() {
        let feeds = decode_recipients(json!(["user:1 tok", "user:2"]));
        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].feed_id(), FeedId::new("user:1"));
        assert_eq!(feeds[0].token(), Some("tok"));
        assert_eq!(feeds[1].feed_id(), FeedId::new("user:2"));
        assert_eq!(feeds[1].token(), None);
    }

    #[test]
    fn paired_form_matches_flat_form() {
        let paired = decode_recipients(json!([["user:1"], ["flat:2", "tok"]]));
        let flat = decode_recipients(json!(["user:1", "flat:2 tok"]));
        assert_eq!(paired, flat);
        assert_eq!(paired[1].feed_slug(), "flat");
        assert_eq!(paired[1].user_id(), "2");
        assert_eq!(paired[1].token(), Some("tok"));
    }

    #[test]
    fn token_keeps_everything_after_first_space() {
        let feed = parse_recipient("user:1 tok en").unwrap();
        assert_eq!(feed.token(), Some("tok en"));
    }

    #[test]
    fn unrecognized_entries_are_dropped() {
        let feeds = decode_recipients(json!(["user:1", "not a feed", "user:", "a:b:c", "flat:2"]));
        let ids: Vec<_> = feeds.iter().map(|f| f.feed_id()).collect();
        assert_eq!(ids, vec![FeedId::new("user:1"), FeedId::new("flat:2")]);

        let feeds = decode_recipients(json!([["user:1", "tok", "extra"], ["flat:2"]]));
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].feed_id(), FeedId::new("flat:2"));

        let feeds = decode_recipients(json!(["user:é", "flux:1 tok", "ユーザー:1", "ü:2 tok"]));
        let ids: Vec<_> = feeds.iter().map(|f| f.feed_id()).collect();
        assert_eq!(ids, vec![FeedId::new("flux:1")]);
    }

    #[test]
    fn null_entries_are_dropped() {
        let feeds = decode_recipients(json!(["user:1", null]));
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].feed_id(), FeedId::new("user:1"));

        let feeds = decode_recipients(json!([null, ["flat:2", "tok"], [null, "user:3"]]));
        let ids: Vec<_> = feeds.iter().map(|f| f.feed_id()).collect();
        assert_eq!(ids, vec![FeedId::new("flat:2"), FeedId::new("user:3")]);
        assert_eq!(feeds[0].token(), Some("tok"));
    }

    #[test]
    fn other_shapes_decode_to_nothing() {
        assert!(decode_recipients(json!("user:1")).is_empty());
        assert!(decode_recipients(json!(["user:1", 5])).is_empty());
        assert!(decode_recipients(json!({"user": "1"})).is_empty());
        assert!(decode_recipients(json!([])).is_empty());
    }
}
