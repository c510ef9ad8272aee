//! Feed references and the feeds that produce them.
//!
//! A feed reference is the `slug:id` text the service uses to name a feed.
//! The concrete feed types only differ in which endpoint they were built
//! for; once an activity is on the wire only the reference and the optional
//! token remain, so decoded recipients always come back as [`GeneralFeed`].

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w-]+$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedId(String);

impl FeedId {
    pub fn new(value: impl Into<String>) -> FeedId {
        FeedId(value.into())
    }
    pub fn from_parts(slug: &str, user_id: &str) -> FeedId {
        FeedId(format!("{slug}:{user_id}"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for FeedId {
    fn from(value: String) -> Self {
        FeedId(value)
    }
}

impl From<&str> for FeedId {
    fn from(value: &str) -> Self {
        FeedId(value.to_owned())
    }
}

impl From<FeedId> for String {
    fn from(value: FeedId) -> Self {
        value.0
    }
}

impl AsRef<str> for FeedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Anything that can name a feed and optionally carry its access token.
pub trait Feed {
    fn feed_slug(&self) -> &str;
    fn user_id(&self) -> &str;
    fn token(&self) -> Option<&str>;

    fn feed_id(&self) -> FeedId {
        FeedId::from_parts(self.feed_slug(), self.user_id())
    }
}

fn validate_identifier(what: &str, value: &str) -> Result<()> {
    if !IDENTIFIER.is_match(value) {
        return Err(Error::validation(format!("invalid {what}: {value:?}")));
    }
    Ok(())
}

macro_rules! feed_type {
    ($(#[$meta:meta])* $typ:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $typ {
            slug: String,
            user_id: String,
            token: Option<String>,
        }

        impl $typ {
            pub fn new(slug: impl Into<String>, user_id: impl Into<String>) -> Result<$typ> {
                let slug = slug.into();
                let user_id = user_id.into();
                validate_identifier("feed slug", &slug)?;
                validate_identifier("user id", &user_id)?;
                Ok($typ {
                    slug,
                    user_id,
                    token: None,
                })
            }
            /// Attach an access token. An empty token clears it.
            pub fn with_token(mut self, token: impl Into<String>) -> $typ {
                let token = token.into();
                self.token = (!token.is_empty()).then_some(token);
                self
            }
        }

        impl Feed for $typ {
            fn feed_slug(&self) -> &str {
                &self.slug
            }
            fn user_id(&self) -> &str {
                &self.user_id
            }
            fn token(&self) -> Option<&str> {
                self.token.as_deref()
            }
        }
    };
}

feed_type! {
    /// A feed of activities in reverse chronological order.
    FlatFeed
}

feed_type! {
    /// An aggregated feed whose activities also track seen/read state.
    NotificationFeed
}

feed_type! {
    /// A feed that groups activities by an aggregation format.
    AggregatedFeed
}

feed_type! {
    /// A feed whose kind is unknown, as recovered from a recipient list.
    GeneralFeed
}

impl GeneralFeed {
    /// Builds a feed from parts that already passed the recipient patterns.
    pub(crate) fn from_wire(slug: &str, user_id: &str, token: Option<&str>) -> GeneralFeed {
        GeneralFeed {
            slug: slug.to_owned(),
            user_id: user_id.to_owned(),
            token: token.filter(|t| !t.is_empty()).map(str::to_owned),
        }
    }
}

impl<F: Feed> From<&F> for GeneralFeed {
    fn from(feed: &F) -> Self {
        GeneralFeed::from_wire(feed.feed_slug(), feed.user_id(), feed.token())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{AggregatedFeed, Feed, FeedId, FlatFeed, GeneralFeed, NotificationFeed};

    #[test]
    fn uuid_user_id_is_accepted() -> Result<()> {
        let feed = FlatFeed::new("user", "099978b6-3b72-4f5c-bc43-247ba6ae2dd9")?;
        assert_eq!(
            feed.feed_id(),
            FeedId::new("user:099978b6-3b72-4f5c-bc43-247ba6ae2dd9")
        );
        assert_eq!(feed.token(), None);
        Ok(())
    }

    #[test]
    fn email_user_id_is_rejected() {
        let err = FlatFeed::new("user", "tester@mail.com").unwrap_err();
        assert!(err.is_validation());
        assert!(NotificationFeed::new("user", "tester@mail.com").is_err());
        assert!(AggregatedFeed::new("user feed", "1").is_err());
        assert!(GeneralFeed::new("", "1").is_err());
    }

    #[test]
    fn empty_token_is_absent() -> Result<()> {
        let feed = NotificationFeed::new("notify", "42")?.with_token("");
        assert_eq!(feed.token(), None);
        let feed = feed.with_token("secret");
        assert_eq!(feed.token(), Some("secret"));
        Ok(())
    }

    #[test]
    fn any_feed_converts_to_general() -> Result<()> {
        let aggregated = AggregatedFeed::new("timeline", "7")?.with_token("tok");
        let general = GeneralFeed::from(&aggregated);
        assert_eq!(general.feed_id(), aggregated.feed_id());
        assert_eq!(general.token(), Some("tok"));
        Ok(())
    }

    #[test]
    fn feed_id_serializes_as_plain_string() -> Result<()> {
        let id = FeedId::from_parts("flat", "2");
        assert_eq!(serde_json::to_string(&id)?, r#""flat:2""#);
        let back: FeedId = serde_json::from_str(r#""flat:2""#)?;
        assert_eq!(back, id);
        Ok(())
    }
}
