use serde::Deserialize;

use super::nullable;
use crate::error::Result;
use crate::feed::FeedId;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireFollowers {
    #[serde(deserialize_with = "nullable")]
    duration: String,
    #[serde(deserialize_with = "nullable")]
    results: Vec<WireFollower>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireFollower {
    #[serde(deserialize_with = "nullable")]
    created_at: String,
    #[serde(deserialize_with = "nullable")]
    updated_at: String,
    #[serde(deserialize_with = "nullable")]
    feed_id: String,
    #[serde(deserialize_with = "nullable")]
    target_id: String,
}

/// Feeds following (or followed by) a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Followers {
    pub duration: String,
    pub followers: Vec<Follower>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Follower {
    pub created_at: String,
    pub updated_at: String,
    /// The following feed.
    pub feed_id: FeedId,
    /// The followed feed.
    pub target_id: FeedId,
}

impl Followers {
    pub fn from_slice(bytes: &[u8]) -> Result<Followers> {
        let wire: WireFollowers = serde_json::from_slice(bytes)?;
        Ok(wire.into())
    }
}

impl From<WireFollowers> for Followers {
    fn from(wire: WireFollowers) -> Self {
        Followers {
            duration: wire.duration,
            followers: wire
                .results
                .into_iter()
                .map(|follower| Follower {
                    created_at: follower.created_at,
                    updated_at: follower.updated_at,
                    feed_id: follower.feed_id.into(),
                    target_id: follower.target_id.into(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::feed::FeedId;

    use super::Followers;

    #[test]
    fn reshapes_followers() -> Result<()> {
        let followers = Followers::from_slice(
            br#"{
                "duration": "1ms",
                "results": [
                    {"created_at": "2016-01-01T00:00:00.000000",
                     "updated_at": "2016-01-02T00:00:00.000000",
                     "feed_id": "timeline:1", "target_id": "user:2"},
                    {"feed_id": "timeline:3", "target_id": "user:2"}
                ]
            }"#,
        )?;
        assert_eq!(followers.duration, "1ms");
        assert_eq!(followers.followers.len(), 2);
        assert_eq!(followers.followers[0].feed_id, FeedId::new("timeline:1"));
        assert_eq!(followers.followers[0].target_id, FeedId::new("user:2"));
        assert_eq!(followers.followers[0].updated_at, "2016-01-02T00:00:00.000000");
        assert_eq!(followers.followers[1].feed_id, FeedId::new("timeline:3"));
        assert_eq!(followers.followers[1].created_at, "");
        Ok(())
    }

    #[test]
    fn empty_response() -> Result<()> {
        assert_eq!(Followers::from_slice(b"{}")?, Followers::default());
        assert!(Followers::from_slice(b"null").is_err());
        Ok(())
    }
}
