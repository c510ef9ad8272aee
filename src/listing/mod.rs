//! Listing responses and the request documents that produce them.
//!
//! Response documents are parsed into private wire structs that mirror the
//! service's field names, then reshaped into the public types.

mod followers;
mod query;

use serde::{Deserialize, Deserializer};

use crate::activity::Activity;
use crate::error::Result;

pub use self::followers::{Follower, Followers};
pub use self::query::{FeedQuery, FollowRequest, FollowersQuery};

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a list whose `null` entries are dropped.
fn without_nulls<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireGroupedListing {
    #[serde(deserialize_with = "nullable")]
    duration: String,
    #[serde(deserialize_with = "nullable")]
    next: String,
    #[serde(deserialize_with = "nullable")]
    results: Vec<WireGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireGroup {
    #[serde(deserialize_with = "without_nulls")]
    activities: Vec<Activity>,
    #[serde(deserialize_with = "nullable")]
    activity_count: i64,
    #[serde(deserialize_with = "nullable")]
    actor_count: i64,
    #[serde(deserialize_with = "nullable")]
    created_at: String,
    #[serde(deserialize_with = "nullable")]
    group: String,
    #[serde(deserialize_with = "nullable")]
    id: String,
    #[serde(deserialize_with = "nullable")]
    updated_at: String,
    #[serde(deserialize_with = "nullable")]
    verb: String,
}

/// One page of an aggregated or notification feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedActivities {
    pub duration: String,
    /// Cursor for the following page; empty on the last one.
    pub next: String,
    pub groups: Vec<ActivityGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityGroup {
    pub activities: Vec<Activity>,
    pub activity_count: i64,
    pub actor_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub group: String,
    pub id: String,
    pub verb: String,
}

impl GroupedActivities {
    pub fn from_slice(bytes: &[u8]) -> Result<GroupedActivities> {
        let listing: WireGroupedListing = serde_json::from_slice(bytes)?;
        Ok(listing.into())
    }
}

impl From<WireGroup> for ActivityGroup {
    fn from(group: WireGroup) -> Self {
        ActivityGroup {
            activities: group.activities,
            activity_count: group.activity_count,
            actor_count: group.actor_count,
            created_at: group.created_at,
            updated_at: group.updated_at,
            group: group.group,
            id: group.id,
            verb: group.verb,
        }
    }
}

impl From<WireGroupedListing> for GroupedActivities {
    fn from(listing: WireGroupedListing) -> Self {
        GroupedActivities {
            duration: listing.duration,
            next: listing.next,
            groups: listing.results.into_iter().map(ActivityGroup::from).collect(),
        }
    }
}

/// Activities echoed back by the service after they were added to a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostedActivities {
    #[serde(deserialize_with = "without_nulls")]
    pub activities: Vec<Activity>,
}

impl PostedActivities {
    pub fn from_slice(bytes: &[u8]) -> Result<PostedActivities> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
