use serde::Serialize;

use crate::feed::FeedId;

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Paging and ranking parameters for reading a feed. Unset fields are left
/// out so the service applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedQuery {
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub offset: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_gte: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_gt: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_lte: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_lt: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ranking: String,
}

impl FeedQuery {
    /// The set parameters as URL query pairs, in declaration order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];
        for (name, value) in [("limit", self.limit), ("offset", self.offset)] {
            if value != 0 {
                pairs.push((name, value.to_string()));
            }
        }
        for (name, value) in [
            ("id_gte", &self.id_gte),
            ("id_gt", &self.id_gt),
            ("id_lte", &self.id_lte),
            ("id_lt", &self.id_lt),
            ("ranking", &self.ranking),
        ] {
            if !value.is_empty() {
                pairs.push((name, value.clone()));
            }
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowersQuery {
    pub limit: u32,
    #[serde(rename = "offset")]
    pub skip: u32,
}

/// Body of a follow call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowRequest {
    pub target: FeedId,
    /// How many of the target's existing activities to copy over.
    pub activity_copy_limit: u32,
}
