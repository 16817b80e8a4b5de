use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use crate::model::tag::Tag;

/// the lifecycle state of a [`Resource`]. This is a closed set: nothing else is a valid status
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResourceStatus {
    /// normal, indexed
    Active,
    /// indexed, but believed to be outdated
    Stale,
    /// removed from the origin, but kept as a tombstone
    Deleted,
}

/// a status string didn't match any [`ResourceStatus`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseResourceStatusError(pub String);

/// an indexed item of content, originating from some [`Resource::source`]
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Resource {
    /// unique, and never changes after the resource is created
    pub id: String,
    /// the origin system or channel that produced this resource, e.g. `bookmarks`
    pub source: String,
    /// the key the origin source uses for this resource, if it has a stable one
    #[serde(default)]
    pub external_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub status: ResourceStatus,
    /// always serialized as RFC 3339 in UTC, e.g. `2024-01-01T00:00:00Z`
    pub created_at: DateTime<Utc>,
    /// the tags on this resource, in display order
    #[serde(default)]
    pub tags: Vec<Tag>,
}

// ----------------------------------

impl ResourceStatus {
    /// every valid status, in lifecycle order
    pub const ALL: [ResourceStatus; 3] = [
        ResourceStatus::Active,
        ResourceStatus::Stale,
        ResourceStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Stale => "stale",
            ResourceStatus::Deleted => "deleted",
        }
    }

    /// true if this resource is a tombstone
    pub fn is_deleted(&self) -> bool {
        *self == ResourceStatus::Deleted
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = ParseResourceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ResourceStatus::Active),
            "stale" => Ok(ResourceStatus::Stale),
            "deleted" => Ok(ResourceStatus::Deleted),
            other => Err(ParseResourceStatusError(other.to_string())),
        }
    }
}

impl Display for ParseResourceStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is not a valid resource status. Expected one of active, stale, deleted",
            self.0
        )
    }
}

impl std::error::Error for ParseResourceStatusError {}
