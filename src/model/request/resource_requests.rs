use chrono::{DateTime, Utc};
use rocket::serde::Deserialize;

use crate::model::request::deserialize_some;
use crate::model::ResourceStatus;

/// body for creating a new resource
#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CreateResourceRequest {
    /// lets a client pick its own id. A uuid is generated when missing
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// defaults to [`ResourceStatus::Active`]
    #[serde(default)]
    pub status: Option<ResourceStatus>,
    /// defaults to the time the resource is created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// ids of existing tags, in display order
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// partial update for a resource. Any field left out of the request body is left untouched.
///
/// the nullable fields are double-wrapped: `Some(None)` = clear it, `None` = no change
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub external_id: Option<Option<String>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub url: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<ResourceStatus>,
    /// replaces every tag on the resource when present
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
}

/// body for indexing a resource from a source. The pair of `source` and `externalId` identifies the resource,
/// so indexing the same pair twice updates the existing resource instead of creating a new one
#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct IndexResourceRequest {
    pub source: String,
    pub external_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// body for explicitly moving a resource to another status
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(crate = "rocket::serde")]
pub struct StatusChangeRequest {
    pub status: ResourceStatus,
}
