use std::collections::BTreeSet;

use rocket::serde::Deserialize;

use crate::model::request::deserialize_some;

/// body for creating a new tag
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CreateTagRequest {
    /// lets a client pick its own id. A uuid is generated when missing
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub parent_ids: BTreeSet<String>,
}

/// partial update for a tag. Any field left out of the request body is left untouched.
///
/// `color` is double-wrapped: `Some(None)` = clear it, `None` = no change
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpdateTagRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub color: Option<Option<String>>,
    /// replaces every alias when present
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
    /// replaces every parent when present
    #[serde(default)]
    pub parent_ids: Option<BTreeSet<String>>,
}
