use std::collections::BTreeSet;

use rocket::serde::{Deserialize, Serialize};

/// a label that can be attached to resources.
///
/// Tags can be organized hierarchically through [`Tag::parent_ids`], and can be found by any of their [`Tag::aliases`]
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Tag {
    /// unique, and never changes after the tag is created
    pub id: String,
    /// the display name of the tag
    pub name: String,
    /// optional display color, such as `#ff0000`
    #[serde(default)]
    pub color: Option<String>,
    /// alternate names for the tag. Order is display order, and duplicates are kept
    #[serde(default)]
    pub aliases: Vec<String>,
    /// ids of the tags this tag is a child of. The tag does not own its parents
    #[serde(default)]
    pub parent_ids: BTreeSet<String>,
}
