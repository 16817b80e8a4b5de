use std::collections::BTreeSet;

use crate::model::Tag;

/// represents a row in the Tags table of the database. Aliases and parents live in their own tables,
/// so use [`TagRecord::into_tag`] to build the full [`Tag`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TagRecord {
    pub id: String,
    /// unique, ignoring ASCII case
    pub name: String,
    pub color: Option<String>,
}

impl TagRecord {
    pub fn into_tag(self, aliases: Vec<String>, parent_ids: BTreeSet<String>) -> Tag {
        Tag {
            id: self.id,
            name: self.name,
            color: self.color,
            aliases,
            parent_ids,
        }
    }
}
