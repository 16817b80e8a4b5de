use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::model::{Resource, ResourceStatus, Tag};

/// represents a row in the Resources table of the database. Tags are linked in their own table,
/// so use [`ResourceRecord::into_resource`] to build the full [`Resource`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ResourceRecord {
    pub id: String,
    pub source: String,
    /// unique together with `source`, when present
    pub external_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: ResourceStatus,
    /// stored with second precision
    pub created_at: DateTime<Utc>,
}

/// filters for searching resources. The default finds every resource that isn't a tombstone
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ResourceQuery {
    pub status: Option<ResourceStatus>,
    pub source: Option<String>,
    /// matches resources with this tag or any of its descendants
    pub tag_id: Option<String>,
    /// tombstones are only returned if this is set, or if `status` is [`ResourceStatus::Deleted`]
    pub include_deleted: bool,
}

impl ResourceRecord {
    pub fn into_resource(self, tags: Vec<Tag>) -> Resource {
        Resource {
            id: self.id,
            source: self.source,
            external_id: self.external_id,
            title: self.title,
            description: self.description,
            url: self.url,
            status: self.status,
            created_at: self.created_at,
            tags,
        }
    }
}

impl ResourceQuery {
    pub fn includes_tombstones(&self) -> bool {
        self.include_deleted || self.status == Some(ResourceStatus::Deleted)
    }
}

/// the text form of `created_at` in the database, e.g. `2024-01-01T00:00:00Z`.
/// All values share one format so they sort correctly as text
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    created_at
        .trunc_subsecs(0)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl ToSql for ResourceStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ResourceStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<ResourceStatus>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
