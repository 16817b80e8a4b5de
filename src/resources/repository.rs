use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};

use crate::model::{Resource, ResourceStatus};
use crate::resources::{format_created_at, ResourceQuery, ResourceRecord};
use crate::tags::repository as tag_repository;

/// creates a new resource in the database. Tags need to be linked separately with [`set_resource_tags`].
///
/// This does not check if the resource already exists, so the caller must check that themselves
pub fn create_resource(resource: &ResourceRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/create_resource.sql"
    ))?;
    pst.execute(rusqlite::params![
        resource.id,
        resource.source,
        resource.external_id,
        resource.title,
        resource.description,
        resource.url,
        resource.status,
        format_created_at(&resource.created_at)
    ])?;
    Ok(())
}

/// retrieves the resource with the passed `id`, failing with [`rusqlite::Error::QueryReturnedNoRows`] if it doesn't exist
pub fn get_resource(id: &str, con: &Connection) -> Result<ResourceRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/resources/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], resource_mapper)
}

/// searches for the resource that the passed source knows by `external_id`.
///
/// if `None` is returned, that means there was no match
pub fn get_resource_by_external_id(
    source: &str,
    external_id: &str,
    con: &Connection,
) -> Result<Option<ResourceRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/get_by_external_id.sql"
    ))?;
    pst.query_row(rusqlite::params![source, external_id], resource_mapper)
        .optional()
}

/// returns the resources matching the status and source filters of `query`, oldest first.
///
/// the tag filter of `query` is _not_ applied here, see [`get_resource_ids_with_tags`]
pub fn search_resources(
    query: &ResourceQuery,
    con: &Connection,
) -> Result<Vec<ResourceRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/search_resources.sql"
    ))?;
    let rows = pst.query_map(
        rusqlite::params![query.status, query.source, query.includes_tombstones()],
        resource_mapper,
    )?;
    rows.collect::<Result<Vec<ResourceRecord>, rusqlite::Error>>()
}

/// overwrites every column except `id` and `created_at`. Checking to make sure the resource exists needs to be done on the caller's end
pub fn update_resource(resource: &ResourceRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/update_resource.sql"
    ))?;
    pst.execute(rusqlite::params![
        resource.source,
        resource.external_id,
        resource.title,
        resource.description,
        resource.url,
        resource.status,
        resource.id
    ])?;
    Ok(())
}

/// returns the number of resources updated, which will be 0 if the resource doesn't exist
pub fn update_status(
    id: &str,
    status: ResourceStatus,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/update_status.sql"
    ))?;
    pst.execute(rusqlite::params![status, id])
}

/// returns the ids of the tags on the resource, in display order
pub fn get_tag_ids_for_resource(
    resource_id: &str,
    con: &Connection,
) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/get_tag_ids_for_resource.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![resource_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

/// replaces every tag on the resource. The caller must make sure every tag exists and that `tag_ids` has no duplicates
pub fn set_resource_tags(
    resource_id: &str,
    tag_ids: &[String],
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    con.execute(
        include_str!("../assets/queries/resources/delete_resource_tags.sql"),
        rusqlite::params![resource_id],
    )?;
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/add_resource_tag.sql"
    ))?;
    for (position, tag_id) in tag_ids.iter().enumerate() {
        pst.execute(rusqlite::params![resource_id, tag_id, position as i64])?;
    }
    Ok(())
}

/// returns the ids of every resource that has at least one of the passed tags
pub fn get_resource_ids_with_tags(
    tag_ids: &BTreeSet<String>,
    con: &Connection,
) -> Result<HashSet<String>, rusqlite::Error> {
    if tag_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let placeholders = vec!["?"; tag_ids.len()].join(",");
    let query = include_str!("../assets/queries/resources/get_resource_ids_with_tags.sql")
        .replace("{}", &placeholders);
    let mut pst = con.prepare(&query)?;
    let rows = pst.query_map(rusqlite::params_from_iter(tag_ids.iter()), |row| {
        row.get::<_, String>(0)
    })?;
    rows.collect::<Result<HashSet<String>, rusqlite::Error>>()
}

/// pulls the tags for `record` to build the full [`Resource`]
pub fn hydrate_resource(record: ResourceRecord, con: &Connection) -> Result<Resource, rusqlite::Error> {
    let tags = get_tag_ids_for_resource(&record.id, con)?
        .iter()
        .map(|tag_id| tag_repository::get_full_tag(tag_id, con))
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;
    Ok(record.into_resource(tags))
}

/// 1. id
/// 2. source
/// 3. externalId
/// 4. title
/// 5. description
/// 6. url
/// 7. status
/// 8. createdAt
fn resource_mapper(row: &rusqlite::Row) -> Result<ResourceRecord, rusqlite::Error> {
    let id: String = row.get(0)?;
    let source: String = row.get(1)?;
    let external_id: Option<String> = row.get(2)?;
    let title: String = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let url: Option<String> = row.get(5)?;
    let status: ResourceStatus = row.get(6)?;
    let created_at: String = row.get(7)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(ResourceRecord {
        id,
        source,
        external_id,
        title,
        description,
        url,
        status,
        created_at,
    })
}
