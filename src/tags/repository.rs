use std::backtrace::Backtrace;
use std::collections::BTreeSet;

use rusqlite::{Connection, OptionalExtension};

use crate::model::Tag;
use crate::tags::TagRecord;

/// creates a new tag in the database. This does not check if the tag already exists,
/// so the caller must check that themselves
pub fn create_tag(tag: &TagRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/create_tag.sql"))?;
    pst.execute(rusqlite::params![tag.id, tag.name, tag.color])?;
    Ok(())
}

/// retrieves a tag from the database with the passed `id`
///
/// # Returns
/// - `Ok(TagRecord)`: the tag with the specified ID if the tag exists
/// - `Err(rusqlite::Error)`: if there was an error during the database operation, including if no tag with the specified ID exists
pub fn get_tag(id: &str, con: &Connection) -> Result<TagRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], tag_mapper)
}

pub fn tag_exists(id: &str, con: &Connection) -> Result<bool, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_id.sql"))?;
    pst.exists(rusqlite::params![id])
}

/// searches for a tag whose name case-insensitively matches the passed name.
/// SQLite's `nocase` only folds ASCII letters, so `Über` and `über` are different names.
///
/// if `None` is returned, that means there was no match
pub fn get_tag_by_name(name: &str, con: &Connection) -> Result<Option<TagRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_name.sql"))?;
    match pst.query_row(rusqlite::params![name], tag_mapper).optional() {
        Ok(tag) => Ok(tag),
        Err(e) => {
            log::error!(
                "Failed to get tag by name, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// returns every tag with an alias that case-insensitively (ASCII only) matches `alias`, ordered by name
pub fn get_tags_by_alias(alias: &str, con: &Connection) -> Result<Vec<TagRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_alias.sql"))?;
    let rows = pst.query_map(rusqlite::params![alias], tag_mapper)?;
    rows.collect::<Result<Vec<TagRecord>, rusqlite::Error>>()
}

pub fn get_all_tags(con: &Connection) -> Result<Vec<TagRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_all_tags.sql"))?;
    let rows = pst.query_map([], tag_mapper)?;
    rows.collect::<Result<Vec<TagRecord>, rusqlite::Error>>()
}

/// updates the name and color of the passed tag. Checking to make sure the tag exists needs to be done on the caller's end
pub fn update_tag(tag: &TagRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/update_tag.sql"))?;
    pst.execute(rusqlite::params![tag.name, tag.color, tag.id])?;
    Ok(())
}

/// deletes the tag along with its aliases, its parent links, its child links, and its links to resources.
///
/// returns the number of tags deleted, which will be 0 if the tag didn't exist
pub fn delete_tag(id: &str, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/delete_tag.sql"))?;
    pst.execute(rusqlite::params![id])
}

/// returns the aliases of the tag in display order
pub fn get_aliases(tag_id: &str, con: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_aliases.sql"))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

/// replaces all aliases on the tag, keeping the order (and any duplicates) of `aliases`
pub fn set_aliases(tag_id: &str, aliases: &[String], con: &Connection) -> Result<(), rusqlite::Error> {
    con.execute(
        include_str!("../assets/queries/tags/delete_aliases.sql"),
        rusqlite::params![tag_id],
    )?;
    let mut pst = con.prepare(include_str!("../assets/queries/tags/add_alias.sql"))?;
    for (position, alias) in aliases.iter().enumerate() {
        pst.execute(rusqlite::params![tag_id, position as i64, alias])?;
    }
    Ok(())
}

pub fn get_parent_ids(tag_id: &str, con: &Connection) -> Result<BTreeSet<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_parent_ids.sql"))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<String>, rusqlite::Error>>()
}

/// replaces all parents of the tag. The caller must make sure every parent exists and that no cycle is created
pub fn set_parent_ids(
    tag_id: &str,
    parent_ids: &BTreeSet<String>,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    con.execute(
        include_str!("../assets/queries/tags/delete_parents.sql"),
        rusqlite::params![tag_id],
    )?;
    let mut pst = con.prepare(include_str!("../assets/queries/tags/add_parent.sql"))?;
    for parent_id in parent_ids {
        pst.execute(rusqlite::params![tag_id, parent_id])?;
    }
    Ok(())
}

/// returns the ids of the tags that directly list `tag_id` as a parent
pub fn get_child_ids(tag_id: &str, con: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_child_ids.sql"))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

/// returns the ids of every child, grandchild, etc. of `tag_id`. Does not include `tag_id` itself
pub fn get_descendant_ids(tag_id: &str, con: &Connection) -> Result<BTreeSet<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/get_descendant_ids.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<String>, rusqlite::Error>>()
}

/// pulls the aliases and parents for `record` to build the full [`Tag`]
pub fn hydrate_tag(record: TagRecord, con: &Connection) -> Result<Tag, rusqlite::Error> {
    let aliases = get_aliases(&record.id, con)?;
    let parent_ids = get_parent_ids(&record.id, con)?;
    Ok(record.into_tag(aliases, parent_ids))
}

/// retrieves the full [`Tag`] with the passed `id`, failing with [`rusqlite::Error::QueryReturnedNoRows`] if it doesn't exist
pub fn get_full_tag(id: &str, con: &Connection) -> Result<Tag, rusqlite::Error> {
    let record = get_tag(id, con)?;
    hydrate_tag(record, con)
}

/// maps a [`TagRecord`] from a database row
///
/// 1. id
/// 2. name
/// 3. color
fn tag_mapper(row: &rusqlite::Row) -> Result<TagRecord, rusqlite::Error> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let color: Option<String> = row.get(2)?;
    Ok(TagRecord { id, name, color })
}
