use std::backtrace::Backtrace;
use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, GetTagError, UpdateTagError,
};
use crate::model::request::apply_patch;
use crate::model::request::tag_requests::{CreateTagRequest, UpdateTagRequest};
use crate::model::Tag;
use crate::repository::open_connection;
use crate::tags::repository as tag_repository;
use crate::tags::TagRecord;

/// `#rgb` or `#rrggbb`
static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// creates a new tag along with its aliases and parents.
///
/// # Returns
/// - `Ok(Tag)`: the created tag
/// - `Err(CreateTagError::Validation)`: if the name, id, an alias, or the color is invalid
/// - `Err(CreateTagError::AlreadyExists)`: if a tag with the same id or name (ignoring ASCII case) exists
/// - `Err(CreateTagError::ParentNotFound)`: if one of the parents doesn't exist
/// - `Err(CreateTagError::DbError)`: if there was an error with the database
pub fn create_tag(request: CreateTagRequest) -> Result<Tag, CreateTagError> {
    let name = validate_name(&request.name).map_err(CreateTagError::Validation)?;
    validate_color(request.color.as_deref()).map_err(CreateTagError::Validation)?;
    let aliases = validate_aliases(request.aliases).map_err(CreateTagError::Validation)?;
    let id = match request.id {
        Some(id) if id.trim().is_empty() => {
            return Err(CreateTagError::Validation(
                "tag id cannot be blank".to_string(),
            ))
        }
        Some(id) => id.trim().to_string(),
        None => Uuid::new_v4().to_string(),
    };
    let record = TagRecord {
        id,
        name,
        color: request.color,
    };
    let mut con = open_connection().map_err(|e| {
        log::error!(
            "Failed to open database to create tag {}! Error is {e:?}\n{}",
            record.name,
            Backtrace::force_capture()
        );
        CreateTagError::DbError
    })?;
    let tx = con.transaction().map_err(|_| CreateTagError::DbError)?;
    match tag_repository::tag_exists(&record.id, &tx) {
        Ok(false) => { /* no op */ }
        Ok(true) => return Err(CreateTagError::AlreadyExists),
        Err(e) => {
            log::error!(
                "Failed to check if tag with id {} exists! Error is {e:?}\n{}",
                record.id,
                Backtrace::force_capture()
            );
            return Err(CreateTagError::DbError);
        }
    };
    match tag_repository::get_tag_by_name(&record.name, &tx) {
        Ok(None) => { /* no op */ }
        Ok(Some(_)) => return Err(CreateTagError::AlreadyExists),
        Err(_) => return Err(CreateTagError::DbError),
    };
    for parent_id in &request.parent_ids {
        match tag_repository::tag_exists(parent_id, &tx) {
            Ok(true) => { /* no op */ }
            Ok(false) => {
                log::error!(
                    "Cannot create tag {}, because parent tag {parent_id} does not exist!",
                    record.name
                );
                return Err(CreateTagError::ParentNotFound(parent_id.clone()));
            }
            Err(_) => return Err(CreateTagError::DbError),
        }
    }
    let saved = tag_repository::create_tag(&record, &tx)
        .and_then(|_| tag_repository::set_aliases(&record.id, &aliases, &tx))
        .and_then(|_| tag_repository::set_parent_ids(&record.id, &request.parent_ids, &tx))
        .and_then(|_| tx.commit());
    if let Err(e) = saved {
        log::error!(
            "Failed to create a new tag with the name {}! Error is {e:?}\n{}",
            record.name,
            Backtrace::force_capture()
        );
        return Err(CreateTagError::DbError);
    }
    Ok(record.into_tag(aliases, request.parent_ids))
}

/// will return the tag with the passed id
pub fn get_tag(id: &str) -> Result<Tag, GetTagError> {
    let con = open_connection().map_err(|_| GetTagError::DbError)?;
    match tag_repository::get_full_tag(id, &con) {
        Ok(tag) => Ok(tag),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("No tag with id {id} exists!");
            Err(GetTagError::TagNotFound)
        }
        Err(e) => {
            log::error!(
                "Could not retrieve tag with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetTagError::DbError)
        }
    }
}

/// returns every tag, ordered by name
pub fn get_all_tags() -> Result<Vec<Tag>, GetTagError> {
    let con = open_connection().map_err(|_| GetTagError::DbError)?;
    let hydrated = tag_repository::get_all_tags(&con).and_then(|records| {
        records
            .into_iter()
            .map(|record| tag_repository::hydrate_tag(record, &con))
            .collect::<Result<Vec<Tag>, rusqlite::Error>>()
    });
    hydrated.map_err(|e| {
        log::error!(
            "Could not retrieve all tags! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetTagError::DbError
    })
}

/// finds the tag with a name that case-insensitively (ASCII only) matches `name`. If no tag has that name,
/// the first tag (by name) that has a matching alias is returned instead
pub fn find_tag(name: &str) -> Result<Tag, GetTagError> {
    let con = open_connection().map_err(|_| GetTagError::DbError)?;
    let name = name.trim();
    let found = match tag_repository::get_tag_by_name(name, &con) {
        Ok(Some(record)) => Some(record),
        Ok(None) => match tag_repository::get_tags_by_alias(name, &con) {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                log::error!(
                    "Could not search tags by alias {name}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(GetTagError::DbError);
            }
        },
        Err(_) => return Err(GetTagError::DbError),
    };
    let Some(record) = found else {
        return Err(GetTagError::TagNotFound);
    };
    tag_repository::hydrate_tag(record, &con).map_err(|_| GetTagError::DbError)
}

/// applies the partial update in `request` to the tag with the passed id.
///
/// Replacing the parents will fail if it would make the tag its own ancestor
pub fn update_tag(id: &str, request: UpdateTagRequest) -> Result<Tag, UpdateTagError> {
    let mut con = open_connection().map_err(|_| UpdateTagError::DbError)?;
    let tx = con.transaction().map_err(|_| UpdateTagError::DbError)?;
    let mut record = match tag_repository::get_tag(id, &tx) {
        Ok(record) => record,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Could not update tag with id {id}, because it does not exist!");
            return Err(UpdateTagError::TagNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not update tag with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(UpdateTagError::DbError);
        }
    };
    if let Some(new_name) = request.name {
        let new_name = validate_name(&new_name).map_err(UpdateTagError::Validation)?;
        // renaming a tag to a different casing of its own name is fine
        match tag_repository::get_tag_by_name(&new_name, &tx) {
            Ok(Some(existing)) if existing.id != record.id => {
                log::error!(
                    "Could not update tag with id {id} to name {new_name}, because a tag with that name already exists!"
                );
                return Err(UpdateTagError::NewNameAlreadyExists);
            }
            Ok(_) => { /* no op */ }
            Err(_) => return Err(UpdateTagError::DbError),
        };
        record.name = new_name;
    }
    if let Some(Some(color)) = &request.color {
        validate_color(Some(color.as_str())).map_err(UpdateTagError::Validation)?;
    }
    apply_patch(&mut record.color, request.color);
    let aliases = match request.aliases {
        Some(aliases) => Some(validate_aliases(aliases).map_err(UpdateTagError::Validation)?),
        None => None,
    };
    if let Some(parent_ids) = &request.parent_ids {
        check_parents(&record.id, parent_ids, &tx)?;
    }
    let saved = tag_repository::update_tag(&record, &tx)
        .and_then(|_| match &aliases {
            Some(aliases) => tag_repository::set_aliases(&record.id, aliases, &tx),
            None => Ok(()),
        })
        .and_then(|_| match &request.parent_ids {
            Some(parent_ids) => tag_repository::set_parent_ids(&record.id, parent_ids, &tx),
            None => Ok(()),
        })
        .and_then(|_| tag_repository::hydrate_tag(record, &tx));
    let tag = match saved {
        Ok(tag) => tag,
        Err(e) => {
            log::error!(
                "Could not update tag with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(UpdateTagError::DbError);
        }
    };
    tx.commit().map_err(|_| UpdateTagError::DbError)?;
    Ok(tag)
}

/// deletes the tag with the passed id. Children of the tag lose it as a parent, and resources lose it as a tag
pub fn delete_tag(id: &str) -> Result<(), DeleteTagError> {
    let con = open_connection().map_err(|_| DeleteTagError::DbError)?;
    let children = tag_repository::get_child_ids(id, &con).map_err(|_| DeleteTagError::DbError)?;
    if !children.is_empty() {
        log::info!("Removing tag {id} as a parent from {children:?}");
    }
    match tag_repository::delete_tag(id, &con) {
        Ok(0) => Err(DeleteTagError::TagNotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Could not delete tag with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DeleteTagError::DbError)
        }
    }
}

// private functions

/// makes sure every parent exists, and that none of them is the tag itself or one of its descendants
fn check_parents(
    tag_id: &str,
    parent_ids: &BTreeSet<String>,
    con: &rusqlite::Connection,
) -> Result<(), UpdateTagError> {
    let descendants = tag_repository::get_descendant_ids(tag_id, con).map_err(|e| {
        log::error!(
            "Could not retrieve descendants of tag {tag_id}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        UpdateTagError::DbError
    })?;
    for parent_id in parent_ids {
        if parent_id == tag_id || descendants.contains(parent_id) {
            log::error!(
                "Cannot make {parent_id} a parent of {tag_id}, because {tag_id} would become its own ancestor!"
            );
            return Err(UpdateTagError::CycleDetected(parent_id.clone()));
        }
        match tag_repository::tag_exists(parent_id, con) {
            Ok(true) => { /* no op */ }
            Ok(false) => return Err(UpdateTagError::ParentNotFound(parent_id.clone())),
            Err(_) => return Err(UpdateTagError::DbError),
        }
    }
    Ok(())
}

/// returns the trimmed name, or why it isn't valid
fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("tag name cannot be blank".to_string());
    }
    Ok(name.to_string())
}

fn validate_color(color: Option<&str>) -> Result<(), String> {
    match color {
        Some(color) if !COLOR_REGEX.is_match(color) => Err(format!(
            "{color} is not a valid color. Colors must look like #rgb or #rrggbb"
        )),
        _ => Ok(()),
    }
}

/// trims every alias, keeping their order. Blank aliases are rejected
fn validate_aliases(aliases: Vec<String>) -> Result<Vec<String>, String> {
    aliases
        .into_iter()
        .map(|alias| {
            let trimmed = alias.trim();
            if trimmed.is_empty() {
                Err("tag aliases cannot be blank".to_string())
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
