use std::backtrace::Backtrace;
use std::collections::HashSet;

use chrono::{SubsecRound, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::model::error::resource_errors::{
    CreateResourceError, GetResourceError, IndexResourceError, SearchResourcesError,
    StatusChangeError, UpdateResourceError,
};
use crate::model::request::apply_patch;
use crate::model::request::resource_requests::{
    CreateResourceRequest, IndexResourceRequest, UpdateResourceRequest,
};
use crate::model::{Resource, ResourceStatus};
use crate::repository::open_connection;
use crate::resources::repository as resource_repository;
use crate::resources::{ResourceQuery, ResourceRecord};
use crate::tags::repository as tag_repository;

/// creates a new resource and links it to its tags.
///
/// # Returns
/// - `Ok(Resource)`: the created resource, with its tags
/// - `Err(CreateResourceError::Validation)`: if the id, source, external id, or title is blank
/// - `Err(CreateResourceError::AlreadyExists)`: if the id is taken, or the source already has a resource with the external id
/// - `Err(CreateResourceError::TagNotFound)`: if one of the tags doesn't exist
/// - `Err(CreateResourceError::DbError)`: if there was an error with the database
pub fn create_resource(request: CreateResourceRequest) -> Result<Resource, CreateResourceError> {
    let id = match request.id {
        Some(id) => require("id", &id).map_err(CreateResourceError::Validation)?,
        None => Uuid::new_v4().to_string(),
    };
    let record = ResourceRecord {
        id,
        source: require("source", &request.source).map_err(CreateResourceError::Validation)?,
        external_id: optional_id(request.external_id).map_err(CreateResourceError::Validation)?,
        title: require("title", &request.title).map_err(CreateResourceError::Validation)?,
        description: request.description,
        url: request.url,
        status: request.status.unwrap_or(ResourceStatus::Active),
        created_at: request.created_at.unwrap_or_else(Utc::now).trunc_subsecs(0),
    };
    let tag_ids = dedup_tag_ids(request.tag_ids);
    let mut con = open_connection().map_err(|_| CreateResourceError::DbError)?;
    let tx = con.transaction().map_err(|_| CreateResourceError::DbError)?;
    match resource_repository::get_resource(&record.id, &tx) {
        Err(rusqlite::Error::QueryReturnedNoRows) => { /* no op */ }
        Ok(_) => return Err(CreateResourceError::AlreadyExists),
        Err(e) => {
            log::error!(
                "Failed to check if resource {} exists! Error is {e:?}\n{}",
                record.id,
                Backtrace::force_capture()
            );
            return Err(CreateResourceError::DbError);
        }
    };
    if let Some(external_id) = &record.external_id {
        match resource_repository::get_resource_by_external_id(&record.source, external_id, &tx)
        {
            Ok(None) => { /* no op */ }
            Ok(Some(existing)) => {
                log::error!(
                    "Cannot create resource, because resource {} already has external id {external_id} for source {}",
                    existing.id,
                    record.source
                );
                return Err(CreateResourceError::AlreadyExists);
            }
            Err(_) => return Err(CreateResourceError::DbError),
        }
    }
    match find_missing_tag(&tag_ids, &tx) {
        Ok(None) => { /* no op */ }
        Ok(Some(tag_id)) => return Err(CreateResourceError::TagNotFound(tag_id)),
        Err(_) => return Err(CreateResourceError::DbError),
    };
    let saved = resource_repository::create_resource(&record, &tx)
        .and_then(|_| resource_repository::set_resource_tags(&record.id, &tag_ids, &tx))
        .and_then(|_| resource_repository::hydrate_resource(record, &tx));
    let resource = match saved {
        Ok(resource) => resource,
        Err(e) => {
            log::error!(
                "Failed to create a new resource! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(CreateResourceError::DbError);
        }
    };
    tx.commit().map_err(|_| CreateResourceError::DbError)?;
    Ok(resource)
}

/// will return the resource with the passed id. Tombstones are returned too
pub fn get_resource(id: &str) -> Result<Resource, GetResourceError> {
    let con = open_connection().map_err(|_| GetResourceError::DbError)?;
    match load_resource(id, &con) {
        Ok(resource) => Ok(resource),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("No resource with id {id} exists!");
            Err(GetResourceError::ResourceNotFound)
        }
        Err(e) => {
            log::error!(
                "Could not retrieve resource with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetResourceError::DbError)
        }
    }
}

/// will return the resource that `source` knows by `external_id`
pub fn get_resource_by_external_id(
    source: &str,
    external_id: &str,
) -> Result<Resource, GetResourceError> {
    let con = open_connection().map_err(|_| GetResourceError::DbError)?;
    let record = match resource_repository::get_resource_by_external_id(source, external_id, &con)
    {
        Ok(Some(record)) => record,
        Ok(None) => return Err(GetResourceError::ResourceNotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve resource {external_id} from {source}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(GetResourceError::DbError);
        }
    };
    resource_repository::hydrate_resource(record, &con).map_err(|_| GetResourceError::DbError)
}

/// returns every resource matching `query`, oldest first.
///
/// Filtering by a tag also matches resources tagged with any descendant of that tag
pub fn search_resources(query: ResourceQuery) -> Result<Vec<Resource>, SearchResourcesError> {
    let con = open_connection().map_err(|_| SearchResourcesError::DbError)?;
    let allowed_ids: Option<HashSet<String>> = match &query.tag_id {
        Some(tag_id) => Some(resource_ids_under_tag(tag_id, &con)?),
        None => None,
    };
    let records = resource_repository::search_resources(&query, &con).map_err(|e| {
        log::error!(
            "Failed to search resources with {query:?}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        SearchResourcesError::DbError
    })?;
    records
        .into_iter()
        .filter(|record| match &allowed_ids {
            Some(ids) => ids.contains(&record.id),
            None => true,
        })
        .map(|record| resource_repository::hydrate_resource(record, &con))
        .collect::<Result<Vec<Resource>, rusqlite::Error>>()
        .map_err(|e| {
            log::error!(
                "Failed to pull tags for searched resources! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            SearchResourcesError::DbError
        })
}

/// applies the partial update in `request` to the resource with the passed id
pub fn update_resource(
    id: &str,
    request: UpdateResourceRequest,
) -> Result<Resource, UpdateResourceError> {
    let mut con = open_connection().map_err(|_| UpdateResourceError::DbError)?;
    let tx = con.transaction().map_err(|_| UpdateResourceError::DbError)?;
    let mut record = match resource_repository::get_resource(id, &tx) {
        Ok(record) => record,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Could not update resource with id {id}, because it does not exist!");
            return Err(UpdateResourceError::ResourceNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not update resource with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(UpdateResourceError::DbError);
        }
    };
    if let Some(source) = request.source {
        record.source = require("source", &source).map_err(UpdateResourceError::Validation)?;
    }
    if let Some(title) = request.title {
        record.title = require("title", &title).map_err(UpdateResourceError::Validation)?;
    }
    if let Some(external_id) = request.external_id {
        record.external_id = optional_id(external_id).map_err(UpdateResourceError::Validation)?;
    }
    apply_patch(&mut record.description, request.description);
    apply_patch(&mut record.url, request.url);
    if let Some(status) = request.status {
        record.status = status;
    }
    // the source or external id may have changed, so make sure the pair still belongs only to this resource
    if let Some(external_id) = &record.external_id {
        match resource_repository::get_resource_by_external_id(&record.source, external_id, &tx)
        {
            Ok(Some(existing)) if existing.id != record.id => {
                return Err(UpdateResourceError::AlreadyExists)
            }
            Ok(_) => { /* no op */ }
            Err(_) => return Err(UpdateResourceError::DbError),
        }
    }
    let tag_ids = request.tag_ids.map(dedup_tag_ids);
    if let Some(tag_ids) = &tag_ids {
        match find_missing_tag(tag_ids, &tx) {
            Ok(None) => { /* no op */ }
            Ok(Some(tag_id)) => return Err(UpdateResourceError::TagNotFound(tag_id)),
            Err(_) => return Err(UpdateResourceError::DbError),
        };
    }
    let saved = resource_repository::update_resource(&record, &tx)
        .and_then(|_| match &tag_ids {
            Some(tag_ids) => resource_repository::set_resource_tags(&record.id, tag_ids, &tx),
            None => Ok(()),
        })
        .and_then(|_| resource_repository::hydrate_resource(record, &tx));
    let resource = match saved {
        Ok(resource) => resource,
        Err(e) => {
            log::error!(
                "Could not update resource with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(UpdateResourceError::DbError);
        }
    };
    tx.commit().map_err(|_| UpdateResourceError::DbError)?;
    Ok(resource)
}

/// moves the resource to `status`, no matter what its current status is
pub fn set_status(id: &str, status: ResourceStatus) -> Result<Resource, StatusChangeError> {
    transition(id, status, |_| true)
}

/// marks an active resource as outdated. Marking a stale resource again does nothing, but tombstones can't be marked stale
pub fn mark_stale(id: &str) -> Result<Resource, StatusChangeError> {
    transition(id, ResourceStatus::Stale, |from| !from.is_deleted())
}

/// soft-deletes the resource by turning it into a tombstone. The resource can still be retrieved, and can be restored
pub fn delete_resource(id: &str) -> Result<(), StatusChangeError> {
    transition(id, ResourceStatus::Deleted, |_| true).map(|_| ())
}

/// makes a stale resource or a tombstone active again
pub fn restore_resource(id: &str) -> Result<Resource, StatusChangeError> {
    transition(id, ResourceStatus::Active, |_| true)
}

/// creates or refreshes the resource that `request.source` knows by `request.external_id`.
///
/// An existing resource gets its title, description, url, and tags replaced, and becomes active again even if it was a tombstone.
/// Its id and creation date never change
pub fn index_resource(request: IndexResourceRequest) -> Result<Resource, IndexResourceError> {
    let source = require("source", &request.source).map_err(IndexResourceError::Validation)?;
    let external_id =
        require("externalId", &request.external_id).map_err(IndexResourceError::Validation)?;
    let title = require("title", &request.title).map_err(IndexResourceError::Validation)?;
    let tag_ids = dedup_tag_ids(request.tag_ids);
    let mut con = open_connection().map_err(|_| IndexResourceError::DbError)?;
    let tx = con.transaction().map_err(|_| IndexResourceError::DbError)?;
    match find_missing_tag(&tag_ids, &tx) {
        Ok(None) => { /* no op */ }
        Ok(Some(tag_id)) => return Err(IndexResourceError::TagNotFound(tag_id)),
        Err(_) => return Err(IndexResourceError::DbError),
    };
    let existing = resource_repository::get_resource_by_external_id(&source, &external_id, &tx)
        .map_err(|_| IndexResourceError::DbError)?;
    let saved = match existing {
        Some(mut record) => {
            if record.status != ResourceStatus::Active {
                log::info!(
                    "Re-indexing {} resource {} from {source}",
                    record.status,
                    record.id
                );
            }
            record.title = title;
            record.description = request.description;
            record.url = request.url;
            record.status = ResourceStatus::Active;
            resource_repository::update_resource(&record, &tx).map(|_| record)
        }
        None => {
            let record = ResourceRecord {
                id: Uuid::new_v4().to_string(),
                source,
                external_id: Some(external_id),
                title,
                description: request.description,
                url: request.url,
                status: ResourceStatus::Active,
                created_at: Utc::now().trunc_subsecs(0),
            };
            resource_repository::create_resource(&record, &tx).map(|_| record)
        }
    }
    .and_then(|record| {
        resource_repository::set_resource_tags(&record.id, &tag_ids, &tx)?;
        resource_repository::hydrate_resource(record, &tx)
    });
    let resource = match saved {
        Ok(resource) => resource,
        Err(e) => {
            log::error!(
                "Failed to index resource! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(IndexResourceError::DbError);
        }
    };
    tx.commit().map_err(|_| IndexResourceError::DbError)?;
    Ok(resource)
}

// private functions

fn load_resource(id: &str, con: &Connection) -> Result<Resource, rusqlite::Error> {
    let record = resource_repository::get_resource(id, con)?;
    resource_repository::hydrate_resource(record, con)
}

/// moves the resource to `to` if `allowed` says the current status can move there. Moving to the current status is a no-op
fn transition(
    id: &str,
    to: ResourceStatus,
    allowed: impl Fn(ResourceStatus) -> bool,
) -> Result<Resource, StatusChangeError> {
    let con = open_connection().map_err(|_| StatusChangeError::DbError)?;
    let record = match resource_repository::get_resource(id, &con) {
        Ok(record) => record,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            log::error!("Could not change status of resource {id}, because it does not exist!");
            return Err(StatusChangeError::ResourceNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not change status of resource {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(StatusChangeError::DbError);
        }
    };
    let from = record.status;
    if from != to {
        if !allowed(from) {
            log::error!("Resource {id} cannot move from {from} to {to}");
            return Err(StatusChangeError::InvalidTransition { from, to });
        }
        if let Err(e) = resource_repository::update_status(id, to, &con) {
            log::error!(
                "Could not change status of resource {id} to {to}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(StatusChangeError::DbError);
        }
    }
    load_resource(id, &con).map_err(|_| StatusChangeError::DbError)
}

/// every resource id tagged with `tag_id` or one of its descendants
fn resource_ids_under_tag(
    tag_id: &str,
    con: &Connection,
) -> Result<HashSet<String>, SearchResourcesError> {
    match tag_repository::tag_exists(tag_id, con) {
        Ok(true) => { /* no op */ }
        Ok(false) => return Err(SearchResourcesError::TagNotFound),
        Err(_) => return Err(SearchResourcesError::DbError),
    };
    let mut tag_ids =
        tag_repository::get_descendant_ids(tag_id, con).map_err(|_| SearchResourcesError::DbError)?;
    tag_ids.insert(tag_id.to_string());
    resource_repository::get_resource_ids_with_tags(&tag_ids, con).map_err(|e| {
        log::error!(
            "Failed to retrieve resources tagged with {tag_id}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        SearchResourcesError::DbError
    })
}

/// removes repeated tag ids, keeping the first occurrence so display order is preserved
fn dedup_tag_ids(tag_ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tag_ids
        .into_iter()
        .filter(|tag_id| seen.insert(tag_id.clone()))
        .collect()
}

/// returns the first tag id that doesn't exist in the database, if any
fn find_missing_tag(tag_ids: &[String], con: &Connection) -> Result<Option<String>, rusqlite::Error> {
    for tag_id in tag_ids {
        if !tag_repository::tag_exists(tag_id, con)? {
            log::error!("Tag {tag_id} does not exist!");
            return Ok(Some(tag_id.clone()));
        }
    }
    Ok(None)
}

/// returns the trimmed value, or why it isn't valid
fn require(field: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} cannot be blank"));
    }
    Ok(value.to_string())
}

/// like [`require`], but `None` is allowed. A blank external id must be sent as `null` instead
fn optional_id(value: Option<String>) -> Result<Option<String>, String> {
    value.map(|value| require("externalId", &value)).transpose()
}
