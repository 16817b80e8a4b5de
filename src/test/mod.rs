use std::fs::remove_file;
use std::path::Path;

use crate::model::request::resource_requests::CreateResourceRequest;
use crate::model::request::tag_requests::CreateTagRequest;
use crate::model::{Resource, Tag};
use crate::repository::initialize_db;
use crate::resources::service as resource_service;
use crate::tags::service as tag_service;

/// username:password
#[cfg(test)]
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

#[cfg(test)]
pub fn create_tag_db_entry(name: &str) -> Tag {
    tag_service::create_tag(CreateTagRequest {
        name: name.to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[cfg(test)]
pub fn create_child_tag_db_entry(name: &str, parent_id: &str) -> Tag {
    tag_service::create_tag(CreateTagRequest {
        name: name.to_string(),
        parent_ids: [parent_id.to_string()].into(),
        ..Default::default()
    })
    .unwrap()
}

#[cfg(test)]
pub fn create_resource_request(source: &str, title: &str) -> CreateResourceRequest {
    CreateResourceRequest {
        id: None,
        source: source.to_string(),
        external_id: None,
        title: title.to_string(),
        description: None,
        url: None,
        status: None,
        created_at: None,
        tag_ids: vec![],
    }
}

#[cfg(test)]
pub fn create_resource_db_entry(source: &str, title: &str, tag_ids: Vec<String>) -> Resource {
    resource_service::create_resource(CreateResourceRequest {
        tag_ids,
        ..create_resource_request(source, title)
    })
    .unwrap()
}

#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
}
