#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use handler::api_handler::{api_version, set_password};
use resources::handler::{
    create_resource, delete_resource, get_resource, index_resource, lookup_resource, mark_stale,
    restore_resource, search_resources, set_status, update_resource,
};
use tags::handler::{create_tag, delete_tag, get_tag, get_tags, update_tag};

pub mod config;
pub mod guard;
pub mod handler;
pub mod model;
pub mod repository;
pub mod resources;
pub mod service;
pub mod tags;
#[cfg(test)]
mod test;

/// builds the http server with every route mounted.
///
/// The database is _not_ initialized here, callers need to run [`repository::initialize_db`] first
pub fn rocket() -> Rocket<Build> {
    rocket::build()
        .mount("/api", routes![api_version, set_password])
        .mount(
            "/tags",
            routes![get_tag, get_tags, create_tag, update_tag, delete_tag],
        )
        .mount(
            "/resources",
            routes![
                get_resource,
                lookup_resource,
                search_resources,
                create_resource,
                index_resource,
                update_resource,
                set_status,
                mark_stale,
                restore_resource,
                delete_resource
            ],
        )
}
