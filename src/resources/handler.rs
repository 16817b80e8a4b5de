use rocket::serde::json::{self, Json};

use crate::guard::{HeaderAuth, ValidateResult, NO_PASSWORD_MESSAGE};
use crate::model::error::resource_errors::{
    CreateResourceError, GetResourceError, IndexResourceError, SearchResourcesError,
    StatusChangeError, UpdateResourceError,
};
use crate::model::request::resource_requests::{
    CreateResourceRequest, IndexResourceRequest, StatusChangeRequest, UpdateResourceRequest,
};
use crate::model::response::resource_responses::{
    CreateResourceResponse, DeleteResourceResponse, GetResourceResponse, IndexResourceResponse,
    SearchResourcesResponse, StatusChangeResponse, UpdateResourceResponse,
};
use crate::model::response::BasicMessage;
use crate::model::ResourceStatus;
use crate::resources::{service, ResourceQuery};

/// returns the message to send back if `auth` isn't valid
fn check_auth(auth: HeaderAuth) -> Option<String> {
    match auth.validate() {
        ValidateResult::Ok => None,
        ValidateResult::NoPasswordSet => Some(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => Some("Bad Credentials".to_string()),
    }
}

#[get("/<id>")]
pub fn get_resource(id: &str, auth: HeaderAuth) -> GetResourceResponse {
    if let Some(message) = check_auth(auth) {
        return GetResourceResponse::Unauthorized(message);
    }
    match service::get_resource(id) {
        Ok(resource) => GetResourceResponse::Success(Json::from(resource)),
        Err(GetResourceError::ResourceNotFound) => GetResourceResponse::ResourceNotFound(
            BasicMessage::new("The resource with the passed id could not be found."),
        ),
        Err(GetResourceError::DbError) => GetResourceResponse::ResourceDbError(BasicMessage::new(
            "Failed to pull resource info from database. Check server logs for details",
        )),
    }
}

/// looks a resource up by the id its source gave it
#[get("/lookup?<source>&<external_id>")]
pub fn lookup_resource(source: &str, external_id: &str, auth: HeaderAuth) -> GetResourceResponse {
    if let Some(message) = check_auth(auth) {
        return GetResourceResponse::Unauthorized(message);
    }
    match service::get_resource_by_external_id(source, external_id) {
        Ok(resource) => GetResourceResponse::Success(Json::from(resource)),
        Err(GetResourceError::ResourceNotFound) => GetResourceResponse::ResourceNotFound(
            BasicMessage::new("No resource from that source has the passed external id."),
        ),
        Err(GetResourceError::DbError) => GetResourceResponse::ResourceDbError(BasicMessage::new(
            "Failed to pull resource info from database. Check server logs for details",
        )),
    }
}

#[get("/?<status>&<source>&<tag>&<include_deleted>")]
pub fn search_resources(
    status: Option<&str>,
    source: Option<&str>,
    tag: Option<&str>,
    include_deleted: Option<bool>,
    auth: HeaderAuth,
) -> SearchResourcesResponse {
    if let Some(message) = check_auth(auth) {
        return SearchResourcesResponse::Unauthorized(message);
    }
    let status = match status.map(str::parse::<ResourceStatus>).transpose() {
        Ok(status) => status,
        Err(e) => return SearchResourcesResponse::BadRequest(BasicMessage::new(&e.to_string())),
    };
    let query = ResourceQuery {
        status,
        source: source.map(str::to_string),
        tag_id: tag.map(str::to_string),
        include_deleted: include_deleted.unwrap_or(false),
    };
    match service::search_resources(query) {
        Ok(resources) => SearchResourcesResponse::Success(Json::from(resources)),
        Err(SearchResourcesError::TagNotFound) => SearchResourcesResponse::TagNotFound(
            BasicMessage::new("The tag with the passed id could not be found."),
        ),
        Err(SearchResourcesError::DbError) => {
            SearchResourcesResponse::ResourceDbError(BasicMessage::new(
                "Failed to search resources in database. Check server logs for details",
            ))
        }
    }
}

#[post("/", data = "<resource>")]
pub fn create_resource(
    resource: Json<CreateResourceRequest>,
    auth: HeaderAuth,
) -> CreateResourceResponse {
    if let Some(message) = check_auth(auth) {
        return CreateResourceResponse::Unauthorized(message);
    }
    match service::create_resource(resource.into_inner()) {
        Ok(resource) => CreateResourceResponse::Success(Json::from(resource)),
        Err(CreateResourceError::Validation(message)) => {
            CreateResourceResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(CreateResourceError::AlreadyExists) => {
            CreateResourceResponse::BadRequest(BasicMessage::new(
                "A resource with that id, or with that source and external id, already exists.",
            ))
        }
        Err(CreateResourceError::TagNotFound(tag_id)) => CreateResourceResponse::TagNotFound(
            BasicMessage::new(&format!("No tag with id {tag_id} was found.")),
        ),
        Err(CreateResourceError::DbError) => {
            CreateResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to create resource in database. Check server logs for details",
            ))
        }
    }
}

/// creates or refreshes a resource, keyed on its source and external id
#[post("/index", data = "<resource>")]
pub fn index_resource(
    resource: Json<IndexResourceRequest>,
    auth: HeaderAuth,
) -> IndexResourceResponse {
    if let Some(message) = check_auth(auth) {
        return IndexResourceResponse::Unauthorized(message);
    }
    match service::index_resource(resource.into_inner()) {
        Ok(resource) => IndexResourceResponse::Success(Json::from(resource)),
        Err(IndexResourceError::Validation(message)) => {
            IndexResourceResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(IndexResourceError::TagNotFound(tag_id)) => IndexResourceResponse::TagNotFound(
            BasicMessage::new(&format!("No tag with id {tag_id} was found.")),
        ),
        Err(IndexResourceError::DbError) => {
            IndexResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to index resource in database. Check server logs for details",
            ))
        }
    }
}

#[put("/<id>", data = "<resource>")]
pub fn update_resource(
    id: &str,
    resource: Json<UpdateResourceRequest>,
    auth: HeaderAuth,
) -> UpdateResourceResponse {
    if let Some(message) = check_auth(auth) {
        return UpdateResourceResponse::Unauthorized(message);
    }
    match service::update_resource(id, resource.into_inner()) {
        Ok(resource) => UpdateResourceResponse::Success(Json::from(resource)),
        Err(UpdateResourceError::ResourceNotFound) => UpdateResourceResponse::NotFound(
            BasicMessage::new("No resource with that id was found."),
        ),
        Err(UpdateResourceError::TagNotFound(tag_id)) => UpdateResourceResponse::NotFound(
            BasicMessage::new(&format!("No tag with id {tag_id} was found.")),
        ),
        Err(UpdateResourceError::Validation(message)) => {
            UpdateResourceResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(UpdateResourceError::AlreadyExists) => {
            UpdateResourceResponse::BadRequest(BasicMessage::new(
                "Another resource from that source already has that external id.",
            ))
        }
        Err(UpdateResourceError::DbError) => {
            UpdateResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to update resource in database. Check server logs for details",
            ))
        }
    }
}

/// an unknown status in the body is a 400, like an unknown status in the search query
#[put("/<id>/status", data = "<request>")]
pub fn set_status(
    id: &str,
    request: Result<Json<StatusChangeRequest>, json::Error<'_>>,
    auth: HeaderAuth,
) -> StatusChangeResponse {
    if let Some(message) = check_auth(auth) {
        return StatusChangeResponse::Unauthorized(message);
    }
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            return StatusChangeResponse::BadRequest(BasicMessage::new(&format!(
                "Invalid status change body: {e}"
            )))
        }
    };
    status_change_response(service::set_status(id, request.status))
}

#[post("/<id>/stale")]
pub fn mark_stale(id: &str, auth: HeaderAuth) -> StatusChangeResponse {
    if let Some(message) = check_auth(auth) {
        return StatusChangeResponse::Unauthorized(message);
    }
    status_change_response(service::mark_stale(id))
}

#[post("/<id>/restore")]
pub fn restore_resource(id: &str, auth: HeaderAuth) -> StatusChangeResponse {
    if let Some(message) = check_auth(auth) {
        return StatusChangeResponse::Unauthorized(message);
    }
    status_change_response(service::restore_resource(id))
}

/// turns the resource into a tombstone. It is not removed from the database
#[delete("/<id>")]
pub fn delete_resource(id: &str, auth: HeaderAuth) -> DeleteResourceResponse {
    if let Some(message) = check_auth(auth) {
        return DeleteResourceResponse::Unauthorized(message);
    }
    match service::delete_resource(id) {
        Ok(()) => DeleteResourceResponse::Success(()),
        Err(StatusChangeError::ResourceNotFound) => DeleteResourceResponse::ResourceNotFound(
            BasicMessage::new("No resource with that id was found."),
        ),
        Err(_) => DeleteResourceResponse::ResourceDbError(BasicMessage::new(
            "Failed to delete resource from database. Check server logs for details.",
        )),
    }
}

fn status_change_response(
    res: Result<crate::model::Resource, StatusChangeError>,
) -> StatusChangeResponse {
    match res {
        Ok(resource) => StatusChangeResponse::Success(Json::from(resource)),
        Err(StatusChangeError::ResourceNotFound) => StatusChangeResponse::ResourceNotFound(
            BasicMessage::new("No resource with that id was found."),
        ),
        Err(StatusChangeError::InvalidTransition { from, to }) => {
            StatusChangeResponse::InvalidTransition(BasicMessage::new(&format!(
                "A {from} resource cannot be marked {to}."
            )))
        }
        Err(StatusChangeError::DbError) => {
            StatusChangeResponse::ResourceDbError(BasicMessage::new(
                "Failed to change resource status in database. Check server logs for details",
            ))
        }
    }
}
