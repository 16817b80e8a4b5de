use rocket::serde::json::Json;

use crate::guard::{HeaderAuth, ValidateResult, NO_PASSWORD_MESSAGE};
use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, GetTagError, UpdateTagError,
};
use crate::model::request::tag_requests::{CreateTagRequest, UpdateTagRequest};
use crate::model::response::tag_responses::{
    CreateTagResponse, DeleteTagResponse, GetTagResponse, GetTagsResponse, UpdateTagResponse,
};
use crate::model::response::BasicMessage;
use crate::tags::service;

#[get("/<id>")]
pub fn get_tag(id: &str, auth: HeaderAuth) -> GetTagResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::NoPasswordSet => {
            return GetTagResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string())
        }
        ValidateResult::Invalid => {
            return GetTagResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match service::get_tag(id) {
        Ok(tag) => GetTagResponse::Success(Json::from(tag)),
        Err(GetTagError::TagNotFound) => GetTagResponse::TagNotFound(BasicMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(GetTagError::DbError) => GetTagResponse::TagDbError(BasicMessage::new(
            "Failed to pull tag info from database. Check server logs for details",
        )),
    }
}

/// lists every tag, or only the tag matching `name` (by name or alias) if it's passed
#[get("/?<name>")]
pub fn get_tags(name: Option<&str>, auth: HeaderAuth) -> GetTagsResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::NoPasswordSet => {
            return GetTagsResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string())
        }
        ValidateResult::Invalid => {
            return GetTagsResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let res = match name {
        Some(name) => match service::find_tag(name) {
            Ok(tag) => Ok(vec![tag]),
            Err(GetTagError::TagNotFound) => Ok(vec![]),
            Err(e) => Err(e),
        },
        None => service::get_all_tags(),
    };
    match res {
        Ok(tags) => GetTagsResponse::Success(Json::from(tags)),
        Err(_) => GetTagsResponse::TagDbError(BasicMessage::new(
            "Failed to pull tag info from database. Check server logs for details",
        )),
    }
}

#[post("/", data = "<tag>")]
pub fn create_tag(tag: Json<CreateTagRequest>, auth: HeaderAuth) -> CreateTagResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::NoPasswordSet => {
            return CreateTagResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string())
        }
        ValidateResult::Invalid => {
            return CreateTagResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match service::create_tag(tag.into_inner()) {
        Ok(tag) => CreateTagResponse::Success(Json::from(tag)),
        Err(CreateTagError::Validation(message)) => {
            CreateTagResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(CreateTagError::AlreadyExists) => CreateTagResponse::BadRequest(BasicMessage::new(
            "A tag with that id or name already exists.",
        )),
        Err(CreateTagError::ParentNotFound(parent_id)) => CreateTagResponse::ParentNotFound(
            BasicMessage::new(&format!("No parent tag with id {parent_id} was found.")),
        ),
        Err(CreateTagError::DbError) => CreateTagResponse::TagDbError(BasicMessage::new(
            "Failed to create tag info in database. Check server logs for details",
        )),
    }
}

#[put("/<id>", data = "<tag>")]
pub fn update_tag(id: &str, tag: Json<UpdateTagRequest>, auth: HeaderAuth) -> UpdateTagResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::NoPasswordSet => {
            return UpdateTagResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string())
        }
        ValidateResult::Invalid => {
            return UpdateTagResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match service::update_tag(id, tag.into_inner()) {
        Ok(tag) => UpdateTagResponse::Success(Json::from(tag)),
        Err(UpdateTagError::TagNotFound) => {
            UpdateTagResponse::TagNotFound(BasicMessage::new("No tag with that id was found."))
        }
        Err(UpdateTagError::ParentNotFound(parent_id)) => UpdateTagResponse::TagNotFound(
            BasicMessage::new(&format!("No parent tag with id {parent_id} was found.")),
        ),
        Err(UpdateTagError::NewNameAlreadyExists) => UpdateTagResponse::BadRequest(
            BasicMessage::new("A tag with that name already exists."),
        ),
        Err(UpdateTagError::Validation(message)) => {
            UpdateTagResponse::BadRequest(BasicMessage::new(&message))
        }
        Err(UpdateTagError::CycleDetected(parent_id)) => {
            UpdateTagResponse::Conflict(BasicMessage::new(&format!(
                "Tag {parent_id} cannot be a parent of tag {id}, because {id} would become its own ancestor."
            )))
        }
        Err(UpdateTagError::DbError) => UpdateTagResponse::TagDbError(BasicMessage::new(
            "Failed to update tag in database. Check server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub fn delete_tag(id: &str, auth: HeaderAuth) -> DeleteTagResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::NoPasswordSet => {
            return DeleteTagResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string())
        }
        ValidateResult::Invalid => {
            return DeleteTagResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match service::delete_tag(id) {
        Ok(()) => DeleteTagResponse::Success(()),
        Err(DeleteTagError::TagNotFound) => {
            DeleteTagResponse::TagNotFound(BasicMessage::new("No tag with that id was found."))
        }
        Err(DeleteTagError::DbError) => DeleteTagResponse::TagDbError(BasicMessage::new(
            "Failed to delete tag from database. Check server logs for details.",
        )),
    }
}
