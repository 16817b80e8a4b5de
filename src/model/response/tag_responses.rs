use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, NoContent};
use crate::model::Tag;

#[derive(Responder)]
pub enum GetTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Tag>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetTagsResponse {
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Vec<Tag>>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum CreateTagResponse {
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 201, content_type = "json")]
    Success(Json<Tag>),
}

#[derive(Responder)]
pub enum UpdateTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    Conflict(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Tag>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteTagResponse {
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<BasicMessage>),
    #[response(status = 204)]
    Success(NoContent),
}
