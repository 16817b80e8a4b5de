use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, NoContent};
use crate::model::Resource;

#[derive(Responder)]
pub enum GetResourceResponse {
    #[response(status = 404, content_type = "json")]
    ResourceNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Resource>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum SearchResourcesResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Vec<Resource>>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum CreateResourceResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 201, content_type = "json")]
    Success(Json<Resource>),
}

#[derive(Responder)]
pub enum IndexResourceResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 200, content_type = "json")]
    Success(Json<Resource>),
}

#[derive(Responder)]
pub enum UpdateResourceResponse {
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Resource>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum StatusChangeResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    ResourceNotFound(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    InvalidTransition(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Resource>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteResourceResponse {
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 404, content_type = "json")]
    ResourceNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 204)]
    Success(NoContent),
}
