use rocket::serde::json::Json;
use rocket::serde::Serialize;

use crate::model::response::{BasicMessage, NoContent};
use crate::model::APP_NAME;

#[derive(Serialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    pub name: &'static str,
    pub version: &'static str,
}

impl ApiVersion {
    pub fn new() -> ApiVersion {
        ApiVersion {
            name: APP_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Responder)]
pub enum SetPasswordResponse {
    #[response(status = 201)]
    Created(NoContent),
    #[response(status = 400, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
