use rocket::serde::json::Json;

use crate::model::request::NewAuth;
use crate::model::response::api_responses::{ApiVersion, SetPasswordResponse};
use crate::model::response::BasicMessage;
use crate::service::api_service::{self, CreatePasswordError};

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion::new())
}

#[post("/password", data = "<auth>")]
pub fn set_password(auth: Json<NewAuth>) -> SetPasswordResponse {
    match api_service::create_password(auth.into_inner()) {
        Ok(()) => SetPasswordResponse::Created(()),
        Err(CreatePasswordError::AlreadyExists) => SetPasswordResponse::AlreadyExists(
            BasicMessage::new("A password has already been set."),
        ),
        Err(CreatePasswordError::Failure) => SetPasswordResponse::Failure(BasicMessage::new(
            "Failed to set the password. Check server logs for details",
        )),
    }
}
