use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{async_trait, Request};
use sha2::{Digest, Sha256};

use crate::service::api_service::check_auth;

pub static NO_PASSWORD_MESSAGE: &str = "No password has been set. you can set a username and password by making a POST to `/api/password`";

/// how the stored credential hash compared to a request's `HeaderAuth`
#[derive(PartialEq, Debug)]
pub enum CheckAuthResult {
    Valid,
    Invalid,
    /// nothing has been posted to `/api/password` yet
    Missing,
    /// the hash couldn't be read, which handlers treat the same as bad credentials
    DbError,
}

/// used to represent the result of calling `HeaderAuth::validate`
#[derive(Debug, PartialEq)]
pub enum ValidateResult {
    Ok,
    NoPasswordSet,
    Invalid,
}

/// basic auth credentials pulled from the `Authorization` header
#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.trim_start_matches("Basic ").trim();
        let decoded = match STANDARD.decode(stripped_header) {
            Ok(value) => value,
            Err(_) => return Err("Invalid basic auth format: not base64"),
        };
        let combined = match String::from_utf8(decoded) {
            Ok(combined) => combined,
            Err(_) => return Err("Invalid basic auth format: not utf-8"),
        };
        let split = combined.split(':').map(str::trim).collect::<Vec<&str>>();
        // if there aren't exactly 2 parts, then something is wrong here
        if split.len() != 2 || split.contains(&"") {
            return Err("Invalid basic auth format: missing username or password");
        }
        Ok(HeaderAuth {
            username: split[0].to_string(),
            password: split[1].to_string(),
        })
    }

    /// compares our value with that in the database
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(self) -> ValidateResult {
        match check_auth(self) {
            CheckAuthResult::Valid => ValidateResult::Ok,
            CheckAuthResult::Missing => ValidateResult::NoPasswordSet,
            CheckAuthResult::Invalid | CheckAuthResult::DbError => ValidateResult::Invalid,
        }
    }

    /// the sha256 hash of `username:password`, which is what gets stored in the database
    pub fn hash(&self) -> String {
        let combined = format!("{}:{}", self.username.trim(), self.password.trim());
        let mut hasher = Sha256::new();
        hasher.update(combined.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if value.starts_with("Basic") => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}
