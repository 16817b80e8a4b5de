use std::backtrace::Backtrace;

use crate::guard::HeaderAuth;
use crate::model::request::NewAuth;
use crate::guard::CheckAuthResult;
use crate::repository::{metadata_repository, open_connection};

#[derive(PartialEq, Debug)]
pub enum CreatePasswordError {
    AlreadyExists,
    Failure,
}

pub fn create_password(auth: NewAuth) -> Result<(), CreatePasswordError> {
    let con = match open_connection() {
        Ok(con) => con,
        Err(e) => {
            log::error!(
                "Failed to open database to set password: {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(CreatePasswordError::Failure);
        }
    };
    match metadata_repository::get_auth(&con) {
        Ok(_) => return Err(CreatePasswordError::AlreadyExists),
        Err(rusqlite::Error::QueryReturnedNoRows) => { /* no password yet, good to go */ }
        Err(e) => {
            log::error!(
                "Failed to check auth in database: {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(CreatePasswordError::Failure);
        }
    };
    let auth = HeaderAuth {
        username: auth.username,
        password: auth.password,
    };
    metadata_repository::set_auth(auth, &con).map_err(|_| CreatePasswordError::Failure)
}

/// Checks if the passed `auth` object matches the password in the database
pub fn check_auth(auth: HeaderAuth) -> CheckAuthResult {
    let con = match open_connection() {
        Ok(con) => con,
        Err(e) => {
            log::error!(
                "Failed to open database to check auth: {e:?}\n{}",
                Backtrace::force_capture()
            );
            return CheckAuthResult::DbError;
        }
    };
    metadata_repository::check_auth(auth, &con).unwrap_or(CheckAuthResult::DbError)
}
