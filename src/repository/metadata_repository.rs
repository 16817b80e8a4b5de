use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::guard::HeaderAuth;
use crate::guard::CheckAuthResult;

/// returns the current version of the database as a String
pub fn get_version(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
}

/// retrieves the hashed authentication string for requests in the database
pub fn get_auth(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_auth_hash.sql"),
        [],
        |row| row.get(0),
    )
}

/// checks if the passed `auth` matches the hashed auth string in the database
pub fn check_auth(auth: HeaderAuth, con: &Connection) -> Result<CheckAuthResult, rusqlite::Error> {
    let hash = auth.hash();
    match get_auth(con) {
        Ok(db_hash) if db_hash == hash => Ok(CheckAuthResult::Valid),
        Ok(_) => Ok(CheckAuthResult::Invalid),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(CheckAuthResult::Missing),
        Err(e) => {
            log::error!(
                "Failed to check auth in database: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// saves the hash of `auth`. Callers need to make sure a password hasn't already been set
pub fn set_auth(auth: HeaderAuth, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut statement = con.prepare(include_str!("../assets/queries/metadata/set_auth_hash.sql"))?;
    match statement.execute([auth.hash()]) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to set password. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}
