use std::path::Path;

use rusqlite::{Connection, OpenFlags, Result};

pub mod metadata_repository;

/// the schema version this build of the application creates
pub const DATABASE_VERSION: u64 = 1;

/// opens a new connection to the database, with foreign keys enforced
#[cfg(not(test))]
pub fn open_connection() -> Result<Connection> {
    use crate::config::INDEX_ALL_CONFIG;

    let con = Connection::open_with_flags(
        Path::new(INDEX_ALL_CONFIG.database.location.as_str()),
        OpenFlags::default(),
    )?;
    con.execute_batch("pragma foreign_keys = on;")?;
    Ok(con)
}

/// each test thread gets its own database file, so tests can run in parallel
#[cfg(test)]
pub fn open_connection() -> Result<Connection> {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    let con = Connection::open_with_flags(Path::new(db_name.as_str()), OpenFlags::default())?;
    con.execute_batch("pragma foreign_keys = on;")?;
    Ok(con)
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    con.execute_batch(include_str!("../assets/init.sql"))
}

/// handles checking if the database exists and is up to the correct version.
/// If not, it creates the tables
pub fn initialize_db() -> Result<()> {
    let con = open_connection()?;
    match metadata_repository::get_version(&con) {
        Ok(version) => {
            log::info!("Found database at version {version}");
            if version.parse::<u64>().unwrap_or(0) > DATABASE_VERSION {
                log::warn!(
                    "Database version {version} is newer than the supported version {DATABASE_VERSION}"
                );
            }
        }
        // tables haven't been created yet
        Err(_) => {
            log::info!("Creating database at version {DATABASE_VERSION}...");
            create_db(&con)?;
        }
    };
    Ok(())
}
