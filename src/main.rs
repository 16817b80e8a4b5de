use std::error::Error;
use std::io;

use index_all::config::INDEX_ALL_CONFIG;
use index_all::model::APP_NAME;
use index_all::repository::initialize_db;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger()?;
    log::info!("Starting {APP_NAME} {}...", env!("CARGO_PKG_VERSION"));
    initialize_db()?;
    let _ = index_all::rocket().launch().await?;
    Ok(())
}

/// sends logs to stdout, and to the configured log file if there is one
fn setup_logger() -> Result<(), Box<dyn Error>> {
    let logging = &INDEX_ALL_CONFIG.logging;
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(logging.level_filter())
        // rocket is very chatty at info
        .level_for("rocket", log::LevelFilter::Warn)
        .level_for("_", log::LevelFilter::Warn)
        .chain(io::stdout());
    if let Some(file) = &logging.file {
        dispatch = dispatch.chain(fern::log_file(file)?);
    }
    dispatch.apply()?;
    Ok(())
}
