use std::path::PathBuf;

use crate::config::ApiConfig;

/// Returns the path to the smsdesk database
///
/// An explicit `[database] path` in the config wins. Otherwise:
///
/// - **macOS**: `~/Library/Application Support/smsdesk/db.sqlite3`
/// - **Linux**: `~/.local/share/smsdesk/db.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\smsdesk\db.sqlite3`
pub fn get_db_path(config: &ApiConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = config.database.as_ref().and_then(|d| d.path.clone()) {
        return Ok(path);
    }

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("smsdesk").join("db.sqlite3"))
}

/// Initialize the database connection
pub fn initialize_database(
    config: &ApiConfig,
) -> anyhow::Result<(std::sync::Arc<crate::database::Database>, PathBuf)> {
    let db_path = get_db_path(config)?;
    let db = crate::database::Database::new(&db_path)?;
    Ok((std::sync::Arc::new(db), db_path))
}
