// mongotool/src/config/mod.rs
use std::env;
use std::path::PathBuf;

/// Connection string used when MONGO_URL is not set.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/";
/// Database name used when DB_NAME is not set.
pub const DEFAULT_DB_NAME: &str = "test_database";
/// The backup document lives in the working directory under a fixed name.
pub const BACKUP_FILE_NAME: &str = "database_backup.json";

/// Application's runtime configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_url: String,
    pub db_name: String,
    pub backup_file: PathBuf,
}

impl AppConfig {
    /// Loads configuration from the process environment, reading a
    /// colocated `.env` file first when one exists.
    pub fn load_from_env() -> Self {
        dotenv::dotenv().ok();

        AppConfig {
            mongo_url: env_or_default(env::var("MONGO_URL").ok(), DEFAULT_MONGO_URL),
            db_name: env_or_default(env::var("DB_NAME").ok(), DEFAULT_DB_NAME),
            backup_file: PathBuf::from(BACKUP_FILE_NAME),
        }
    }
}

/// Resolves a configuration value, treating unset and empty the same.
fn env_or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
