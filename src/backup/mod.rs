mod logic;

use anyhow::Result;

use crate::config::AppConfig;
use crate::utils::setting;

/// Public entry point for the backup process.
pub async fn run_backup_flow(app_config: &AppConfig) -> Result<()> {
    let client = setting::connect(&app_config.mongo_url).await?;
    let db = client.database(&app_config.db_name);

    logic::perform_backup_orchestration(app_config, &db).await?;

    client.shutdown().await;
    Ok(())
}
