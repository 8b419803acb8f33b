pub(crate) mod logic;
pub(crate) mod verification;

use anyhow::Result;

use crate::config::AppConfig;
use crate::utils::setting;

/// Public entry point for the restore process.
///
/// Opens the single connection used by the whole run, delegates to the
/// orchestration logic, and shuts the client down afterwards. An error
/// propagates out before the shutdown step is reached.
pub async fn run_restore_flow(app_config: &AppConfig) -> Result<()> {
    let client = setting::connect(&app_config.mongo_url).await?;
    let db = client.database(&app_config.db_name);

    logic::perform_restore_orchestration(app_config, &db).await?;

    client.shutdown().await;
    Ok(())
}
