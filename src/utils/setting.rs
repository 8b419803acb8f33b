// mongotool/src/utils/setting.rs
use anyhow::{Context, Result};
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;

/// Connects to the MongoDB deployment and verifies the server is reachable.
///
/// The driver connects lazily, so a `ping` against the `admin` database is
/// issued up front to surface connection failures before any data is touched.
pub async fn connect(mongo_url: &str) -> Result<Client> {
    let options = ClientOptions::parse(mongo_url)
        .await
        .with_context(|| format!("Invalid MongoDB connection string: {}", mongo_url))?;
    let client =
        Client::with_options(options).context("Failed to initialise MongoDB client")?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("Failed to connect to {}", mongo_url))?;

    println!("✅ Successfully connected to {}", mongo_url);
    Ok(client)
}
