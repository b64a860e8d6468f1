use anyhow::Context;
use mongodb::bson::doc;
use mongodb::Client;

mod config;
mod seed;
mod session;
mod storage;
mod users;

use crate::config::AppConfig;
use crate::session::console::Terminal;
use crate::session::Session;
use crate::storage::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "moneybook=debug,mongodb=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env();
    let result = run(&config).await;

    if let Err(ref error) = result {
        tracing::error!(error = %error, "session ended with error");
    }
    result
}

/// Connects, runs the session, and releases the client on every path out:
/// everything that can fail after the client exists, the ping included, is
/// inside the captured block, so shutdown always runs before the error
/// propagates.
async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = Client::with_uri_str(&config.mongodb_uri)
        .await
        .context("connect to mongodb")?;

    let result = async {
        // The driver connects lazily; ping so connection problems surface
        // here instead of in the middle of the first menu iteration.
        client
            .database(&config.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .context("ping mongodb")?;
        tracing::info!(db = %config.db_name, collection = %config.collection_name, "connected to mongodb");

        let store = MongoStore::new(&client, config);
        if config.seed_sample_data {
            seed::seed_if_empty(&store).await?;
        }
        let mut terminal = Terminal::new();
        Session::new(&store, &mut terminal).run().await
    }
    .await;

    client.shutdown().await;
    tracing::info!("disconnected from mongodb");

    result
}
