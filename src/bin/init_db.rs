//! Applies schema.sql to the configured database.

use tracing::info;
use tracing_subscriber::EnvFilter;

use tariff_memory::config::AppConfig;
use tariff_memory::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;
    let pool = db::connect(&cfg.database_url).await?;
    db::apply_schema(&pool).await?;

    info!("schema applied");
    Ok(())
}
