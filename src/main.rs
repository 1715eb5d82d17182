use anyhow::Context;
use comic_shelf::build_rocket;
use comic_shelf::config::AppConfig;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to read server configuration")?;
    config
        .ensure_dirs()
        .context("Failed to create comics/public directories")?;

    build_rocket(config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
