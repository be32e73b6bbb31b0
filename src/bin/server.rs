use anyhow::Context;
use trivia_api::{db, server::app::run_server, settings::Settings, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load()?;
    let pool = db::establish_connection(&settings.database_path)
        .await
        .with_context(|| {
            format!(
                "Cannot open database {}",
                settings.database_path.display()
            )
        })?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(pool, &settings).await
}
