use protocol_generator::config::{GeneratorConfig, Settings};
use protocol_generator::handlers::shell::{ShellHandler, ShellOutcome};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,protocol_generator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&settings.database_url).await?;

    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let shell = ShellHandler::new(db, GeneratorConfig::default());

    // Usage: protocol-generator [command --flag value ...]
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        shell.run().await?;
        return Ok(());
    }

    match shell.dispatch(&args.join(" ")).await? {
        ShellOutcome::Output(output) => println!("{}", output),
        ShellOutcome::Exit => {}
    }

    Ok(())
}
