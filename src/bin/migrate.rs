//! Copies the content of a JSON data file into a SQLite database.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yeram::repository::migrate_data_file;

#[derive(Parser, Debug)]
#[command(name = "yeram-migrate")]
#[command(about = "Copy a JSON data file into the SQLite database")]
struct Args {
    /// Data file written by the file-backed store
    #[arg(short, long, default_value = "data.json")]
    data_file: PathBuf,

    /// Target database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yeram=info,yeram_migrate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Some(report) = migrate_data_file(&args.data_file, &args.database_url).await? {
        tracing::info!(
            announcements = report.announcements,
            photos = report.gallery_photos,
            services = report.weekly_services,
            "Migration complete"
        );
    }

    Ok(())
}
