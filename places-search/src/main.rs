use std::env;

use anyhow::{bail, Context};
use dotenv::dotenv;
use places_search::actions::{csv_export, nearby_search::driver};
use places_search::{AppConfig, GooglePlacesClient};
use shared_types::{MapSession, NearbySearch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum SearchAction {
    Search,
    ExportCsv,
}

impl SearchAction {
    fn new(action: &str) -> anyhow::Result<Self> {
        match action {
            "SEARCH" => Ok(Self::Search),
            "EXPORT_CSV" => Ok(Self::ExportCsv),
            other => bail!("Invalid action {other:?}, expected SEARCH or EXPORT_CSV"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,places_search=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let action = SearchAction::new(&env::var("ACTION").unwrap_or_else(|_| "SEARCH".to_string()))?;
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let client = GooglePlacesClient::from_config(&config);
    let search = NearbySearch::mexico_city();
    let mut session = MapSession::new();

    if let Err(e) = driver::run_search(&client, &mut session, &search).await {
        tracing::error!(error = %e, "Error searching places");
        return Err(e).context("Nearby search failed");
    }
    driver::print_results(&session);

    match action {
        SearchAction::Search => Ok(()),
        SearchAction::ExportCsv => {
            let path = csv_export::export_session(&session, &config.export_dir).await?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
