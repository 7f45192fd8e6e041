use pix_navigator::{AppConfig, dataset::DatasetClient, telemetry::init_tracing};

/// Prints every record of the provider dataset followed by its provider name.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;
    init_tracing(config.env, "pix_navigator=info,fetch_providers=info");

    let client = DatasetClient::from_config(&config);
    let records = match client.fetch_records().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "provider dataset unavailable");
            return Err(e.into());
        }
    };

    for record in &records {
        println!("{}", record.render());
    }
    Ok(())
}
