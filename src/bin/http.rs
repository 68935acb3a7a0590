#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use budget_allocator::{
        BudgetAllocator, Catalog, ServerSettings, http_api, load_catalog_from_csv,
        load_catalog_from_json,
    };
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budget_allocator=info,http=info".into()),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    let config = settings.allocator_config()?;

    let catalog = match &settings.catalog_path {
        Some(path) if path.extension().is_some_and(|ext| ext == "csv") => {
            load_catalog_from_csv(path)?
        }
        Some(path) => load_catalog_from_json(path)?,
        None => Catalog::new(),
    };
    catalog.validate_against(&config)?;
    info!(
        offerings = catalog.len(),
        categories = config.categories.len(),
        locations = config.locations.len(),
        "starting budget allocator"
    );

    http_api::serve(settings.addr, BudgetAllocator::new(config), catalog).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
