//! # Textbook Exchange demo
//!
//! Wires the catalog core the way a front-end would:
//! 1.  Build the [`Marketplace`] from environment configuration.
//! 2.  Load listings from a source, falling back to demo data.
//! 3.  Search with each strategy.
//! 4.  Publish a new listing and watch it appear in the catalog.

use serde_json::json;
use textbook_exchange::catalog::{fixtures, StaticSource};
use textbook_exchange::config::MarketplaceConfig;
use textbook_exchange::lifecycle::{setup_tracing, LoadOutcome, Marketplace};
use textbook_exchange::model::RawListing;
use textbook_exchange::search::{CatalogFilters, SearchKind};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting textbook exchange demo");

    let market = Marketplace::new(MarketplaceConfig::from_env());

    // A back-end response as the listings endpoint would return it
    let source = StaticSource::from_envelope(json!({
        "success": true,
        "data": [
            { "id": 10, "titulo": "Cálculo Vol. 1", "autor": "James Stewart",
              "preco": 45.5, "condicao": "used", "tipo": "sale",
              "vendedor": "Maria Silva", "curso": "Engenharia Civil" },
            { "id": 11, "titulo": "Física para Universitários", "autor": "David Halliday",
              "preco": "68,90", "tipo": "trade", "vendedor": "João Santos", "curso": "Física" },
            { "id": 12, "titulo": "Direito Constitucional", "autor": "Alexandre de Moraes",
              "tipo": "donation", "curso": "Direito" }
        ]
    }))
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("catalog_load");
    let outcome = async {
        info!("Loading listings");
        market
            .load_or_fallback(&source, fixtures::demo_listings())
            .await
    }
    .instrument(span)
    .await;

    match &outcome {
        LoadOutcome::Fetched(count) => info!(count, "Listings loaded"),
        LoadOutcome::Fallback { count, error } => {
            warn!(count, error = %error, "Listings loaded from fallback")
        }
    }

    let mut engine = market.search_engine();
    for (kind, term) in [
        (SearchKind::Title, "calc"),
        (SearchKind::Author, "halliday"),
        (SearchKind::Course, "direito"),
        (SearchKind::All, "engenharia"),
    ] {
        engine.set_strategy(kind);
        engine.set_query(term);
        let titles: Vec<String> = market
            .catalog
            .search(&engine)
            .into_iter()
            .map(|l| l.title)
            .collect();
        info!(%kind, term, ?titles, "Search");
    }

    let span = tracing::info_span!("listing_creation");
    let report = async {
        let record = RawListing {
            title: Some("Nova Química".to_string()),
            author: Some("John C. Kotz".to_string()),
            course: Some("Química".to_string()),
            kind: Some("donation".to_string()),
            ..RawListing::default()
        };
        info!("Publishing new listing");
        market.publisher.publish(&record)
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    info!(delivered = report.delivered, size = market.catalog.len(), "Listing published");

    engine.set_strategy(SearchKind::All);
    engine.set_query("");
    let donations = market.catalog.browse(
        &engine,
        &CatalogFilters {
            kind: Some("donation".to_string()),
            ..CatalogFilters::default()
        },
    );
    info!(
        count = donations.len(),
        newest = ?donations.first().map(|l| l.title.as_str()),
        "Donations"
    );
    info!(courses = ?market.catalog.courses(), "Courses");

    market.shutdown();

    info!("Demo completed successfully");
    Ok(())
}
