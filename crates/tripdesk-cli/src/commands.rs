//! Handlers for the `suggest` and `catalog` subcommands.

use tripdesk_core::{AppConfig, CuratedCatalog, DestinationInput};
use tripdesk_suggest::SuggestionBuilder;

/// Joins CLI destination arguments into the comma-delimited input form, so
/// `suggest Paris Tokyo` and `suggest "Paris, Tokyo"` are equivalent.
pub(crate) fn destination_input(args: &[String]) -> DestinationInput {
    DestinationInput::Text(args.join(","))
}

/// Runs the live pipeline and prints the results as pretty JSON.
pub(crate) async fn run_suggest(
    config: &AppConfig,
    destinations: &[String],
    days: Option<i64>,
    budget: Option<f64>,
) -> anyhow::Result<()> {
    let builder = SuggestionBuilder::from_config(config)?;
    let results = builder
        .build_suggestions(&destination_input(destinations), days, budget)
        .await;
    tracing::info!(
        destinations = results.len(),
        ok = results.iter().filter(|r| r.status() == "ok").count(),
        "suggest finished"
    );
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// One line per curated destination: key, currency, attraction count.
pub(crate) fn catalog_lines(catalog: &CuratedCatalog) -> Vec<String> {
    catalog
        .iter()
        .map(|(key, entry)| {
            format!(
                "{key:<16} {currency:<4} {count} attractions",
                currency = entry.currency,
                count = entry.attractions.len()
            )
        })
        .collect()
}

/// Loads (and so validates) the configured catalog and lists it.
pub(crate) fn run_catalog(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = CuratedCatalog::load_or_builtin(config.catalog_path.as_deref())?;
    match &config.catalog_path {
        Some(path) => println!("catalog: {}", path.display()),
        None => println!("catalog: built-in"),
    }
    for line in catalog_lines(&catalog) {
        println!("{line}");
    }
    Ok(())
}
