//! Subcommand handlers. Each loads what it needs from `AppConfig`, runs one
//! or more stages, and prints an operator summary to stdout.

use anyhow::Context;
use tyrescout_core::{load_search_plan, AppConfig, SearchPlan};
use tyrescout_google::{PlacesClient, SheetsClient};
use tyrescout_pipeline::{
    export_snapshot, read_snapshot, spreadsheet_url, Collector, DatasetReport, Enhancer, Pipeline,
    ReviewOutcome, Reviewer, SheetsExporter, Stage,
};
use tyrescout_scraper::HttpPageFetcher;

pub(crate) async fn run(
    config: &AppConfig,
    areas: Vec<String>,
    apply_defaults: bool,
) -> anyhow::Result<()> {
    let plan = search_plan(config, areas)?;
    let pipeline = Pipeline::new(config, plan, places_client(config)?, page_fetcher(config)?)
        .with_apply_defaults(config.review_apply_defaults || apply_defaults);

    let summary = pipeline.run().await?;
    println!(
        "Collected {} companies, read {} websites.",
        summary.collected, summary.pages_fetched
    );
    print_review(&summary.review);
    println!("Final data: {}", summary.final_snapshot.display());
    Ok(())
}

pub(crate) async fn collect(config: &AppConfig, areas: Vec<String>) -> anyhow::Result<()> {
    let plan = search_plan(config, areas)?;
    let collector = Collector::new(config, plan, places_client(config)?);
    let records = collector.collect().await?;
    println!("Collected {} unique companies.", records.len());
    Ok(())
}

pub(crate) async fn enhance(config: &AppConfig) -> anyhow::Result<()> {
    let enhancer = Enhancer::new(config, page_fetcher(config)?);
    let records = enhancer.enhance().await?;
    let classified = records.iter().filter(|r| r.company_type.is_some()).count();
    println!(
        "Enhanced {} companies ({classified} classified).",
        records.len()
    );
    Ok(())
}

pub(crate) fn review(config: &AppConfig, apply_defaults: bool) -> anyhow::Result<()> {
    let reviewer =
        Reviewer::new(config).with_apply_defaults(config.review_apply_defaults || apply_defaults);
    let (_, outcome) = reviewer.review()?;
    print_review(&outcome);
    println!("Final data: {}", reviewer.final_snapshot().display());
    Ok(())
}

pub(crate) fn validate(config: &AppConfig, stage: Stage) -> anyhow::Result<()> {
    let records = read_snapshot(&config.data_dir, stage)?;
    println!(
        "Validating {} companies ({stage} snapshot)...",
        records.len()
    );
    println!();
    print!("{}", DatasetReport::from_records(&records));
    Ok(())
}

pub(crate) async fn export(config: &AppConfig) -> anyhow::Result<()> {
    let token = config
        .require_sheets_access_token()
        .context("export needs a Sheets access token")?;
    let client = SheetsClient::new(token, config.request_timeout_secs)?;
    let exporter = SheetsExporter::new(client, export_title(&config.sheets_title));

    let outcome = export_snapshot(&config.data_dir, &exporter).await?;
    println!("Exported {} companies.", outcome.records);
    println!(
        "View your data: {}",
        spreadsheet_url(&outcome.spreadsheet_id)
    );
    Ok(())
}

fn search_plan(config: &AppConfig, areas: Vec<String>) -> anyhow::Result<SearchPlan> {
    let plan = load_search_plan(&config.search_plan_path).with_context(|| {
        format!(
            "loading search plan from {}",
            config.search_plan_path.display()
        )
    })?;
    if areas.is_empty() {
        Ok(plan)
    } else {
        Ok(plan.with_areas(areas)?)
    }
}

fn places_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    let key = config
        .require_google_api_key()
        .context("collect needs a Places API key")?;
    let client = PlacesClient::new(key, config.request_timeout_secs, &config.user_agent)?
        .with_retry(config.max_retries, config.retry_backoff_base_ms);
    Ok(client)
}

fn page_fetcher(config: &AppConfig) -> anyhow::Result<HttpPageFetcher> {
    Ok(HttpPageFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
    )?)
}

/// Each export creates a new document, so the date keeps titles apart.
pub(crate) fn export_title(base: &str) -> String {
    format!("{base} ({})", chrono::Local::now().format("%Y-%m-%d"))
}

fn print_review(outcome: &ReviewOutcome) {
    let mut stats = String::new();
    // Writing to a String cannot fail.
    let _ = outcome.before.write_statistics(&mut stats);
    println!("DATA QUALITY REVIEW:");
    println!();
    print!("{stats}");
    println!();
    if outcome.defaults_applied > 0 {
        println!(
            "Applied placeholder values to {} companies.",
            outcome.defaults_applied
        );
    }
    println!(
        "Flagged {} companies with low quality data.",
        outcome.flagged_low
    );
}
