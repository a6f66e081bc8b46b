pub mod azure;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod report;

use chrono::Utc;
use tracing::{error, info};

use azure::{AzureCli, SnapshotSource};
use config::{AppConfig, CliArgs};
use dates::{DateRange, current_month_range, resolve_range};
use error::ReportError;
use report::{build_report, print_report};

pub async fn run(cli: CliArgs) -> Result<(), ReportError> {
    let AppConfig {
        az_bin,
        fetch_concurrency,
        start,
        end,
        no_prompt,
    } = cli.resolve()?;

    println!("Welcome to the Azure Snapshot Finder!");

    let now = Utc::now();
    let range = gather_range(start, end, no_prompt, now)?;

    let source = AzureCli::new(az_bin);
    let subscriptions = match source.subscriptions().await {
        Ok(subscriptions) => subscriptions,
        Err(err) => {
            error!(error = %err, "subscription listing failed");
            Vec::new()
        }
    };
    if subscriptions.is_empty() {
        println!("No subscriptions found. Please make sure you're logged in with 'az login'.");
        return Ok(());
    }

    info!(
        subscriptions = subscriptions.len(),
        start = %range.start_iso(),
        end = %range.end_iso(),
        "querying snapshots"
    );

    let report = build_report(&source, subscriptions, &range, fetch_concurrency).await;
    print_report(&report)?;
    Ok(())
}

/// Resolve the date window from flags or interactive prompts. Invalid
/// input resets both bounds to the current-month default.
fn gather_range(
    start: Option<String>,
    end: Option<String>,
    no_prompt: bool,
    now: chrono::DateTime<Utc>,
) -> Result<DateRange, ReportError> {
    let default_range = current_month_range(now);
    let start_input = match start {
        Some(value) => value,
        None if no_prompt => default_range.start_day(),
        None => prompt::prompt_date("start", &default_range.start_day())?,
    };
    let end_input = match end {
        Some(value) => value,
        None if no_prompt => default_range.end_day(),
        None => prompt::prompt_date("end", &default_range.end_day())?,
    };

    let (range, used_fallback) = resolve_range(&start_input, &end_input, now);
    if used_fallback {
        println!("Invalid date format. Using default date range for the current month.");
    }
    Ok(range)
}
