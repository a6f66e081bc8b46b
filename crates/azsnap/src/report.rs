use cli_table::{Table, WithTitle, format::Justify, print_stdout};
use futures_util::{StreamExt, stream};
use tracing::warn;

use crate::azure::SnapshotSource;
use crate::dates::DateRange;
use crate::error::ReportError;
use crate::model::{Snapshot, Subscription};

const MISSING_OWNER: &str = "N/A";

/// Everything one run prints, built before any table is rendered so the
/// construction stays testable without capturing stdout.
#[derive(Debug)]
pub struct Report {
    pub sections: Vec<Section>,
}

/// Per-subscription slice of the report, in subscription listing order.
#[derive(Debug)]
pub struct Section {
    pub subscription: Subscription,
    pub outcome: SectionOutcome,
}

#[derive(Debug)]
pub enum SectionOutcome {
    Fetched(Vec<Snapshot>),
    /// The snapshot query failed; the section contributes zero rows but
    /// the run continues.
    Failed(String),
}

impl Section {
    pub fn snapshots(&self) -> &[Snapshot] {
        match &self.outcome {
            SectionOutcome::Fetched(snapshots) => snapshots,
            SectionOutcome::Failed(_) => &[],
        }
    }
}

impl Report {
    pub fn total(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.snapshots().len())
            .sum()
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.sections
            .iter()
            .flat_map(|section| section.snapshots())
            .map(SummaryRow::from)
            .collect()
    }
}

/// Per-subscription table row.
#[derive(Debug, Table)]
pub struct SnapshotRow {
    #[table(title = "Name")]
    pub name: String,
    #[table(title = "Resource Group")]
    pub resource_group: String,
    #[table(title = "Time Created")]
    pub time_created: String,
    #[table(title = "Size (GB)", justify = "Justify::Right")]
    pub size_gb: u32,
    #[table(title = "State")]
    pub state: String,
    #[table(title = "Created By")]
    pub created_by: String,
}

impl From<&Snapshot> for SnapshotRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            resource_group: snapshot.resource_group.clone(),
            time_created: snapshot.time_created.clone(),
            size_gb: snapshot.disk_size_gb,
            state: snapshot.disk_state.clone(),
            created_by: owner_label(snapshot.created_by.as_deref()),
        }
    }
}

/// Cross-subscription summary row.
#[derive(Debug, Table)]
pub struct SummaryRow {
    #[table(title = "Snapshot Name")]
    pub name: String,
    #[table(title = "Date Created")]
    pub date_created: String,
    #[table(title = "Status")]
    pub status: String,
    #[table(title = "Created By")]
    pub created_by: String,
}

impl From<&Snapshot> for SummaryRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            date_created: snapshot.time_created.clone(),
            status: classify_state(&snapshot.disk_state).to_string(),
            created_by: owner_label(snapshot.created_by.as_deref()),
        }
    }
}

/// Binary classification for the summary: anything not literally
/// "Attached" reports as "Unattached", including unexpected states.
pub fn classify_state(disk_state: &str) -> &'static str {
    if disk_state == "Attached" {
        "Attached"
    } else {
        "Unattached"
    }
}

fn owner_label(created_by: Option<&str>) -> String {
    match created_by {
        Some(owner) if !owner.is_empty() => owner.to_string(),
        _ => MISSING_OWNER.to_string(),
    }
}

/// Fetch snapshots for every subscription and assemble the report.
///
/// Fetches fan out with at most `concurrency` queries in flight;
/// `buffered` yields results in listing order, so the printed report is
/// deterministic regardless of completion order.
pub async fn build_report<S: SnapshotSource>(
    source: &S,
    subscriptions: Vec<Subscription>,
    range: &DateRange,
    concurrency: usize,
) -> Report {
    let sections = stream::iter(subscriptions.into_iter().map(|subscription| async move {
        let outcome = match source.snapshots(&subscription.id, range).await {
            Ok(snapshots) => SectionOutcome::Fetched(snapshots),
            Err(err) => {
                warn!(
                    subscription = %subscription.name,
                    error = %err,
                    "snapshot query failed; reporting the subscription as empty"
                );
                SectionOutcome::Failed(err.to_string())
            }
        };
        Section {
            subscription,
            outcome,
        }
    }))
    .buffered(concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    Report { sections }
}

/// Render the report: one section per subscription, then the summary
/// table and the total count.
pub fn print_report(report: &Report) -> Result<(), ReportError> {
    for section in &report.sections {
        println!(
            "\nSearching in subscription: {}",
            section.subscription.name
        );
        match &section.outcome {
            SectionOutcome::Failed(message) => {
                println!(
                    "Snapshot query failed in subscription: {} ({message})",
                    section.subscription.name
                );
            }
            SectionOutcome::Fetched(snapshots) if snapshots.is_empty() => {
                println!(
                    "No snapshots found in subscription: {}",
                    section.subscription.name
                );
            }
            SectionOutcome::Fetched(snapshots) => {
                let rows: Vec<SnapshotRow> = snapshots.iter().map(SnapshotRow::from).collect();
                print_stdout(rows.with_title())?;
            }
        }
    }

    println!("\nSnapshot Summary:");
    print_stdout(report.summary_rows().with_title())?;

    println!("\nTotal snapshots found: {}", report.total());
    println!("\nSnapshot search complete!");
    Ok(())
}
