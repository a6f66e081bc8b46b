use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::debug;

use crate::dates::DateRange;
use crate::error::ReportError;
use crate::model::{Snapshot, Subscription};

/// Seam between the report pipeline and the `az` CLI, so tests can
/// substitute canned data without spawning a process.
#[allow(async_fn_in_trait)]
pub trait SnapshotSource {
    async fn subscriptions(&self) -> Result<Vec<Subscription>, ReportError>;

    async fn snapshots(
        &self,
        subscription_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Snapshot>, ReportError>;
}

/// Production source backed by the pre-authenticated Azure CLI.
#[derive(Debug, Clone)]
pub struct AzureCli {
    binary: String,
}

impl AzureCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl SnapshotSource for AzureCli {
    async fn subscriptions(&self) -> Result<Vec<Subscription>, ReportError> {
        let stdout = run_command(&self.binary, &subscription_args()).await?;
        parse_array(&stdout)
    }

    async fn snapshots(
        &self,
        subscription_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Snapshot>, ReportError> {
        let stdout = run_command(&self.binary, &snapshot_args(subscription_id, range)).await?;
        parse_array(&stdout)
    }
}

/// Run a child process with a structured argument list (no shell
/// interpretation) and return its trimmed stdout on exit 0.
///
/// No retries and no timeout: a hung child hangs the run.
pub async fn run_command(program: &str, args: &[String]) -> Result<String, ReportError> {
    let rendered = render_command(program, args);
    debug!(command = %rendered, "spawning child process");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| ReportError::CommandLaunch {
            command: rendered.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(ReportError::CommandFailed {
            command: rendered,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn render_command(program: &str, args: &[String]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

fn parse_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, ReportError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

fn subscription_args() -> Vec<String> {
    [
        "account",
        "list",
        "--query",
        "[].{name:name, id:id}",
        "-o",
        "json",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn snapshot_args(subscription_id: &str, range: &DateRange) -> Vec<String> {
    let query = format!(
        "[?timeCreated>=`{start}` && timeCreated<=`{end}`].{{\
         name:name, resourceGroup:resourceGroup, timeCreated:timeCreated, \
         diskSizeGb:diskSizeGb, id:id, diskState:diskState, createdBy:managedBy}}",
        start = range.start_iso(),
        end = range.end_iso(),
    );
    vec![
        "snapshot".to_string(),
        "list".to_string(),
        "--subscription".to_string(),
        subscription_id.to_string(),
        "--query".to_string(),
        query,
        "-o".to_string(),
        "json".to_string(),
    ]
}
