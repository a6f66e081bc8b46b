use std::collections::{HashMap, HashSet};

use azsnap::azure::SnapshotSource;
use azsnap::dates::{DateRange, resolve_range};
use azsnap::error::ReportError;
use azsnap::model::{Snapshot, Subscription};
use azsnap::report::{SectionOutcome, build_report};
use chrono::Utc;

// End-to-end report assembly against canned data, substituting for the
// Azure CLI so no process is spawned.

struct FakeSource {
    subscriptions: Vec<Subscription>,
    snapshots: HashMap<String, Vec<Snapshot>>,
    failing: HashSet<String>,
}

impl FakeSource {
    fn new(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions,
            snapshots: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    fn with_snapshots(mut self, subscription_id: &str, snapshots: Vec<Snapshot>) -> Self {
        self.snapshots
            .insert(subscription_id.to_string(), snapshots);
        self
    }

    fn failing_for(mut self, subscription_id: &str) -> Self {
        self.failing.insert(subscription_id.to_string());
        self
    }
}

impl SnapshotSource for FakeSource {
    async fn subscriptions(&self) -> Result<Vec<Subscription>, ReportError> {
        Ok(self.subscriptions.clone())
    }

    async fn snapshots(
        &self,
        subscription_id: &str,
        _range: &DateRange,
    ) -> Result<Vec<Snapshot>, ReportError> {
        if self.failing.contains(subscription_id) {
            return Err(ReportError::Config(format!(
                "simulated failure for {subscription_id}"
            )));
        }
        Ok(self
            .snapshots
            .get(subscription_id)
            .cloned()
            .unwrap_or_default())
    }
}

fn subscription(name: &str, id: &str) -> Subscription {
    Subscription {
        name: name.to_string(),
        id: id.to_string(),
    }
}

fn snapshot(name: &str, state: &str) -> Snapshot {
    Snapshot {
        name: name.to_string(),
        resource_group: "rg-app".to_string(),
        time_created: "2024-02-16T08:00:00+00:00".to_string(),
        disk_size_gb: 256,
        id: format!("/subscriptions/x/snapshots/{name}"),
        disk_state: state.to_string(),
        created_by: None,
    }
}

fn window() -> DateRange {
    let (range, fallback) = resolve_range("2024-02-01", "2024-02-29", Utc::now());
    assert!(!fallback);
    range
}

#[tokio::test]
async fn two_subscriptions_one_empty() {
    let source = FakeSource::new(vec![
        subscription("prod", "sub-a"),
        subscription("dev", "sub-b"),
    ])
    .with_snapshots(
        "sub-a",
        vec![snapshot("snap-1", "Attached"), snapshot("snap-2", "Reserved")],
    );

    let subscriptions = source.subscriptions().await.expect("subscriptions");
    let report = build_report(&source, subscriptions, &window(), 4).await;

    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.sections[0].snapshots().len(), 2);
    assert!(report.sections[1].snapshots().is_empty());
    assert!(matches!(
        report.sections[1].outcome,
        SectionOutcome::Fetched(_)
    ));

    let summary = report.summary_rows();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].status, "Attached");
    assert_eq!(summary[1].status, "Unattached");
    assert_eq!(report.total(), 2);
}

#[tokio::test]
async fn failed_fetch_is_recorded_and_the_run_continues() {
    let source = FakeSource::new(vec![
        subscription("prod", "sub-a"),
        subscription("broken", "sub-b"),
        subscription("dev", "sub-c"),
    ])
    .with_snapshots("sub-a", vec![snapshot("snap-1", "Attached")])
    .failing_for("sub-b")
    .with_snapshots("sub-c", vec![snapshot("snap-3", "Unattached")]);

    let subscriptions = source.subscriptions().await.expect("subscriptions");
    let report = build_report(&source, subscriptions, &window(), 2).await;

    assert_eq!(report.sections.len(), 3);
    match &report.sections[1].outcome {
        SectionOutcome::Failed(message) => {
            assert!(message.contains("sub-b"));
        }
        other => panic!("expected failed section, got {other:?}"),
    }
    assert_eq!(report.total(), 2);
    assert_eq!(report.summary_rows().len(), 2);
}

#[tokio::test]
async fn sections_keep_subscription_listing_order() {
    let subscriptions: Vec<Subscription> = (0..10)
        .map(|index| subscription(&format!("sub-{index}"), &format!("id-{index}")))
        .collect();
    let mut source = FakeSource::new(subscriptions.clone());
    for index in 0..10 {
        source = source.with_snapshots(
            &format!("id-{index}"),
            vec![snapshot(&format!("snap-{index}"), "Unattached")],
        );
    }

    let report = build_report(&source, subscriptions, &window(), 3).await;

    let names: Vec<&str> = report
        .sections
        .iter()
        .map(|section| section.subscription.name.as_str())
        .collect();
    let expected: Vec<String> = (0..10).map(|index| format!("sub-{index}")).collect();
    assert_eq!(names, expected);
    assert_eq!(report.total(), 10);
}
