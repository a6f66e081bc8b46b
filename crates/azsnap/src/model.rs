use serde::Deserialize;

/// A billing subscription visible to the current `az` login session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub id: String,
}

/// One disk snapshot, as projected by the `az snapshot list` query.
///
/// `created_by` is the provider's `managedBy` field, renamed in the
/// server-side projection. `time_created` is kept as the raw ISO-8601
/// string the provider returns and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub resource_group: String,
    pub time_created: String,
    pub disk_size_gb: u32,
    pub id: String,
    pub disk_state: String,
    #[serde(default)]
    pub created_by: Option<String>,
}
