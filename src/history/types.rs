use serde::{Deserialize, Serialize};

/// Storage key for the persisted history snapshot.
pub const HISTORY_KEY: &str = "reality_check_history_v1";

/// Hard upper bound on held records.
pub const HISTORY_CAPACITY: usize = 20;

/// How many records a "recent analyses" view shows.
pub const RECENT_LIMIT: usize = 6;

/// The idea a user submits for critique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaInput {
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub revenue_model: String,
}

impl IdeaInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        target_audience: impl Into<String>,
        revenue_model: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            target_audience: target_audience.into(),
            revenue_model: revenue_model.into(),
        }
    }
}

/// A past (input, result) pair.
/// Created once on a successful validation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord<R> {
    pub id: String,
    /// Epoch milliseconds. Only used for ordering.
    pub created_at: i64,
    pub input: IdeaInput,
    pub result: R,
}
