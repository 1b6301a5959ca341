use serde::Serialize;
use serde_json::Value;

use crate::context::ItemKind;
use crate::item::TraktIds;

/// Reference to something the remove endpoint should delete
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RemovalRef {
    /// The entity itself, addressed by its identifier set
    Entity { ids: TraktIds },
    /// A single list entry, addressed by its service-assigned id
    ItemId(u64),
}

/// Counts reported back by one remove call
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub deleted: u64,
    pub not_found: u64,
}

impl RemovalOutcome {
    /// Read the `deleted` / `not_found` sections of a remove response.
    ///
    /// `deleted.<kind>` is a count, `not_found.<kind>` a list of the refs the
    /// service could not match. Entries removed by id come back under
    /// `not_found.ids`.
    pub fn from_response(body: &Value, kind: ItemKind) -> Self {
        let deleted = body
            .get("deleted")
            .and_then(|d| d.get(kind.as_str()))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let not_found_len = |key: &str| {
            body.get("not_found")
                .and_then(|n| n.get(key))
                .and_then(Value::as_array)
                .map(|a| a.len() as u64)
                .unwrap_or(0)
        };

        Self {
            deleted,
            not_found: not_found_len(kind.as_str()) + not_found_len("ids"),
        }
    }
}

/// Running totals of one cleanup pass
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CleanupTally {
    pub sent: u64,
    pub deleted: u64,
    pub not_found: u64,
    /// Number of remove calls issued
    pub batches: u64,
}

impl CleanupTally {
    pub fn record_sent(&mut self, count: usize) {
        self.sent += count as u64;
        self.batches += 1;
    }

    pub fn record_outcome(&mut self, outcome: &RemovalOutcome) {
        self.deleted += outcome.deleted;
        self.not_found += outcome.not_found;
    }
}
