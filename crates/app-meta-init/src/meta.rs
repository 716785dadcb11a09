use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MetaResult;

/// Node label copied into the metadata when present.
pub const ZONE_LABEL: &str = "zone";

const CACHE_KEY_PREFIX: &str = "app-meta.";

/// Metadata published for one app instance.
///
/// Serializes to a flat string map in field order; `zone` is omitted entirely
/// when the node carries no zone label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMeta {
    pub host: String,
    pub job: String,
    pub task: String,
    pub plugin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl AppMeta {
    /// Merge the labels we care about from the hosting node.
    pub fn apply_node_labels(&mut self, labels: &BTreeMap<String, String>) {
        if let Some(zone) = labels.get(ZONE_LABEL) {
            self.zone = Some(zone.clone());
        }
    }

    /// Compact JSON as stored in the cache.
    pub fn to_json(&self) -> MetaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Cache key for an app: `app-meta.<app_id>`.
pub fn cache_key(app_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{app_id}")
}
