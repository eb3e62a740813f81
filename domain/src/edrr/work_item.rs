//! Work item entity

use super::phase::EdrrPhase;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work buffered by the team coordinator until the next
/// phase transition drains it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub phase: EdrrPhase,
    pub description: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WorkItem {
    pub fn new(phase: EdrrPhase, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phase,
            description: description.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_work_items_get_distinct_ids() {
        let a = WorkItem::new(EdrrPhase::Expand, "collect ideas");
        let b = WorkItem::new(EdrrPhase::Expand, "collect ideas");
        assert_ne!(a.id, b.id);
        assert!(a.payload.is_null());
    }
}
