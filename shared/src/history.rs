use serde::{Deserialize, Serialize};

/// One persisted spin outcome, as stored and served by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinRecord {
    pub winner: String,
    /// Snapshot of the wheel at the moment the spin stopped. Records written
    /// before the snapshot existed omit this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<Vec<String>>,
    /// ISO-8601, assigned by the server.
    pub timestamp: String,
}

/// POST body for recording a finished spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSpinRecord {
    pub winner: String,
    pub item_list: Vec<String>,
}

impl SpinRecord {
    /// Item list to rebuild the wheel from when replaying this record.
    /// Legacy records without a snapshot become a one-item wheel holding
    /// just the winner.
    pub fn replay_items(&self) -> Vec<String> {
        match &self.item_list {
            Some(items) if !items.is_empty() => items.clone(),
            _ => vec![self.winner.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let record = SpinRecord {
            winner: "Ada".to_string(),
            item_list: Some(vec!["Ada".to_string(), "Grace".to_string()]),
            timestamp: "2025-01-01T12:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["winner"], "Ada");
        assert_eq!(json["itemList"][1], "Grace");
        assert_eq!(json["timestamp"], "2025-01-01T12:00:00.000Z");
    }

    #[test]
    fn test_legacy_record_without_item_list() {
        let record: SpinRecord = serde_json::from_str(
            r#"{"winner":"Ada","timestamp":"2024-06-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(record.item_list, None);
        assert_eq!(record.replay_items(), vec!["Ada".to_string()]);
    }

    #[test]
    fn test_replay_items_prefers_snapshot() {
        let record = SpinRecord {
            winner: "B".to_string(),
            item_list: Some(vec!["A".to_string(), "B".to_string()]),
            timestamp: "2025-01-01T12:00:00.000Z".to_string(),
        };
        assert_eq!(record.replay_items(), vec!["A", "B"]);
    }
}
