use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zengo_engine::{GameState, ResultPayload};
use zengo_metrics::ability::MetricsReport;

/// Clicks to replay against one piece of content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickScript {
    /// Clicks in the order they are made
    pub clicks: Vec<ScriptedClick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptedClick {
    pub x: i32,
    pub y: i32,
    /// Milliseconds after the words were hidden
    pub at_ms: u64,
}

/// A replayed round with its submission payload and metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedRound {
    /// Timestamp when the round was replayed (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    pub content_id: String,
    pub final_state: GameState,
    /// Clicks left over after the round ended
    pub ignored_clicks: usize,
    pub payload: ResultPayload,
    pub metrics: MetricsReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_script_wire_format() {
        let script: ClickScript =
            serde_json::from_str(r#"{"clicks": [{"x": 1, "y": 2, "atMs": 850}]}"#).unwrap();
        assert_eq!(script.clicks, [ScriptedClick { x: 1, y: 2, at_ms: 850 }]);
    }
}
