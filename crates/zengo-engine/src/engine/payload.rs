use serde::{Deserialize, Serialize};
use zengo_metrics::{
    ability::MetricsReport,
    difficulty::BoardSize,
    telemetry::{SessionCounters, SessionReport, SessionReportError, SessionTelemetry},
};

use super::classify::ResultType;

/// The graded outcome of a round. Decided once, when the round is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    pub result_type: ResultType,
    /// `None` when not every word was found.
    pub order_correct: Option<bool>,
    pub score: u8,
    pub time_taken_ms: u64,
    pub correct_placements: u32,
    pub incorrect_placements: u32,
    pub used_stones_count: u32,
}

impl RoundOutcome {
    #[must_use]
    pub const fn completed_successfully(&self) -> bool {
        self.result_type.completed_successfully()
    }
}

/// Result of a round as handed to the persistence/analytics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub content_id: String,
    pub time_taken_ms: u64,
    pub correct_placements: u32,
    pub incorrect_placements: u32,
    pub used_stones_count: u32,
    pub completed_successfully: bool,
    pub order_correct: bool,
    pub result_type: ResultType,
    pub score: u8,
    pub placement_order: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_metrics: Option<SessionTelemetry>,
}

impl ResultPayload {
    #[must_use]
    pub fn counters(&self) -> SessionCounters {
        SessionCounters {
            correct_placements: self.correct_placements,
            incorrect_placements: self.incorrect_placements,
            time_taken_ms: self.time_taken_ms,
            completed_successfully: self.completed_successfully,
            order_correct: self.order_correct,
        }
    }

    /// Narrows the payload into a validated session report.
    pub fn session_report(&self) -> Result<SessionReport, SessionReportError> {
        SessionReport::new(self.counters(), self.detailed_metrics.clone())
    }

    /// Cognitive metrics for this payload on `board`.
    pub fn metrics(&self, board: BoardSize) -> Result<MetricsReport, SessionReportError> {
        let report = self.session_report()?;
        Ok(MetricsReport::compute(&report, board))
    }
}
