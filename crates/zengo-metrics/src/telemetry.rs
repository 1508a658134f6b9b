//! Session reports received from the outside world.
//!
//! Reports arrive as loosely shaped JSON. They are narrowed once, at the
//! boundary, into [`SessionReport`]:
//!
//! - [`SessionReport::Basic`] when no detailed telemetry is attached, or the
//!   attached telemetry is not [`TELEMETRY_VERSION`]
//! - [`SessionReport::Detailed`] when `v2.0` telemetry is attached and valid
//!
//! Anything else (inconsistent flags, negative timings, a `v2.0` block with
//! missing fields) is rejected with a [`SessionReportError`].
//!
//! ```
//! use zengo_metrics::telemetry::SessionReport;
//!
//! let json = r#"{
//!     "correctPlacements": 3,
//!     "incorrectPlacements": 1,
//!     "timeTakenMs": 9000,
//!     "completedSuccessfully": true,
//!     "orderCorrect": false
//! }"#;
//! let report: SessionReport = serde_json::from_str(json).unwrap();
//! assert!(report.is_basic());
//! ```

use serde::{Deserialize, Serialize};

/// The only telemetry version accepted by the detailed path.
pub const TELEMETRY_VERSION: &str = "v2.0";

/// Outcome counters shared by both report kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCounters {
    pub correct_placements: u32,
    pub incorrect_placements: u32,
    pub time_taken_ms: u64,
    pub completed_successfully: bool,
    pub order_correct: bool,
}

impl SessionCounters {
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.correct_placements + self.incorrect_placements
    }
}

/// A click that missed every word, with its distance to the nearest word cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialError {
    pub x: i32,
    pub y: i32,
    pub distance: f64,
}

/// Fine-grained timing and spatial telemetry of one round.
///
/// Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTelemetry {
    pub first_click_latency: f64,
    pub inter_click_intervals: Vec<f64>,
    pub hesitation_periods: Vec<f64>,
    pub spatial_errors: Vec<SpatialError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_order_violations: Option<u32>,
    pub version: String,
}

impl SessionTelemetry {
    fn validate(&self) -> Result<(), SessionReportError> {
        let is_duration = |v: f64| v.is_finite() && v >= 0.0;
        if !is_duration(self.first_click_latency) {
            return Err(SessionReportError::InvalidTiming {
                field: "firstClickLatency",
            });
        }
        if !self.inter_click_intervals.iter().copied().all(is_duration) {
            return Err(SessionReportError::InvalidTiming {
                field: "interClickIntervals",
            });
        }
        if !self.hesitation_periods.iter().copied().all(is_duration) {
            return Err(SessionReportError::InvalidTiming {
                field: "hesitationPeriods",
            });
        }
        if !self.spatial_errors.iter().all(|e| is_duration(e.distance)) {
            return Err(SessionReportError::InvalidTiming {
                field: "spatialErrors",
            });
        }
        if let Some(acc) = self.sequential_accuracy
            && !(0.0..=100.0).contains(&acc)
        {
            return Err(SessionReportError::SequentialAccuracyOutOfRange(acc));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SessionReportError {
    #[display("orderCorrect is set but completedSuccessfully is not")]
    InconsistentFlags,
    #[display("detailed telemetry is missing field `{field}`")]
    MissingTelemetryField { field: &'static str },
    #[display("detailed telemetry field `{field}` must be a finite non-negative duration")]
    InvalidTiming { field: &'static str },
    #[display("sequentialAccuracy must be within 0..=100, got {_0}")]
    SequentialAccuracyOutOfRange(#[error(not(source))] f64),
}

/// Report without usable detailed telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicResult {
    pub counters: SessionCounters,
}

/// Report carrying validated `v2.0` telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedResult {
    pub counters: SessionCounters,
    pub telemetry: SessionTelemetry,
}

/// A validated session report.
#[derive(Debug, Clone, PartialEq, Deserialize, derive_more::IsVariant)]
#[serde(try_from = "RawSessionReport")]
pub enum SessionReport {
    Basic(BasicResult),
    Detailed(DetailedResult),
}

impl SessionReport {
    /// Narrows counters plus optional telemetry into a report.
    pub fn new(
        counters: SessionCounters,
        telemetry: Option<SessionTelemetry>,
    ) -> Result<Self, SessionReportError> {
        if counters.order_correct && !counters.completed_successfully {
            return Err(SessionReportError::InconsistentFlags);
        }
        match telemetry {
            Some(telemetry) if telemetry.version == TELEMETRY_VERSION => {
                telemetry.validate()?;
                Ok(Self::Detailed(DetailedResult {
                    counters,
                    telemetry,
                }))
            }
            Some(telemetry) => {
                tracing::debug!(
                    version = %telemetry.version,
                    "ignoring detailed telemetry with unsupported version"
                );
                Ok(Self::Basic(BasicResult { counters }))
            }
            None => Ok(Self::Basic(BasicResult { counters })),
        }
    }

    #[must_use]
    pub fn counters(&self) -> &SessionCounters {
        match self {
            Self::Basic(basic) => &basic.counters,
            Self::Detailed(detailed) => &detailed.counters,
        }
    }

    #[must_use]
    pub fn telemetry(&self) -> Option<&SessionTelemetry> {
        match self {
            Self::Basic(_) => None,
            Self::Detailed(detailed) => Some(&detailed.telemetry),
        }
    }
}

/// Wire form of a report: every telemetry field optional so that older
/// telemetry versions still parse and fall back to the basic path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSessionReport {
    #[serde(flatten)]
    counters: SessionCounters,
    #[serde(default)]
    detailed_metrics: Option<RawTelemetry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTelemetry {
    first_click_latency: Option<f64>,
    inter_click_intervals: Option<Vec<f64>>,
    hesitation_periods: Option<Vec<f64>>,
    spatial_errors: Option<Vec<SpatialError>>,
    sequential_accuracy: Option<f64>,
    temporal_order_violations: Option<u32>,
    version: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, SessionReportError> {
    value.ok_or(SessionReportError::MissingTelemetryField { field })
}

impl RawTelemetry {
    fn into_telemetry(self) -> Result<Option<SessionTelemetry>, SessionReportError> {
        match self.version.as_deref() {
            Some(TELEMETRY_VERSION) => {}
            version => {
                tracing::debug!(?version, "ignoring detailed telemetry with unsupported version");
                return Ok(None);
            }
        }

        Ok(Some(SessionTelemetry {
            first_click_latency: required(self.first_click_latency, "firstClickLatency")?,
            inter_click_intervals: required(self.inter_click_intervals, "interClickIntervals")?,
            hesitation_periods: required(self.hesitation_periods, "hesitationPeriods")?,
            spatial_errors: required(self.spatial_errors, "spatialErrors")?,
            sequential_accuracy: self.sequential_accuracy,
            temporal_order_violations: self.temporal_order_violations,
            version: TELEMETRY_VERSION.to_owned(),
        }))
    }
}

impl TryFrom<RawSessionReport> for SessionReport {
    type Error = SessionReportError;

    fn try_from(raw: RawSessionReport) -> Result<Self, Self::Error> {
        let telemetry = match raw.detailed_metrics {
            Some(raw) => raw.into_telemetry()?,
            None => None,
        };
        Self::new(raw.counters, telemetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters() -> SessionCounters {
        SessionCounters {
            correct_placements: 4,
            incorrect_placements: 1,
            time_taken_ms: 12_000,
            completed_successfully: true,
            order_correct: true,
        }
    }

    fn telemetry(version: &str) -> SessionTelemetry {
        SessionTelemetry {
            first_click_latency: 850.0,
            inter_click_intervals: vec![900.0, 1100.0, 750.0, 1300.0],
            hesitation_periods: vec![2100.0],
            spatial_errors: vec![SpatialError {
                x: 2,
                y: 3,
                distance: 1.0,
            }],
            sequential_accuracy: Some(75.0),
            temporal_order_violations: Some(1),
            version: version.to_owned(),
        }
    }

    #[test]
    fn test_detailed_requires_v2() {
        let report = SessionReport::new(counters(), Some(telemetry("v2.0"))).unwrap();
        assert!(report.is_detailed());

        let report = SessionReport::new(counters(), Some(telemetry("v1.3"))).unwrap();
        assert!(report.is_basic());
        assert!(report.telemetry().is_none());
    }

    #[test]
    fn test_rejects_order_without_completion() {
        let mut c = counters();
        c.completed_successfully = false;
        assert_eq!(
            SessionReport::new(c, None),
            Err(SessionReportError::InconsistentFlags)
        );
    }

    #[test]
    fn test_rejects_negative_timings() {
        let mut t = telemetry("v2.0");
        t.inter_click_intervals.push(-5.0);
        assert_eq!(
            SessionReport::new(counters(), Some(t)),
            Err(SessionReportError::InvalidTiming {
                field: "interClickIntervals"
            })
        );
    }

    mod wire {
        use super::*;

        #[test]
        fn test_parse_detailed_payload() {
            let json = r#"{
                "contentId": "c-1",
                "correctPlacements": 4,
                "incorrectPlacements": 1,
                "timeTakenMs": 12000,
                "completedSuccessfully": true,
                "orderCorrect": true,
                "resultType": "EXCELLENT",
                "detailedMetrics": {
                    "firstClickLatency": 850,
                    "interClickIntervals": [900, 1100],
                    "hesitationPeriods": [],
                    "spatialErrors": [{"x": 1, "y": 2, "distance": 1.5}],
                    "version": "v2.0"
                }
            }"#;
            let report: SessionReport = serde_json::from_str(json).unwrap();
            let telemetry = report.telemetry().unwrap();
            assert_eq!(telemetry.inter_click_intervals, vec![900.0, 1100.0]);
            assert_eq!(report.counters().attempts(), 5);
        }

        #[test]
        fn test_old_version_falls_back_to_basic() {
            let json = r#"{
                "correctPlacements": 2,
                "incorrectPlacements": 0,
                "timeTakenMs": 3000,
                "completedSuccessfully": true,
                "orderCorrect": false,
                "detailedMetrics": { "clicks": [1, 2, 3], "version": "v1.0" }
            }"#;
            let report: SessionReport = serde_json::from_str(json).unwrap();
            assert!(report.is_basic());
        }

        #[test]
        fn test_v2_missing_field_is_rejected() {
            let json = r#"{
                "correctPlacements": 2,
                "incorrectPlacements": 0,
                "timeTakenMs": 3000,
                "completedSuccessfully": true,
                "orderCorrect": false,
                "detailedMetrics": { "firstClickLatency": 400, "version": "v2.0" }
            }"#;
            let err = serde_json::from_str::<SessionReport>(json).unwrap_err();
            assert!(err.to_string().contains("interClickIntervals"));
        }
    }
}
