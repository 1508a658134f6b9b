//! Intermediate signals shared by every ability formula.
//!
//! Signals are derived from a [`SignalSource`] in a fixed order. Every
//! division uses a floor on its denominator (`1` for counts and durations,
//! [`EPSILON`] for ratios) so no signal is ever `NaN` or infinite.

use serde::Serialize;

use crate::{
    normal::inverse_normal_cdf,
    telemetry::{BasicResult, DetailedResult, SessionCounters, SessionReport, SessionTelemetry},
};

/// Minimum denominator for ratio signals.
pub const EPSILON: f64 = 0.01;

/// Time constant of [`Signals::time_decay`], in milliseconds.
const TIME_DECAY_MS: f64 = 45_000.0;

/// Which computation path produced a set of signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum MetricsPath {
    #[display("basic")]
    Basic,
    #[display("detailed")]
    Detailed,
}

/// Supplies the raw inputs the signal formulas read.
///
/// [`BasicResult`] answers from outcome counters only. [`DetailedResult`]
/// additionally exposes its telemetry, but the formulas do not read it yet,
/// so both paths currently produce identical signals.
pub trait SignalSource {
    fn correct_placements(&self) -> u32;
    fn incorrect_placements(&self) -> u32;
    fn time_taken_ms(&self) -> f64;
    fn completed_successfully(&self) -> bool;
    fn order_correct(&self) -> bool;
    fn path(&self) -> MetricsPath;

    /// Detailed telemetry backing this source, if any.
    fn telemetry(&self) -> Option<&SessionTelemetry> {
        None
    }
}

#[expect(clippy::cast_precision_loss)]
fn counters_time(counters: &SessionCounters) -> f64 {
    counters.time_taken_ms as f64
}

impl SignalSource for BasicResult {
    fn correct_placements(&self) -> u32 {
        self.counters.correct_placements
    }

    fn incorrect_placements(&self) -> u32 {
        self.counters.incorrect_placements
    }

    fn time_taken_ms(&self) -> f64 {
        counters_time(&self.counters)
    }

    fn completed_successfully(&self) -> bool {
        self.counters.completed_successfully
    }

    fn order_correct(&self) -> bool {
        self.counters.order_correct
    }

    fn path(&self) -> MetricsPath {
        MetricsPath::Basic
    }
}

impl SignalSource for DetailedResult {
    fn correct_placements(&self) -> u32 {
        self.counters.correct_placements
    }

    fn incorrect_placements(&self) -> u32 {
        self.counters.incorrect_placements
    }

    fn time_taken_ms(&self) -> f64 {
        counters_time(&self.counters)
    }

    fn completed_successfully(&self) -> bool {
        self.counters.completed_successfully
    }

    fn order_correct(&self) -> bool {
        self.counters.order_correct
    }

    fn path(&self) -> MetricsPath {
        MetricsPath::Detailed
    }

    fn telemetry(&self) -> Option<&SessionTelemetry> {
        Some(&self.telemetry)
    }
}

impl SignalSource for SessionReport {
    fn correct_placements(&self) -> u32 {
        self.counters().correct_placements
    }

    fn incorrect_placements(&self) -> u32 {
        self.counters().incorrect_placements
    }

    fn time_taken_ms(&self) -> f64 {
        counters_time(self.counters())
    }

    fn completed_successfully(&self) -> bool {
        self.counters().completed_successfully
    }

    fn order_correct(&self) -> bool {
        self.counters().order_correct
    }

    fn path(&self) -> MetricsPath {
        match self {
            Self::Basic(basic) => basic.path(),
            Self::Detailed(detailed) => detailed.path(),
        }
    }

    fn telemetry(&self) -> Option<&SessionTelemetry> {
        SessionReport::telemetry(self)
    }
}

/// Derived signals, all on a 0–100 scale unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    /// Percentage of placements that were correct.
    pub accuracy: f64,
    pub error_rate: f64,
    /// Accuracy on a log scale, `log10(max(1, accuracy)) / log10(100) * 100`.
    pub log_accuracy: f64,
    /// Milliseconds per placement.
    pub mean_rt: f64,
    /// Inverse efficiency score in milliseconds (lower is better).
    pub ies: f64,
    pub ies_score: f64,
    /// Raw d′ sensitivity (unbounded).
    pub d_prime: f64,
    pub d_prime_score: f64,
    pub time_decay: f64,
    pub efficiency_score: f64,
    pub load_score: f64,
    /// `completedSuccessfully` as 0 or 1.
    pub completed: f64,
    /// `orderCorrect` as 0 or 1.
    pub order: f64,
}

impl Signals {
    #[must_use]
    pub fn derive<S>(source: &S) -> Self
    where
        S: SignalSource + ?Sized,
    {
        let correct = f64::from(source.correct_placements());
        let incorrect = f64::from(source.incorrect_placements());
        let attempts = correct + incorrect;
        let time_ms = source.time_taken_ms();

        let accuracy = if attempts > 0.0 {
            correct / attempts * 100.0
        } else {
            0.0
        };
        let error_rate = 100.0 - accuracy;

        let log_accuracy = accuracy.max(1.0).log10() / 100.0_f64.log10() * 100.0;

        let mean_rt = time_ms / attempts.max(1.0);
        let ies = mean_rt / (accuracy / 100.0).max(EPSILON);
        let ies_score = (100.0 - ies / 1000.0 * 100.0).clamp(0.0, 100.0);

        let hit_rate = (accuracy / 100.0).clamp(EPSILON, 1.0 - EPSILON);
        let false_alarm_rate = (error_rate / 100.0).clamp(EPSILON, 1.0 - EPSILON);
        let d_prime = inverse_normal_cdf(hit_rate) - inverse_normal_cdf(false_alarm_rate);
        let d_prime_score = ((d_prime + 2.0) / 4.0 * 100.0).clamp(0.0, 100.0);

        let time_decay = (-time_ms / TIME_DECAY_MS).exp() * 100.0;
        let efficiency_score = (correct * 60_000.0 / time_ms.max(1.0)).min(100.0);
        let load_score = 100.0 - (incorrect / correct.max(1.0) * 50.0).min(100.0);

        Self {
            accuracy,
            error_rate,
            log_accuracy,
            mean_rt,
            ies,
            ies_score,
            d_prime,
            d_prime_score,
            time_decay,
            efficiency_score,
            load_score,
            completed: flag(source.completed_successfully()),
            order: flag(source.order_correct()),
        }
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(correct: u32, incorrect: u32, time_taken_ms: u64) -> BasicResult {
        BasicResult {
            counters: SessionCounters {
                correct_placements: correct,
                incorrect_placements: incorrect,
                time_taken_ms,
                completed_successfully: true,
                order_correct: false,
            },
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_perfect_round() {
        let s = Signals::derive(&basic(3, 0, 6000));
        assert_close(s.accuracy, 100.0);
        assert_close(s.error_rate, 0.0);
        assert_close(s.log_accuracy, 100.0);
        assert_close(s.mean_rt, 2000.0);
        assert_close(s.ies, 2000.0);
        assert_close(s.ies_score, 0.0);
        assert_close(s.efficiency_score, 30.0);
        assert_close(s.load_score, 100.0);
        assert_close(s.time_decay, (-6000.0_f64 / 45_000.0).exp() * 100.0);
        // Hit rate 0.99 vs false alarm 0.01 saturates the d' score.
        assert_close(s.d_prime_score, 100.0);
    }

    #[test]
    fn test_no_attempts_is_finite() {
        let s = Signals::derive(&basic(0, 0, 0));
        assert_close(s.accuracy, 0.0);
        assert_close(s.error_rate, 100.0);
        assert_close(s.log_accuracy, 0.0);
        assert_close(s.ies, 0.0);
        assert_close(s.efficiency_score, 0.0);
        assert_close(s.time_decay, 100.0);
        assert_close(s.d_prime_score, 0.0);
        for v in [s.mean_rt, s.ies_score, s.load_score, s.d_prime] {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_mixed_round() {
        let s = Signals::derive(&basic(2, 2, 4000));
        assert_close(s.accuracy, 50.0);
        assert_close(s.d_prime, 0.0);
        assert_close(s.d_prime_score, 50.0);
        assert_close(s.mean_rt, 1000.0);
        assert_close(s.ies, 2000.0);
        assert_close(s.load_score, 50.0);
        assert_close(s.efficiency_score, 30.0);
    }

    #[test]
    fn test_paths_agree() {
        let counters = basic(4, 1, 9000).counters;
        let detailed = DetailedResult {
            counters,
            telemetry: SessionTelemetry {
                first_click_latency: 500.0,
                inter_click_intervals: vec![1000.0; 4],
                hesitation_periods: vec![],
                spatial_errors: vec![],
                sequential_accuracy: None,
                temporal_order_violations: None,
                version: "v2.0".to_owned(),
            },
        };
        assert_eq!(
            Signals::derive(&BasicResult { counters }),
            Signals::derive(&detailed)
        );
        assert_eq!(detailed.path(), MetricsPath::Detailed);
        assert!(detailed.telemetry().is_some());
    }
}
