//! Detailed `v2.0` telemetry recorded from the placement log.

use zengo_metrics::telemetry::{SessionTelemetry, SpatialError, TELEMETRY_VERSION};

use super::order::{expected_order, placement_order};
use crate::core::{BoardContent, PlacedStone};

/// A pause between two clicks at least this long counts as hesitation.
pub const HESITATION_THRESHOLD_MS: u64 = 2_000;

/// Records telemetry for a round, or `None` if no stone was placed.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn record_telemetry(content: &BoardContent, stones: &[PlacedStone]) -> Option<SessionTelemetry> {
    let first = stones.first()?;

    let inter_click_intervals = stones
        .windows(2)
        .map(|pair| pair[1].elapsed_ms.saturating_sub(pair[0].elapsed_ms))
        .collect::<Vec<_>>();
    let hesitation_periods = inter_click_intervals
        .iter()
        .filter(|&&interval| interval >= HESITATION_THRESHOLD_MS)
        .map(|&interval| interval as f64)
        .collect();

    let spatial_errors = stones
        .iter()
        .filter(|s| !s.correct)
        .map(|s| SpatialError {
            x: i32::from(s.coords.x),
            y: i32::from(s.coords.y),
            distance: content
                .word_mappings()
                .iter()
                .map(|m| s.coords.distance(m.coords))
                .fold(f64::INFINITY, f64::min),
        })
        .collect();

    let expected = expected_order(content);
    let actual = placement_order(stones);
    let in_position = expected.iter().zip(&actual).filter(|(e, a)| e == a).count();
    let sequential_accuracy = in_position as f64 / expected.len().max(1) as f64 * 100.0;

    let mut rank = vec![0; content.word_mappings().len()];
    for (position, &index) in expected.iter().enumerate() {
        rank[index] = position;
    }
    let violations = actual
        .windows(2)
        .filter(|pair| rank[pair[0]] > rank[pair[1]])
        .count();

    Some(SessionTelemetry {
        first_click_latency: first.elapsed_ms as f64,
        inter_click_intervals: inter_click_intervals.iter().map(|&i| i as f64).collect(),
        hesitation_periods,
        spatial_errors,
        sequential_accuracy: Some(sequential_accuracy),
        temporal_order_violations: Some(u32::try_from(violations).unwrap_or(u32::MAX)),
        version: TELEMETRY_VERSION.to_owned(),
    })
}
