//! Cognitive ability scores.
//!
//! Each ability is a fixed weighted sum over [`Signals`], rounded to an
//! integer, then scaled by the board's difficulty multiplier and clamped into
//! `[0, 100]` by [`apply_difficulty_bonus`].
//!
//! ```text
//! raw(ability)   = round(Σ wᵢ × termᵢ(signals))
//! score(ability) = round(clamp(raw × multiplier, 0, 100))
//! ```
//!
//! The first eight abilities are the baseline set; the last five are the
//! extended set built from the same signal vocabulary.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    difficulty::{BoardSize, apply_difficulty_bonus, round_half_up},
    signals::{MetricsPath, SignalSource, Signals},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    #[display("hippocampusActivation")]
    HippocampusActivation,
    #[display("workingMemory")]
    WorkingMemory,
    #[display("spatialMemory")]
    SpatialMemory,
    #[display("attention")]
    Attention,
    #[display("processingSpeed")]
    ProcessingSpeed,
    #[display("executiveFunction")]
    ExecutiveFunction,
    #[display("memoryConsolidation")]
    MemoryConsolidation,
    #[display("cognitiveFlexibility")]
    CognitiveFlexibility,
    #[display("sequentialMemory")]
    SequentialMemory,
    #[display("visualRecognition")]
    VisualRecognition,
    #[display("patternRecognition")]
    PatternRecognition,
    #[display("recallSpeed")]
    RecallSpeed,
    #[display("cognitiveEfficiency")]
    CognitiveEfficiency,
}

impl Ability {
    pub const BASELINE: [Self; 8] = [
        Self::HippocampusActivation,
        Self::WorkingMemory,
        Self::SpatialMemory,
        Self::Attention,
        Self::ProcessingSpeed,
        Self::ExecutiveFunction,
        Self::MemoryConsolidation,
        Self::CognitiveFlexibility,
    ];

    pub const EXTENDED: [Self; 5] = [
        Self::SequentialMemory,
        Self::VisualRecognition,
        Self::PatternRecognition,
        Self::RecallSpeed,
        Self::CognitiveEfficiency,
    ];

    pub fn all() -> impl Iterator<Item = Self> {
        Self::BASELINE.into_iter().chain(Self::EXTENDED)
    }

    #[must_use]
    pub fn is_extended(self) -> bool {
        Self::EXTENDED.contains(&self)
    }

    /// Rounded score before the difficulty bonus.
    #[must_use]
    pub fn raw_score(self, s: &Signals) -> f64 {
        let completed = s.completed;
        let order = s.order;
        let raw = match self {
            Self::HippocampusActivation => {
                let recall = if completed > 0.0 {
                    (100.0 * (-s.error_rate / 25.0).exp()).min(100.0)
                } else {
                    50.0
                };
                0.4 * (s.log_accuracy * 0.6 + order * 40.0) + 0.3 * recall + 0.3 * s.d_prime_score
            }
            Self::WorkingMemory => {
                0.3 * s.ies_score
                    + 0.25 * (order * 60.0 + s.accuracy * 0.4)
                    + 0.25 * s.efficiency_score
                    + 0.2 * s.load_score
            }
            Self::SpatialMemory => {
                0.35 * s.accuracy
                    + 0.25 * s.d_prime_score
                    + 0.2 * s.load_score
                    + 0.2 * (completed * 60.0 + 40.0)
            }
            Self::Attention => {
                0.3 * s.d_prime_score
                    + 0.3 * s.log_accuracy
                    + 0.25 * s.ies_score
                    + 0.15 * (completed * 100.0)
            }
            Self::ProcessingSpeed => {
                0.4 * s.efficiency_score + 0.35 * s.time_decay + 0.25 * s.ies_score
            }
            Self::ExecutiveFunction => {
                0.3 * s.load_score
                    + 0.25 * s.accuracy
                    + 0.25 * (order * 70.0 + completed * 30.0)
                    + 0.2 * s.efficiency_score
            }
            Self::MemoryConsolidation => {
                0.4 * s.log_accuracy + 0.3 * s.d_prime_score + 0.3 * (completed * 60.0 + order * 40.0)
            }
            Self::CognitiveFlexibility => {
                0.35 * s.ies_score + 0.35 * s.load_score + 0.3 * s.time_decay
            }
            Self::SequentialMemory => {
                0.5 * (order * 100.0) + 0.3 * s.accuracy + 0.2 * (completed * 100.0)
            }
            Self::VisualRecognition => {
                0.45 * s.d_prime_score + 0.35 * s.accuracy + 0.2 * s.load_score
            }
            Self::PatternRecognition => {
                0.4 * s.log_accuracy + 0.3 * s.d_prime_score + 0.3 * (order * 50.0 + completed * 50.0)
            }
            Self::RecallSpeed => {
                0.5 * s.time_decay + 0.3 * s.efficiency_score + 0.2 * (completed * 100.0)
            }
            Self::CognitiveEfficiency => {
                0.3 * s.ies_score + 0.3 * s.efficiency_score + 0.2 * s.accuracy + 0.2 * s.load_score
            }
        };
        round_half_up(raw)
    }
}

/// Difficulty-adjusted ability scores, each in `[0, 100]`.
///
/// Serializes as a camelCase map, e.g. `{"hippocampusActivation": 87, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CognitiveMetrics(BTreeMap<Ability, u8>);

impl CognitiveMetrics {
    /// Computes every ability for `source`, adjusted for `board`.
    #[must_use]
    pub fn compute<S>(source: &S, board: BoardSize) -> Self
    where
        S: SignalSource + ?Sized,
    {
        let signals = Signals::derive(source);
        Self::from_signals(&signals, board)
    }

    #[must_use]
    pub fn from_signals(signals: &Signals, board: BoardSize) -> Self {
        let multiplier = board.difficulty().multiplier;
        Self(
            Ability::all()
                .map(|ability| {
                    let score = apply_difficulty_bonus(ability.raw_score(signals), multiplier);
                    (ability, score)
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, ability: Ability) -> u8 {
        self.0.get(&ability).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, u8)> + '_ {
        self.0.iter().map(|(a, s)| (*a, *s))
    }
}

/// Metrics for one session, tagged with the path that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub path: MetricsPath,
    pub board_size: BoardSize,
    pub signals: Signals,
    pub abilities: CognitiveMetrics,
}

impl MetricsReport {
    #[must_use]
    pub fn compute<S>(source: &S, board: BoardSize) -> Self
    where
        S: SignalSource + ?Sized,
    {
        let signals = Signals::derive(source);
        let abilities = CognitiveMetrics::from_signals(&signals, board);
        tracing::debug!(path = %source.path(), board = %board, "computed cognitive metrics");
        Self {
            path: source.path(),
            board_size: board,
            signals,
            abilities,
        }
    }
}
