//! Scoring and cognitive metrics for Zengo rounds.
//!
//! This crate turns the outcome of a finished round into numbers:
//!
//! - [`score`] - the 0–100 session score (accuracy, time and order)
//! - [`ability`] - thirteen difficulty-adjusted cognitive ability scores
//!
//! Both are pure functions of their inputs and safe to recompute.
//!
//! # Pipeline
//!
//! ```text
//! SessionReport (Basic | Detailed)
//!     ↓ SignalSource
//! Signals (accuracy, d′, IES, time decay, ...)
//!     ↓ fixed weight tables
//! raw ability scores
//!     ↓ difficulty multiplier (3×3: 1.0, 5×5: 1.3, 7×7: 1.7), clamp, round
//! CognitiveMetrics
//! ```
//!
//! # Supporting Modules
//!
//! - [`difficulty`] - board sizes and the difficulty table
//! - [`normal`] - inverse normal CDF used for d′
//! - [`signals`] - intermediate signals and the [`signals::SignalSource`] seam
//! - [`telemetry`] - validation of incoming session reports
//!
//! # Example
//!
//! ```
//! use zengo_metrics::{
//!     ability::{Ability, CognitiveMetrics},
//!     difficulty::BoardSize,
//!     telemetry::{SessionCounters, SessionReport},
//! };
//!
//! let counters = SessionCounters {
//!     correct_placements: 3,
//!     incorrect_placements: 0,
//!     time_taken_ms: 6000,
//!     completed_successfully: true,
//!     order_correct: true,
//! };
//! let report = SessionReport::new(counters, None).unwrap();
//! let metrics = CognitiveMetrics::compute(&report, BoardSize::Three);
//! assert_eq!(metrics.get(Ability::HippocampusActivation), 100);
//! ```

pub mod ability;
pub mod difficulty;
pub mod normal;
pub mod score;
pub mod signals;
pub mod telemetry;
