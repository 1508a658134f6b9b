//! Round lifecycle: click handling, grading and the state machine.
//!
//! - [`RoundState`] - immutable round state; `apply` maps an event to the
//!   next state plus an optional [`Effect`]
//! - [`RoundDriver`] - owns a state, runs its hide timer and talks to the
//!   [`ContentSource`] and [`ResultSink`] collaborators
//! - [`classify_click`] - accepts or ignores a single click
//! - [`verify_order`] - expected versus actual word order
//! - [`classify_result`] - `EXCELLENT` / `SUCCESS` / `FAIL`
//! - [`record_telemetry`] - detailed `v2.0` telemetry from the placement log
//! - [`ResultPayload`] - what a finished round hands to the result service
//!
//! # Round Flow
//!
//! 1. Load content while idle (optionally after adjusting settings)
//! 2. Start: words are shown and a hide timer is scheduled
//! 3. The timer fires for the current round only; play begins
//! 4. Each accepted click appends a stone; a correct one reveals its word
//! 5. Once every word is found or the stones run out, the round is evaluated
//! 6. The finished round may be submitted, and resubmitted after a failure

pub use self::{
    classify::*, collaborator::*, driver::*, order::*, payload::*, placement::*, round::*,
    telemetry::*,
};

mod classify;
mod collaborator;
mod driver;
mod order;
mod payload;
mod placement;
mod round;
mod telemetry;
