//! Owner of a [`RoundState`] that carries out its effects.
//!
//! The state machine only asks for side effects; [`RoundDriver`] performs
//! them. It holds at most one pending hide timer and fires it from
//! [`RoundDriver::poll`] once the caller's clock passes the deadline:
//!
//! ```text
//! loop {
//!     input  ──▶ dispatch / click ──▶ RoundState::apply ──▶ effect
//!     clock  ──▶ poll(now)        ──▶ HideWords { round } (if due)
//! }
//! ```
//!
//! Time is supplied by the caller in milliseconds, so a driver can run
//! against a wall clock or a simulated one.

use std::sync::Arc;

use super::{
    collaborator::{ContentSource, LoadError, ResultSink, SubmitError},
    payload::ResultPayload,
    round::{Effect, RoundEnd, RoundEvent, RoundId, RoundState, Transition},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HideTimer {
    round: RoundId,
    due_at_ms: u64,
}

#[derive(Debug, Default)]
pub struct RoundDriver {
    state: RoundState,
    hide_timer: Option<HideTimer>,
}

impl RoundDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> RoundState {
        self.state
    }

    /// Deadline of the pending hide timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.hide_timer.map(|timer| timer.due_at_ms)
    }

    /// Applies `event` and carries out the resulting effect.
    ///
    /// A submit effect is handed back to the caller instead of being sent.
    pub fn dispatch(&mut self, event: RoundEvent) -> Option<ResultPayload> {
        let Transition { state, effect } = self.state.apply(event);
        self.state = state;
        match effect? {
            Effect::ScheduleHide { round, due_at_ms } => {
                if let Some(replaced) = self.hide_timer.replace(HideTimer { round, due_at_ms }) {
                    tracing::debug!(round = %replaced.round, "replacing pending hide timer");
                }
                None
            }
            Effect::CancelHide { round } => {
                if self.hide_timer.is_some_and(|timer| timer.round == round) {
                    self.hide_timer = None;
                }
                None
            }
            Effect::Submit(payload) => Some(*payload),
        }
    }

    /// Fires the hide timer if it is due at `now_ms`.
    ///
    /// Returns `true` if a timer fired.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(timer) = self.hide_timer.filter(|timer| timer.due_at_ms <= now_ms) else {
            return false;
        };
        self.hide_timer = None;
        self.dispatch(RoundEvent::HideWords {
            round: timer.round,
            now_ms,
        });
        true
    }

    pub fn start(&mut self, now_ms: u64) {
        self.dispatch(RoundEvent::Start { now_ms });
    }

    pub fn reset(&mut self) {
        self.dispatch(RoundEvent::Reset);
    }

    /// Places a stone and evaluates the round if it has reached an end
    /// condition.
    pub fn click(&mut self, x: i32, y: i32, now_ms: u64) -> Option<RoundEnd> {
        self.dispatch(RoundEvent::PlaceStone { x, y, now_ms });
        let end = self.state.end_condition()?;
        self.dispatch(RoundEvent::Evaluate { now_ms });
        Some(end)
    }

    /// Loads content for the current settings from `source`.
    pub fn load_content<S>(&mut self, source: &mut S) -> Result<(), LoadError>
    where
        S: ContentSource + ?Sized,
    {
        self.dispatch(RoundEvent::LoadRequested);
        if !self.state.game_state().is_loading() {
            return Err(LoadError::Busy {
                state: self.state.game_state(),
            });
        }
        match source.load(self.state.settings()) {
            Ok(content) => {
                self.dispatch(RoundEvent::LoadSucceeded(Arc::new(content)));
                Ok(())
            }
            Err(error) => {
                self.dispatch(RoundEvent::LoadFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Submits the finished round to `sink`.
    ///
    /// On failure the round stays finished with its outcome intact and can
    /// be submitted again.
    pub fn submit<S>(&mut self, sink: &mut S) -> Result<(), SubmitError>
    where
        S: ResultSink + ?Sized,
    {
        let payload = self
            .dispatch(RoundEvent::SubmitRequested)
            .ok_or(SubmitError::NotFinished)?;
        match sink.submit(&payload) {
            Ok(()) => {
                self.dispatch(RoundEvent::SubmitAcknowledged);
                Ok(())
            }
            Err(error) => {
                self.dispatch(RoundEvent::SubmitFailed(error.to_string()));
                Err(error)
            }
        }
    }
}
