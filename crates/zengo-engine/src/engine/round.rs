//! Round state machine.
//!
//! [`RoundState`] is an immutable value. [`RoundState::apply`] takes an event
//! and returns the next state together with at most one [`Effect`] for the
//! owner to carry out (schedule or cancel the hide timer, submit a result).
//!
//! ```text
//! idle ──openSettings──▶ setting ──closeSettings──▶ idle
//! idle|setting ──loadRequested──▶ loading ──loadSucceeded|loadFailed──▶ idle
//! idle ──start──▶ showing ──hideWords(round)──▶ playing
//! playing ──placeStone──▶ playing
//! playing ──evaluate──▶ finished_success | finished_fail
//! finished_* ──submitRequested──▶ submitting ──ack|failed──▶ finished_*
//! any ──reset──▶ idle
//! ```
//!
//! Events that do not apply to the current state are ignored and leave the
//! state unchanged.

use std::{collections::BTreeSet, sync::Arc};

use serde::{Deserialize, Serialize};
use zengo_metrics::{
    difficulty::BoardSize,
    score::{ScoreInput, session_score},
};

use super::{
    classify::classify_result,
    order::{placement_order, verify_order},
    payload::{ResultPayload, RoundOutcome},
    placement::{Placement, Rejection, classify_click},
    telemetry::record_telemetry,
};
use crate::core::{BoardContent, PlacedStone, StoneLog};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    #[display("idle")]
    Idle,
    #[display("setting")]
    Setting,
    #[display("loading")]
    Loading,
    #[display("showing")]
    Showing,
    #[display("playing")]
    Playing,
    #[display("submitting")]
    Submitting,
    #[display("finished_success")]
    FinishedSuccess,
    #[display("finished_fail")]
    FinishedFail,
}

impl GameState {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::FinishedSuccess | Self::FinishedFail)
    }
}

/// Identity of a round. Advances on every start and reset so that timers
/// scheduled for an earlier round can be told apart.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub struct RoundId(u64);

impl RoundId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What the player asked for while in the setting state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub level: Option<u32>,
    pub language: Option<String>,
    pub board_size: Option<BoardSize>,
}

/// Why a playing round should end now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundEnd {
    /// Every word has been revealed.
    AllWordsFound,
    /// The stone budget is spent with words still hidden.
    OutOfStones,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    OpenSettings,
    UpdateSettings(ContentRequest),
    CloseSettings,
    LoadRequested,
    LoadSucceeded(Arc<BoardContent>),
    LoadFailed(String),
    Start { now_ms: u64 },
    /// The hide timer of `round` fired.
    HideWords { round: RoundId, now_ms: u64 },
    PlaceStone { x: i32, y: i32, now_ms: u64 },
    Evaluate { now_ms: u64 },
    SubmitRequested,
    SubmitAcknowledged,
    SubmitFailed(String),
    Reset,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleHide { round: RoundId, due_at_ms: u64 },
    CancelHide { round: RoundId },
    Submit(Box<ResultPayload>),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: RoundState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: RoundState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with(state: RoundState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoundState {
    round: RoundId,
    game_state: GameState,
    settings: ContentRequest,
    content: Option<Arc<BoardContent>>,
    load_error: Option<String>,
    placed_stones: StoneLog,
    revealed: BTreeSet<usize>,
    start_time_ms: Option<u64>,
    outcome: Option<RoundOutcome>,
    submitted: bool,
    submit_error: Option<String>,
}

impl RoundState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn round(&self) -> RoundId {
        self.round
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    #[must_use]
    pub fn settings(&self) -> &ContentRequest {
        &self.settings
    }

    #[must_use]
    pub fn content(&self) -> Option<&Arc<BoardContent>> {
        self.content.as_ref()
    }

    /// Error of the last failed load, kept until the next load attempt.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub fn placed_stones(&self) -> &[PlacedStone] {
        &self.placed_stones
    }

    #[must_use]
    pub fn used_stones_count(&self) -> usize {
        self.placed_stones.len()
    }

    /// Words revealed so far, in mapping order.
    pub fn revealed_words(&self) -> impl Iterator<Item = &str> + '_ {
        let mappings = self.content.as_deref().map_or(&[][..], BoardContent::word_mappings);
        self.revealed
            .iter()
            .filter_map(|&index| mappings.get(index).map(|m| m.word.as_str()))
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Time the words were hidden and play began.
    #[must_use]
    pub fn start_time_ms(&self) -> Option<u64> {
        self.start_time_ms
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Checks whether a playing round has reached an end condition.
    ///
    /// The round does not end on its own; callers evaluate it once this
    /// returns `Some`.
    #[must_use]
    pub fn end_condition(&self) -> Option<RoundEnd> {
        if !self.game_state.is_playing() {
            return None;
        }
        let content = self.content.as_deref()?;
        if self.revealed.len() == content.total_words() {
            return Some(RoundEnd::AllWordsFound);
        }
        if self.used_stones_count() >= content.total_allowed_stones() {
            return Some(RoundEnd::OutOfStones);
        }
        None
    }

    /// Computes the state following `event`.
    #[must_use]
    pub fn apply(&self, event: RoundEvent) -> Transition {
        let mut next = self.clone();
        let effect = match (self.game_state, event) {
            (_, RoundEvent::Reset) => next.reset(),

            (GameState::Idle, RoundEvent::OpenSettings) => {
                next.game_state = GameState::Setting;
                None
            }
            (GameState::Setting, RoundEvent::UpdateSettings(request)) => {
                next.settings = request;
                None
            }
            (GameState::Setting, RoundEvent::CloseSettings) => {
                next.game_state = GameState::Idle;
                None
            }

            (GameState::Idle | GameState::Setting, RoundEvent::LoadRequested) => {
                next.game_state = GameState::Loading;
                next.load_error = None;
                None
            }
            (GameState::Loading, RoundEvent::LoadSucceeded(content)) => {
                tracing::debug!(content_id = content.id(), "content attached");
                next.clear_round();
                next.content = Some(content);
                next.game_state = GameState::Idle;
                None
            }
            (GameState::Loading, RoundEvent::LoadFailed(error)) => {
                tracing::warn!(%error, "content load failed");
                next.clear_round();
                next.content = None;
                next.load_error = Some(error);
                next.game_state = GameState::Idle;
                None
            }

            (GameState::Idle, RoundEvent::Start { now_ms }) => next.start(now_ms),
            (GameState::Showing, RoundEvent::HideWords { round, now_ms }) if round == self.round => {
                next.game_state = GameState::Playing;
                next.start_time_ms = Some(now_ms);
                None
            }
            (_, RoundEvent::HideWords { round, .. }) => {
                tracing::debug!(%round, current = %self.round, state = %self.game_state, "ignoring stale hide timer");
                None
            }

            (GameState::Playing, RoundEvent::PlaceStone { x, y, now_ms }) => {
                next.place_stone(x, y, now_ms);
                None
            }
            (_, RoundEvent::PlaceStone { x, y, .. }) => {
                tracing::trace!(x, y, reason = %Rejection::NotPlaying, "click ignored");
                None
            }
            (GameState::Playing, RoundEvent::Evaluate { now_ms }) => {
                next.evaluate(now_ms);
                None
            }

            (GameState::FinishedSuccess | GameState::FinishedFail, RoundEvent::SubmitRequested) => {
                let Some(payload) = self.result_payload() else {
                    return Transition::to(next);
                };
                next.game_state = GameState::Submitting;
                next.submit_error = None;
                Some(Effect::Submit(Box::new(payload)))
            }
            (GameState::Submitting, RoundEvent::SubmitAcknowledged) => {
                next.submitted = true;
                next.game_state = next.finished_state();
                None
            }
            (GameState::Submitting, RoundEvent::SubmitFailed(error)) => {
                tracing::warn!(%error, "result submission failed; outcome kept");
                next.submit_error = Some(error);
                next.game_state = next.finished_state();
                None
            }

            (state, event) => {
                tracing::debug!(%state, ?event, "event ignored in current state");
                None
            }
        };
        match effect {
            Some(effect) => Transition::with(next, effect),
            None => Transition::to(next),
        }
    }

    /// Applies a click and returns the resulting state.
    ///
    /// Clicks outside the playing state, outside the board, on an occupied
    /// cell or beyond the stone budget leave the state unchanged.
    #[must_use]
    pub fn place_stone_at(&self, x: i32, y: i32, now_ms: u64) -> Self {
        self.apply(RoundEvent::PlaceStone { x, y, now_ms }).state
    }

    /// Builds the submission payload of a finished round.
    #[must_use]
    pub fn result_payload(&self) -> Option<ResultPayload> {
        let outcome = self.outcome?;
        let content = self.content.as_deref()?;
        Some(ResultPayload {
            content_id: content.id().to_owned(),
            time_taken_ms: outcome.time_taken_ms,
            correct_placements: outcome.correct_placements,
            incorrect_placements: outcome.incorrect_placements,
            used_stones_count: outcome.used_stones_count,
            completed_successfully: outcome.completed_successfully(),
            order_correct: outcome.order_correct == Some(true),
            result_type: outcome.result_type,
            score: outcome.score,
            placement_order: placement_order(&self.placed_stones),
            detailed_metrics: record_telemetry(content, &self.placed_stones),
        })
    }

    fn clear_round(&mut self) {
        self.placed_stones.clear();
        self.revealed.clear();
        self.start_time_ms = None;
        self.outcome = None;
        self.submitted = false;
        self.submit_error = None;
    }

    fn reset(&mut self) -> Option<Effect> {
        let previous = self.round;
        let pending_timer = self.game_state.is_showing();
        self.round = self.round.next();
        self.clear_round();
        self.game_state = GameState::Idle;
        tracing::debug!(from = %previous, to = %self.round, "round reset");
        pending_timer.then_some(Effect::CancelHide { round: previous })
    }

    fn start(&mut self, now_ms: u64) -> Option<Effect> {
        let Some(content) = self.content.as_deref() else {
            tracing::debug!("start ignored: no content attached");
            return None;
        };
        let due_at_ms = now_ms.saturating_add(content.initial_display_time_ms());
        self.round = self.round.next();
        self.clear_round();
        self.game_state = GameState::Showing;
        tracing::debug!(round = %self.round, due_at_ms, "showing words");
        Some(Effect::ScheduleHide {
            round: self.round,
            due_at_ms,
        })
    }

    fn place_stone(&mut self, x: i32, y: i32, now_ms: u64) {
        let Some(content) = self.content.as_deref() else {
            return;
        };
        let placement = match classify_click(content, &self.placed_stones, &self.revealed, x, y) {
            Ok(placement) => placement,
            Err(reason) => {
                tracing::trace!(x, y, %reason, "click ignored");
                return;
            }
        };
        let Placement { coords, revealed } = placement;
        if let Some(index) = revealed {
            self.revealed.insert(index);
        }
        let elapsed_ms = now_ms.saturating_sub(self.start_time_ms.unwrap_or(now_ms));
        let stone = PlacedStone::new(coords, revealed, self.placed_stones.len(), elapsed_ms);
        // The validator admits each cell at most once, so the log never exceeds the board.
        self.placed_stones.push(stone);
    }

    #[expect(clippy::cast_possible_truncation)]
    fn evaluate(&mut self, now_ms: u64) {
        let Some(content) = self.content.as_deref() else {
            return;
        };
        let time_taken_ms = now_ms.saturating_sub(self.start_time_ms.unwrap_or(now_ms));
        let correct = self.placed_stones.iter().filter(|s| s.correct).count();
        let used = self.placed_stones.len();
        let order_correct = verify_order(content, &self.placed_stones);
        let result_type = classify_result(self.revealed.len(), content.total_words(), order_correct, used);
        let score = session_score(&ScoreInput {
            correct_placements: correct as u32,
            total_words: content.total_words() as u32,
            time_taken_ms,
            order_correct: order_correct == Some(true),
        });

        let outcome = RoundOutcome {
            result_type,
            order_correct,
            score,
            time_taken_ms,
            correct_placements: correct as u32,
            incorrect_placements: (used - correct) as u32,
            used_stones_count: used as u32,
        };
        tracing::info!(
            round = %self.round,
            content_id = content.id(),
            result = %result_type,
            score,
            time_taken_ms,
            "round finished"
        );
        self.outcome = Some(outcome);
        self.game_state = self.finished_state();
    }

    fn finished_state(&self) -> GameState {
        match self.outcome {
            Some(outcome) if outcome.completed_successfully() => GameState::FinishedSuccess,
            _ => GameState::FinishedFail,
        }
    }
}
