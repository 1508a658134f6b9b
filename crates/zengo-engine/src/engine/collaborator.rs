//! Seams to the services a round talks to: where content comes from and
//! where results go.

use super::{
    payload::ResultPayload,
    round::{ContentRequest, GameState},
};
use crate::core::{BoardContent, ContentError};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("invalid board content: {_0}")]
    Content(ContentError),
    #[display("content unavailable: {_0}")]
    #[from(ignore)]
    Unavailable(#[error(not(source))] String),
    #[display("cannot load content while {state}")]
    #[from(ignore)]
    Busy { state: GameState },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SubmitError {
    #[display("no finished round to submit")]
    NotFinished,
    #[display("submission rejected: {_0}")]
    Rejected(#[error(not(source))] String),
}

/// Supplies board content for a content request.
pub trait ContentSource {
    fn load(&mut self, request: &ContentRequest) -> Result<BoardContent, LoadError>;
}

/// Accepts the payload of a finished round.
pub trait ResultSink {
    fn submit(&mut self, payload: &ResultPayload) -> Result<(), SubmitError>;
}

/// A fixed piece of content serves every request.
impl ContentSource for BoardContent {
    fn load(&mut self, _request: &ContentRequest) -> Result<BoardContent, LoadError> {
        Ok(self.clone())
    }
}

/// Collects submitted payloads in memory.
impl ResultSink for Vec<ResultPayload> {
    fn submit(&mut self, payload: &ResultPayload) -> Result<(), SubmitError> {
        self.push(payload.clone());
        Ok(())
    }
}
