//! Game engine for Zengo, a memory game played on a Go board.
//!
//! A round shows a sentence's words on board cells, hides them, and asks
//! the player to place stones where the words were, in sentence order.
//!
//! # Round flow
//!
//! ```text
//! ContentSource ──▶ BoardContent
//!                       │ start
//!                       ▼
//!        showing ──(hide timer)──▶ playing ──clicks──▶ PlacedStone log
//!                                                         │ evaluate
//!                                                         ▼
//!                              RoundOutcome ──▶ ResultPayload ──▶ ResultSink
//!                                                         │
//!                                                         ▼
//!                                          zengo_metrics (score, abilities)
//! ```
//!
//! # Modules
//!
//! - [`core`] - board content, coordinates and placed stones
//! - [`engine`] - the round state machine, its driver and grading
//!
//! # Example
//!
//! ```
//! use zengo_engine::{BoardContent, GameState, ResultType, RoundDriver, WordMapping, Coords};
//! use zengo_metrics::difficulty::BoardSize;
//!
//! let mappings = vec![
//!     WordMapping { word: "hello".into(), coords: Coords::new(0, 0) },
//!     WordMapping { word: "world".into(), coords: Coords::new(2, 1) },
//! ];
//! let mut content = BoardContent::new("greeting", BoardSize::Three, mappings, 4, 2000)
//!     .unwrap()
//!     .with_text("hello world");
//!
//! let mut driver = RoundDriver::new();
//! driver.load_content(&mut content).unwrap();
//! driver.start(0);
//! driver.poll(2000);
//! driver.click(0, 0, 3000);
//! driver.click(2, 1, 4000);
//!
//! assert_eq!(driver.state().game_state(), GameState::FinishedSuccess);
//! assert_eq!(driver.state().outcome().unwrap().result_type, ResultType::Excellent);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
