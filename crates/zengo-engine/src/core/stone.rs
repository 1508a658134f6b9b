use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::coords::Coords;

/// Largest number of cells on any supported board (7×7).
///
/// Every stone occupies a distinct cell, so no round can hold more stones.
pub const MAX_STONES: usize = 49;

/// Append-only placement log of one round.
pub type StoneLog = ArrayVec<PlacedStone, MAX_STONES>;

/// Visual feedback shown for a placed stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// One stone placed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedStone {
    #[serde(flatten)]
    pub coords: Coords,
    pub correct: bool,
    /// 0-based insertion order within the round.
    pub placement_index: usize,
    pub feedback: Feedback,
    /// Index into the content's word mappings for a correct stone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_index: Option<usize>,
    /// Milliseconds since the words were hidden.
    pub elapsed_ms: u64,
}

impl PlacedStone {
    #[must_use]
    pub fn new(
        coords: Coords,
        mapping_index: Option<usize>,
        placement_index: usize,
        elapsed_ms: u64,
    ) -> Self {
        let correct = mapping_index.is_some();
        Self {
            coords,
            correct,
            placement_index,
            feedback: if correct {
                Feedback::Correct
            } else {
                Feedback::Incorrect
            },
            mapping_index,
            elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_follows_correctness() {
        let hit = PlacedStone::new(Coords::new(1, 1), Some(0), 0, 500);
        assert!(hit.correct);
        assert!(hit.feedback.is_correct());

        let miss = PlacedStone::new(Coords::new(0, 2), None, 1, 900);
        assert!(!miss.correct);
        assert!(miss.feedback.is_incorrect());
    }

    #[test]
    fn test_wire_shape() {
        let stone = PlacedStone::new(Coords::new(2, 0), Some(3), 4, 1200);
        let value = serde_json::to_value(stone).unwrap();
        assert_eq!(value["x"], 2);
        assert_eq!(value["y"], 0);
        assert_eq!(value["placementIndex"], 4);
        assert_eq!(value["feedback"], "correct");
        assert_eq!(value["mappingIndex"], 3);
    }
}
