//! Click classification.
//!
//! [`classify_click`] decides whether a click is accepted and, if so, whether
//! it hit a word that is still hidden. Rejected clicks are not errors: the
//! board ignores duplicate, out-of-bounds and over-budget clicks.

use std::collections::BTreeSet;

use crate::core::{BoardContent, Coords, PlacedStone};

/// Why a click was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Rejection {
    #[display("round is not accepting stones")]
    NotPlaying,
    #[display("click is outside the board")]
    OutOfBounds,
    #[display("cell already holds a stone")]
    AlreadyPlaced,
    #[display("stone budget exhausted")]
    BudgetExhausted,
}

/// An accepted click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub coords: Coords,
    /// Mapping revealed by this click; `None` for a miss.
    pub revealed: Option<usize>,
}

impl Placement {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.revealed.is_some()
    }
}

/// Classifies a click at `(x, y)` against the current placement log.
///
/// A click is correct only if it lands on a mapping that has not been
/// revealed yet.
pub fn classify_click(
    content: &BoardContent,
    placed: &[PlacedStone],
    revealed: &BTreeSet<usize>,
    x: i32,
    y: i32,
) -> Result<Placement, Rejection> {
    let coords = Coords::checked(x, y, content.board_size()).ok_or(Rejection::OutOfBounds)?;
    if placed.iter().any(|s| s.coords == coords) {
        return Err(Rejection::AlreadyPlaced);
    }
    if placed.len() >= content.total_allowed_stones() {
        return Err(Rejection::BudgetExhausted);
    }
    let revealed = content
        .mapping_at(coords)
        .filter(|index| !revealed.contains(index));
    Ok(Placement { coords, revealed })
}

#[cfg(test)]
mod tests {
    use zengo_metrics::difficulty::BoardSize;

    use super::*;
    use crate::core::WordMapping;

    fn content(allowed: usize) -> BoardContent {
        let mappings = [("A", 0, 0), ("B", 1, 1), ("C", 2, 2)]
            .into_iter()
            .map(|(w, x, y)| WordMapping {
                word: w.to_owned(),
                coords: Coords::new(x, y),
            })
            .collect();
        BoardContent::new("t", BoardSize::Three, mappings, allowed, 1000).unwrap()
    }

    #[test]
    fn test_hit_and_miss() {
        let content = content(5);
        let none = BTreeSet::new();
        let hit = classify_click(&content, &[], &none, 1, 1).unwrap();
        assert_eq!(hit.revealed, Some(1));
        assert!(hit.is_correct());

        let miss = classify_click(&content, &[], &none, 0, 1).unwrap();
        assert!(!miss.is_correct());
    }

    #[test]
    fn test_revealed_word_counts_as_miss() {
        let content = content(5);
        let revealed = BTreeSet::from([2]);
        let placement = classify_click(&content, &[], &revealed, 2, 2).unwrap();
        assert_eq!(placement.revealed, None);
    }

    #[test]
    fn test_rejections() {
        let content = content(3);
        let none = BTreeSet::new();
        let placed = [
            PlacedStone::new(Coords::new(0, 0), Some(0), 0, 10),
            PlacedStone::new(Coords::new(0, 1), None, 1, 20),
        ];
        assert_eq!(
            classify_click(&content, &placed, &none, 3, 0),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            classify_click(&content, &placed, &none, 0, -1),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            classify_click(&content, &placed, &none, 0, 0),
            Err(Rejection::AlreadyPlaced)
        );

        let full = [
            placed[0],
            placed[1],
            PlacedStone::new(Coords::new(0, 2), None, 2, 30),
        ];
        assert_eq!(
            classify_click(&content, &full, &none, 2, 2),
            Err(Rejection::BudgetExhausted)
        );
    }
}
