use serde::{Deserialize, Serialize};
use zengo_metrics::difficulty::BoardSize;

/// A cell on the board, `(0, 0)` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: u8,
    pub y: u8,
}

impl Coords {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Converts raw click coordinates, returning `None` if they fall outside `board`.
    #[must_use]
    pub fn checked(x: i32, y: i32, board: BoardSize) -> Option<Self> {
        let side = i32::from(board.side());
        if !(0..side).contains(&x) || !(0..side).contains(&y) {
            return None;
        }
        Some(Self {
            x: u8::try_from(x).ok()?,
            y: u8::try_from(y).ok()?,
        })
    }

    #[must_use]
    pub const fn is_within(self, board: BoardSize) -> bool {
        self.x < board.side() && self.y < board.side()
    }

    /// Euclidean distance between cell centers.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_bounds() {
        assert_eq!(Coords::checked(0, 0, BoardSize::Three), Some(Coords::new(0, 0)));
        assert_eq!(Coords::checked(2, 2, BoardSize::Three), Some(Coords::new(2, 2)));
        assert_eq!(Coords::checked(3, 0, BoardSize::Three), None);
        assert_eq!(Coords::checked(-1, 1, BoardSize::Seven), None);
        assert_eq!(Coords::checked(6, 6, BoardSize::Seven), Some(Coords::new(6, 6)));
    }

    #[test]
    fn test_distance() {
        assert!((Coords::new(0, 0).distance(Coords::new(3, 4)) - 5.0).abs() < 1e-12);
        assert!(Coords::new(2, 2).distance(Coords::new(2, 2)).abs() < 1e-12);
    }
}
