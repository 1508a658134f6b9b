//! Board-size difficulty table and the final clamp-and-scale step.
//!
//! Every ability score passes through [`apply_difficulty_bonus`] with the
//! multiplier of the board it was earned on:
//!
//! | Board | Multiplier | Memory load | Spatial complexity |
//! |-------|------------|-------------|--------------------|
//! | 3×3   | 1.0        | Low         | Low                |
//! | 5×5   | 1.3        | Medium      | Medium             |
//! | 7×7   | 1.7        | High        | High               |

use serde::{Deserialize, Serialize};

/// Qualitative level used by [`DifficultyConfig`] descriptors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

/// Supported board sizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum BoardSize {
    #[display("3x3")]
    Three,
    #[display("5x5")]
    Five,
    #[display("7x7")]
    Seven,
}

impl BoardSize {
    pub const ALL: [Self; 3] = [Self::Three, Self::Five, Self::Seven];

    /// Returns the board size for a side length, or `None` if unsupported.
    #[must_use]
    pub const fn from_side(side: u8) -> Option<Self> {
        match side {
            3 => Some(Self::Three),
            5 => Some(Self::Five),
            7 => Some(Self::Seven),
            _ => None,
        }
    }

    /// Side length in cells.
    #[must_use]
    pub const fn side(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Five => 5,
            Self::Seven => 7,
        }
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cells(self) -> usize {
        let side = self.side() as usize;
        side * side
    }

    #[must_use]
    pub const fn difficulty(self) -> &'static DifficultyConfig {
        match self {
            Self::Three => &DifficultyConfig::THREE,
            Self::Five => &DifficultyConfig::FIVE,
            Self::Seven => &DifficultyConfig::SEVEN,
        }
    }
}

impl Serialize for BoardSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.side())
    }
}

impl<'de> Deserialize<'de> for BoardSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let side = u8::deserialize(deserializer)?;
        Self::from_side(side).ok_or_else(|| {
            serde::de::Error::custom(format!("board size must be 3, 5 or 7, got {side}"))
        })
    }
}

/// Static difficulty descriptor for one board size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub multiplier: f64,
    pub memory_load: Level,
    pub spatial_complexity: Level,
}

impl DifficultyConfig {
    pub const THREE: Self = Self {
        multiplier: 1.0,
        memory_load: Level::Low,
        spatial_complexity: Level::Low,
    };
    pub const FIVE: Self = Self {
        multiplier: 1.3,
        memory_load: Level::Medium,
        spatial_complexity: Level::Medium,
    };
    pub const SEVEN: Self = Self {
        multiplier: 1.7,
        memory_load: Level::High,
        spatial_complexity: Level::High,
    };
}

/// Rounds to the nearest integer with ties going towards positive infinity.
///
/// This differs from [`f64::round`] only for negative ties (`-0.5` → `0`).
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Scales `value` by `multiplier`, clamps into `[0, 100]` and rounds.
///
/// ```
/// use zengo_metrics::difficulty::apply_difficulty_bonus;
///
/// assert_eq!(apply_difficulty_bonus(80.0, 1.1), 88);
/// assert_eq!(apply_difficulty_bonus(95.0, 1.1), 100);
/// assert_eq!(apply_difficulty_bonus(-10.0, 1.5), 0);
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn apply_difficulty_bonus(value: f64, multiplier: f64) -> u8 {
    let scaled = (value * multiplier).clamp(0.0, 100.0);
    if scaled.is_nan() {
        return 0;
    }
    round_half_up(scaled) as u8
}
