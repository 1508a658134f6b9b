use serde::{Deserialize, Serialize};

/// Grade of a finished round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    /// Every word found, in sentence order, with few spare stones.
    #[display("EXCELLENT")]
    Excellent,
    /// Every word found, but out of order or with too many stones.
    #[display("SUCCESS")]
    Success,
    /// Some words were never found.
    #[display("FAIL")]
    Fail,
}

impl ResultType {
    #[must_use]
    pub const fn completed_successfully(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

/// Most stones a round may use and still be graded excellent.
///
/// Short sentences tolerate one stray stone, longer ones two.
#[must_use]
pub const fn excellent_stone_limit(total_words: usize) -> usize {
    total_words + if total_words <= 3 { 1 } else { 2 }
}

/// Grades a finished round.
///
/// An indeterminate order (`None`) never qualifies as excellent.
#[must_use]
pub fn classify_result(
    revealed_words: usize,
    total_words: usize,
    order_correct: Option<bool>,
    used_stones: usize,
) -> ResultType {
    if revealed_words < total_words {
        return ResultType::Fail;
    }
    if order_correct == Some(true) && used_stones <= excellent_stone_limit(total_words) {
        return ResultType::Excellent;
    }
    ResultType::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        assert_eq!(classify_result(2, 3, None, 5), ResultType::Fail);
        assert_eq!(classify_result(3, 3, Some(true), 3), ResultType::Excellent);
        assert_eq!(classify_result(3, 3, Some(true), 4), ResultType::Excellent);
        assert_eq!(classify_result(3, 3, Some(true), 5), ResultType::Success);
        assert_eq!(classify_result(3, 3, Some(false), 3), ResultType::Success);
        assert_eq!(classify_result(5, 5, Some(true), 7), ResultType::Excellent);
        assert_eq!(classify_result(5, 5, Some(true), 8), ResultType::Success);
    }

    #[test]
    fn test_completed_successfully() {
        assert!(ResultType::Excellent.completed_successfully());
        assert!(ResultType::Success.completed_successfully());
        assert!(!ResultType::Fail.completed_successfully());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ResultType::Excellent).unwrap(),
            "\"EXCELLENT\""
        );
        assert_eq!(
            serde_json::from_str::<ResultType>("\"FAIL\"").unwrap(),
            ResultType::Fail
        );
    }
}
