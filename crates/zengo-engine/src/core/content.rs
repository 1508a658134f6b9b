use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use zengo_metrics::difficulty::BoardSize;

use super::coords::Coords;

/// A word that must be replayed at a fixed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMapping {
    pub word: String,
    pub coords: Coords,
}

/// Board layout of one round, as supplied by the content service.
///
/// Content is validated once on construction:
///
/// - malformed or out-of-bounds mappings are skipped with a warning
/// - mappings sharing a cell with an earlier mapping are skipped
/// - `total_words` always equals the number of kept mappings
/// - `total_allowed_stones >= total_words`
///
/// # Example
///
/// ```
/// use zengo_engine::BoardContent;
///
/// let json = r#"{
///     "id": "c-1",
///     "boardSize": 3,
///     "text": "cats chase mice",
///     "wordMappings": [
///         {"word": "cats", "coords": {"x": 0, "y": 0}},
///         {"word": "chase", "coords": {"x": "one", "y": 1}},
///         {"word": "mice", "coords": {"x": 2, "y": 2}}
///     ],
///     "totalWords": 3,
///     "totalAllowedStones": 5,
///     "initialDisplayTimeMs": 3000
/// }"#;
/// let content: BoardContent = serde_json::from_str(json).unwrap();
/// assert_eq!(content.total_words(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBoardContent")]
pub struct BoardContent {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    board_size: BoardSize,
    word_mappings: Vec<WordMapping>,
    total_words: usize,
    total_allowed_stones: usize,
    initial_display_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_time_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ContentError {
    #[display("content has no valid word mappings")]
    NoWords,
    #[display("content allows {allowed} stones for {words} words")]
    InsufficientStones { allowed: usize, words: usize },
}

impl BoardContent {
    /// Builds content from already-typed mappings, applying the same checks
    /// as deserialization.
    pub fn new(
        id: impl Into<String>,
        board_size: BoardSize,
        word_mappings: Vec<WordMapping>,
        total_allowed_stones: usize,
        initial_display_time_ms: u64,
    ) -> Result<Self, ContentError> {
        let id = id.into();
        let word_mappings = retain_placeable(&id, board_size, word_mappings);
        Self::validated(Self {
            id,
            level: None,
            language: None,
            text: None,
            board_size,
            total_words: word_mappings.len(),
            word_mappings,
            total_allowed_stones,
            initial_display_time_ms,
            target_time_ms: None,
        })
    }

    /// Attaches the source sentence used to derive the expected word order.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_target_time_ms(mut self, target_time_ms: u64) -> Self {
        self.target_time_ms = Some(target_time_ms);
        self
    }

    fn validated(self) -> Result<Self, ContentError> {
        if self.word_mappings.is_empty() {
            return Err(ContentError::NoWords);
        }
        if self.total_allowed_stones < self.total_words {
            return Err(ContentError::InsufficientStones {
                allowed: self.total_allowed_stones,
                words: self.total_words,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Source sentence the words were taken from, if supplied.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    #[must_use]
    pub fn word_mappings(&self) -> &[WordMapping] {
        &self.word_mappings
    }

    #[must_use]
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    #[must_use]
    pub fn total_allowed_stones(&self) -> usize {
        self.total_allowed_stones
    }

    #[must_use]
    pub fn initial_display_time_ms(&self) -> u64 {
        self.initial_display_time_ms
    }

    #[must_use]
    pub fn target_time_ms(&self) -> Option<u64> {
        self.target_time_ms
    }

    /// Index of the mapping at `coords`.
    #[must_use]
    pub fn mapping_at(&self, coords: Coords) -> Option<usize> {
        self.word_mappings.iter().position(|m| m.coords == coords)
    }
}

/// Drops mappings that cannot be placed on `board_size`.
fn retain_placeable(
    content_id: &str,
    board_size: BoardSize,
    mappings: Vec<WordMapping>,
) -> Vec<WordMapping> {
    let mut occupied = BTreeSet::new();
    mappings
        .into_iter()
        .filter(|m| {
            if m.word.is_empty() {
                tracing::warn!(content_id, coords = ?m.coords, "skipping mapping with empty word");
                return false;
            }
            if !m.coords.is_within(board_size) {
                tracing::warn!(
                    content_id,
                    word = %m.word,
                    coords = ?m.coords,
                    board = %board_size,
                    "skipping mapping outside the board"
                );
                return false;
            }
            if !occupied.insert(m.coords) {
                tracing::warn!(
                    content_id,
                    word = %m.word,
                    coords = ?m.coords,
                    "skipping mapping on an already occupied cell"
                );
                return false;
            }
            true
        })
        .collect()
}

/// Wire form of [`BoardContent`]: mappings stay untyped until each one is
/// checked on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoardContent {
    id: String,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    text: Option<String>,
    board_size: BoardSize,
    word_mappings: Vec<serde_json::Value>,
    #[serde(default)]
    total_words: Option<usize>,
    total_allowed_stones: usize,
    initial_display_time_ms: u64,
    #[serde(default)]
    target_time_ms: Option<u64>,
}

impl TryFrom<RawBoardContent> for BoardContent {
    type Error = ContentError;

    fn try_from(raw: RawBoardContent) -> Result<Self, Self::Error> {
        let declared = raw.total_words;
        let mappings = raw
            .word_mappings
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<WordMapping>(value) {
                Ok(mapping) => Some(mapping),
                Err(error) => {
                    tracing::warn!(content_id = %raw.id, index, %error, "skipping malformed word mapping");
                    None
                }
            })
            .collect();
        let word_mappings = retain_placeable(&raw.id, raw.board_size, mappings);

        if let Some(declared) = declared
            && declared != word_mappings.len()
        {
            tracing::warn!(
                content_id = %raw.id,
                declared,
                kept = word_mappings.len(),
                "totalWords does not match usable mappings; using mapping count"
            );
        }

        Self::validated(Self {
            id: raw.id,
            level: raw.level,
            language: raw.language,
            text: raw.text,
            board_size: raw.board_size,
            total_words: word_mappings.len(),
            word_mappings,
            total_allowed_stones: raw.total_allowed_stones,
            initial_display_time_ms: raw.initial_display_time_ms,
            target_time_ms: raw.target_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(word: &str, x: u8, y: u8) -> WordMapping {
        WordMapping {
            word: word.to_owned(),
            coords: Coords::new(x, y),
        }
    }

    #[test]
    fn test_new_validates_budget() {
        let mappings = vec![mapping("a", 0, 0), mapping("b", 1, 1)];
        assert_eq!(
            BoardContent::new("c", BoardSize::Three, mappings, 1, 1000),
            Err(ContentError::InsufficientStones {
                allowed: 1,
                words: 2
            })
        );
        assert_eq!(
            BoardContent::new("c", BoardSize::Three, vec![], 3, 1000),
            Err(ContentError::NoWords)
        );
    }

    #[test]
    fn test_new_drops_unplaceable_mappings() {
        let mappings = vec![
            mapping("a", 0, 0),
            mapping("b", 3, 0),
            mapping("c", 0, 0),
            mapping("", 1, 1),
            mapping("d", 2, 2),
        ];
        let content = BoardContent::new("c", BoardSize::Three, mappings, 4, 1000).unwrap();
        let words = content
            .word_mappings()
            .iter()
            .map(|m| m.word.as_str())
            .collect::<Vec<_>>();
        assert_eq!(words, ["a", "d"]);
        assert_eq!(content.total_words(), 2);
        assert_eq!(content.mapping_at(Coords::new(2, 2)), Some(1));
        assert_eq!(content.mapping_at(Coords::new(1, 1)), None);
    }

    mod wire {
        use super::*;

        #[test]
        fn test_skips_malformed_entries() {
            let json = r#"{
                "id": "c-7",
                "level": 2,
                "language": "en",
                "boardSize": 5,
                "wordMappings": [
                    {"word": "sun", "coords": {"x": 0, "y": 4}},
                    {"word": "moon"},
                    {"word": "star", "coords": {"x": 1}},
                    {"word": "sky", "coords": {"x": -1, "y": 2}},
                    {"word": "sea", "coords": {"x": 3, "y": 3}}
                ],
                "totalWords": 5,
                "totalAllowedStones": 7,
                "initialDisplayTimeMs": 4000,
                "targetTimeMs": 20000
            }"#;
            let content: BoardContent = serde_json::from_str(json).unwrap();
            assert_eq!(content.total_words(), 2);
            assert_eq!(content.board_size(), BoardSize::Five);
            assert_eq!(content.level(), Some(2));
            assert_eq!(content.language(), Some("en"));
            assert_eq!(content.target_time_ms(), Some(20_000));
            assert_eq!(content.word_mappings()[1].word, "sea");
        }

        #[test]
        fn test_rejects_unsupported_board_size() {
            let json = r#"{
                "id": "c-8",
                "boardSize": 4,
                "wordMappings": [{"word": "a", "coords": {"x": 0, "y": 0}}],
                "totalWords": 1,
                "totalAllowedStones": 2,
                "initialDisplayTimeMs": 1000
            }"#;
            assert!(serde_json::from_str::<BoardContent>(json).is_err());
        }

        #[test]
        fn test_rejects_when_every_mapping_is_malformed() {
            let json = r#"{
                "id": "c-9",
                "boardSize": 3,
                "wordMappings": [{"word": "a", "coords": {"x": "0", "y": 0}}],
                "totalWords": 1,
                "totalAllowedStones": 2,
                "initialDisplayTimeMs": 1000
            }"#;
            let err = serde_json::from_str::<BoardContent>(json).unwrap_err();
            assert!(err.to_string().contains("no valid word mappings"));
        }

        #[test]
        fn test_serializes_camel_case() {
            let content = BoardContent::new(
                "c-1",
                BoardSize::Three,
                vec![mapping("a", 0, 0)],
                2,
                1500,
            )
            .unwrap()
            .with_text("a");
            let value = serde_json::to_value(&content).unwrap();
            assert_eq!(value["boardSize"], 3);
            assert_eq!(value["totalAllowedStones"], 2);
            assert_eq!(value["wordMappings"][0]["coords"]["x"], 0);
            assert_eq!(value["text"], "a");
            assert!(value.get("targetTimeMs").is_none());
        }
    }
}
