//! Order verification: did the player replay the words in sentence order?
//!
//! The expected order sorts word mappings by where each word occurs in the
//! content text. The actual order is the sequence of correct stones by
//! placement index. The round's order is correct only when both sequences
//! have the same length and agree cell by cell.
//!
//! # Repeated words
//!
//! When a word occurs more than once in the text, each mapping of that word
//! claims the first occurrence not yet claimed by an earlier mapping (in
//! mapping order). A sentence "the cat saw the dog" with two `the` mappings
//! therefore expects the first `the` mapping first and the second one fourth.
//!
//! Mappings whose word does not occur in the text sort after every word that
//! does, keeping their mapping order. Content without text expects the
//! mapping order itself.

use crate::core::{BoardContent, Coords, PlacedStone};

/// Mapping indices in the order the words appear in the content text.
#[must_use]
pub fn expected_order(content: &BoardContent) -> Vec<usize> {
    let mappings = content.word_mappings();
    let Some(text) = content.text() else {
        return (0..mappings.len()).collect();
    };

    let mut claimed = Vec::with_capacity(mappings.len());
    let mut keyed = mappings
        .iter()
        .enumerate()
        .map(|(index, mapping)| {
            let position = first_unclaimed_occurrence(text, &mapping.word, &claimed);
            if let Some(position) = position {
                claimed.push(position);
            }
            (position.unwrap_or(usize::MAX), index)
        })
        .collect::<Vec<_>>();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, index)| index).collect()
}

fn first_unclaimed_occurrence(text: &str, word: &str, claimed: &[usize]) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = text.get(from..)?.find(word) {
        let position = from + offset;
        if !claimed.contains(&position) {
            return Some(position);
        }
        // Step one character so overlapping occurrences are still found.
        from = position + text[position..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Cells of correct stones in placement order.
#[must_use]
pub fn actual_order(stones: &[PlacedStone]) -> Vec<Coords> {
    let mut correct = stones.iter().filter(|s| s.correct).collect::<Vec<_>>();
    correct.sort_by_key(|s| s.placement_index);
    correct.into_iter().map(|s| s.coords).collect()
}

/// Compares the expected and actual order.
///
/// Returns `None` until every word has been found.
#[must_use]
pub fn verify_order(content: &BoardContent, stones: &[PlacedStone]) -> Option<bool> {
    let expected = expected_order(content)
        .into_iter()
        .map(|index| content.word_mappings()[index].coords)
        .collect::<Vec<_>>();
    let actual = actual_order(stones);
    if actual.len() != expected.len() {
        return None;
    }
    Some(expected.iter().zip(&actual).all(|(e, a)| e == a))
}

/// For each correct stone in placement order, the index of the mapping it revealed.
#[must_use]
pub fn placement_order(stones: &[PlacedStone]) -> Vec<usize> {
    let mut correct = stones
        .iter()
        .filter_map(|s| Some((s.placement_index, s.mapping_index?)))
        .collect::<Vec<_>>();
    correct.sort_unstable();
    correct.into_iter().map(|(_, index)| index).collect()
}

#[cfg(test)]
mod tests {
    use zengo_metrics::difficulty::BoardSize;

    use super::*;
    use crate::core::WordMapping;

    fn content(text: Option<&str>, words: &[(&str, u8, u8)]) -> BoardContent {
        let mappings = words
            .iter()
            .map(|(w, x, y)| WordMapping {
                word: (*w).to_owned(),
                coords: Coords::new(*x, *y),
            })
            .collect();
        let content = BoardContent::new("t", BoardSize::Five, mappings, 10, 1000).unwrap();
        match text {
            Some(text) => content.with_text(text),
            None => content,
        }
    }

    fn stones(cells: &[(u8, u8, Option<usize>)]) -> Vec<PlacedStone> {
        cells
            .iter()
            .enumerate()
            .map(|(i, (x, y, m))| PlacedStone::new(Coords::new(*x, *y), *m, i, 0))
            .collect()
    }

    #[test]
    fn test_expected_order_follows_text() {
        let c = content(
            Some("mice fear cats"),
            &[("cats", 0, 0), ("mice", 1, 1), ("fear", 2, 2)],
        );
        assert_eq!(expected_order(&c), vec![1, 2, 0]);
    }

    #[test]
    fn test_expected_order_without_text_is_mapping_order() {
        let c = content(None, &[("b", 0, 0), ("a", 1, 1)]);
        assert_eq!(expected_order(&c), vec![0, 1]);
    }

    #[test]
    fn test_repeated_word_claims_next_occurrence() {
        let c = content(
            Some("the cat saw the dog"),
            &[("dog", 4, 4), ("the", 0, 0), ("cat", 1, 1), ("the", 3, 3), ("saw", 2, 2)],
        );
        assert_eq!(expected_order(&c), vec![1, 2, 4, 3, 0]);
    }

    #[test]
    fn test_missing_word_sorts_last() {
        let c = content(Some("red blue"), &[("green", 0, 0), ("blue", 1, 1), ("red", 2, 2)]);
        assert_eq!(expected_order(&c), vec![2, 1, 0]);
    }

    #[test]
    fn test_verify_order() {
        let c = content(Some("A B C"), &[("A", 0, 0), ("B", 1, 1), ("C", 2, 2)]);
        let in_order = stones(&[(0, 0, Some(0)), (0, 1, None), (1, 1, Some(1)), (2, 2, Some(2))]);
        assert_eq!(verify_order(&c, &in_order), Some(true));

        let shuffled = stones(&[(2, 2, Some(2)), (0, 0, Some(0)), (1, 1, Some(1))]);
        assert_eq!(verify_order(&c, &shuffled), Some(false));

        let partial = stones(&[(0, 0, Some(0)), (1, 1, Some(1))]);
        assert_eq!(verify_order(&c, &partial), None);
    }

    #[test]
    fn test_placement_order_uses_mapping_indices() {
        let placed = stones(&[(2, 2, Some(2)), (4, 4, None), (0, 0, Some(0))]);
        assert_eq!(placement_order(&placed), vec![2, 0]);
    }
}
