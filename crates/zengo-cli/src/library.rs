//! File-backed content source.

use std::path::Path;

use anyhow::Context as _;
use rand::{Rng, seq::IndexedRandom as _};
use zengo_engine::{BoardContent, ContentRequest, ContentSource, LoadError};

use crate::util;

/// Board content read from JSON files, served by matching a request's
/// settings. Unset settings match anything.
#[derive(Debug)]
pub struct ContentLibrary<R> {
    contents: Vec<BoardContent>,
    rng: R,
}

impl<R> ContentLibrary<R>
where
    R: Rng,
{
    pub fn new(contents: Vec<BoardContent>, rng: R) -> Self {
        Self { contents, rng }
    }

    /// Reads every file as either a single content object or an array of them.
    pub fn open<P>(paths: &[P], rng: R) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut contents = vec![];
        for path in paths {
            let path = path.as_ref();
            let value: serde_json::Value = util::read_json_file("content", path)?;
            let parsed = if value.is_array() {
                serde_json::from_value::<Vec<BoardContent>>(value)
            } else {
                serde_json::from_value(value).map(|content| vec![content])
            };
            contents.extend(
                parsed.with_context(|| format!("Invalid board content in {}", path.display()))?,
            );
        }
        tracing::info!(count = contents.len(), "content library loaded");
        Ok(Self::new(contents, rng))
    }

}

fn satisfies(content: &BoardContent, request: &ContentRequest) -> bool {
    request.board_size.is_none_or(|size| size == content.board_size())
        && request.level.is_none_or(|level| Some(level) == content.level())
        && request
            .language
            .as_deref()
            .is_none_or(|language| Some(language) == content.language())
}

impl<R> ContentSource for ContentLibrary<R>
where
    R: Rng,
{
    fn load(&mut self, request: &ContentRequest) -> Result<BoardContent, LoadError> {
        let candidates = self
            .contents
            .iter()
            .filter(|content| satisfies(content, request))
            .collect::<Vec<_>>();
        candidates
            .choose(&mut self.rng)
            .map(|content| (*content).clone())
            .ok_or_else(|| LoadError::Unavailable(format!("no content matches {request:?}")))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use zengo_engine::{Coords, WordMapping};
    use zengo_metrics::difficulty::BoardSize;

    use super::*;

    fn content(id: &str, board_size: BoardSize) -> BoardContent {
        let mappings = vec![WordMapping {
            word: "w".to_owned(),
            coords: Coords::new(0, 0),
        }];
        BoardContent::new(id, board_size, mappings, 2, 1000).unwrap()
    }

    #[test]
    fn test_load_filters_by_board_size() {
        let mut library = ContentLibrary::new(
            vec![content("small", BoardSize::Three), content("large", BoardSize::Seven)],
            Pcg32::seed_from_u64(7),
        );
        let request = ContentRequest {
            board_size: Some(BoardSize::Seven),
            ..ContentRequest::default()
        };
        for _ in 0..5 {
            assert_eq!(library.load(&request).unwrap().id(), "large");
        }
    }

    #[test]
    fn test_load_without_match_is_unavailable() {
        let mut library = ContentLibrary::new(vec![content("small", BoardSize::Three)], Pcg32::seed_from_u64(7));
        let request = ContentRequest {
            level: Some(4),
            ..ContentRequest::default()
        };
        assert!(matches!(library.load(&request), Err(LoadError::Unavailable(_))));
    }
}
