use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use zengo_engine::{BoardContent, ResultPayload, RoundDriver, RoundEvent};

use crate::{
    library::ContentLibrary,
    schema::record::{ClickScript, RecordedRound},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub struct ReplayArg {
    /// Board content to play (JSON)
    content_file: PathBuf,
    /// Click script to replay (JSON)
    script_file: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        content_file,
        script_file,
        output,
    } = arg;

    let content: BoardContent = util::read_json_file("content", content_file)?;
    let script: ClickScript = util::read_json_file("click script", script_file)?;
    let record = replay(content, &script)?;

    tracing::info!(
        content_id = %record.content_id,
        result = %record.payload.result_type,
        score = record.payload.score,
        "replay finished"
    );
    Output::save_json(&record, output.as_deref())
}

fn replay(content: BoardContent, script: &ClickScript) -> anyhow::Result<RecordedRound> {
    let board = content.board_size();
    let mut library = ContentLibrary::new(vec![content], Pcg32::seed_from_u64(0));

    let mut driver = RoundDriver::new();
    driver.load_content(&mut library)?;
    driver.start(0);
    let hidden_at = driver.next_deadline().context("round did not start")?;
    driver.poll(hidden_at);

    let mut now_ms = hidden_at;
    let mut played = 0;
    for click in &script.clicks {
        now_ms = hidden_at + click.at_ms;
        played += 1;
        if let Some(end) = driver.click(click.x, click.y, now_ms) {
            tracing::debug!(?end, clicks = played, "round ended");
            break;
        }
    }
    let ignored_clicks = script.clicks.len() - played;
    if ignored_clicks > 0 {
        tracing::warn!(ignored_clicks, "script continues past the end of the round");
    }
    if driver.state().game_state().is_playing() {
        tracing::info!("script exhausted before the round ended; evaluating");
        driver.dispatch(RoundEvent::Evaluate { now_ms });
    }

    let mut sent: Vec<ResultPayload> = vec![];
    driver.submit(&mut sent)?;
    let payload = sent.pop().context("round produced no payload")?;
    let metrics = payload.metrics(board)?;
    let state = driver.into_state();

    Ok(RecordedRound {
        recorded_at: Utc::now(),
        content_id: payload.content_id.clone(),
        final_state: state.game_state(),
        ignored_clicks,
        payload,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use zengo_engine::{Coords, GameState, ResultType, WordMapping};
    use zengo_metrics::difficulty::BoardSize;

    use super::*;
    use crate::schema::record::ScriptedClick;

    fn content() -> BoardContent {
        let mappings = [("A", 0, 0), ("B", 1, 1), ("C", 2, 2)]
            .into_iter()
            .map(|(w, x, y)| WordMapping {
                word: w.to_owned(),
                coords: Coords::new(x, y),
            })
            .collect();
        BoardContent::new("abc", BoardSize::Three, mappings, 5, 3000)
            .unwrap()
            .with_text("A B C")
    }

    fn script(cells: &[(i32, i32)]) -> ClickScript {
        ClickScript {
            clicks: cells
                .iter()
                .zip(1..)
                .map(|(&(x, y), i)| ScriptedClick { x, y, at_ms: i * 1000 })
                .collect(),
        }
    }

    #[test]
    fn test_replay_stops_at_round_end() {
        let record = replay(content(), &script(&[(0, 0), (1, 1), (2, 2), (0, 1)])).unwrap();
        assert_eq!(record.final_state, GameState::FinishedSuccess);
        assert_eq!(record.ignored_clicks, 1);
        assert_eq!(record.payload.result_type, ResultType::Excellent);
        assert_eq!(record.payload.time_taken_ms, 3000);
    }

    #[test]
    fn test_replay_evaluates_unfinished_script() {
        let record = replay(content(), &script(&[(0, 0), (2, 1)])).unwrap();
        assert_eq!(record.final_state, GameState::FinishedFail);
        assert_eq!(record.ignored_clicks, 0);
        assert_eq!(record.payload.result_type, ResultType::Fail);
        assert_eq!(record.payload.correct_placements, 1);
        assert_eq!(record.payload.incorrect_placements, 1);
    }
}
