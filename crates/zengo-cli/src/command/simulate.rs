use std::{collections::BTreeSet, path::PathBuf};

use anyhow::Context as _;
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_distr::{Distribution as _, LogNormal};
use rand_pcg::Pcg32;
use zengo_engine::{
    BoardContent, ContentRequest, Coords, ResultPayload, ResultType, RoundDriver, RoundEvent,
    expected_order,
};
use zengo_metrics::{ability::CognitiveMetrics, difficulty::BoardSize};

use crate::{
    library::ContentLibrary,
    schema::simulation::{PlayerProfile, SimulatedRound, SimulationReport, SimulationSummary},
    util::{self, Output},
};

/// Pause between rounds on the simulated clock.
const ROUND_GAP_MS: u64 = 60_000;

#[derive(Debug, Clone, clap::Args)]
pub struct SimulateArg {
    /// Board content files (JSON object or array)
    #[arg(required = true)]
    content_files: Vec<PathBuf>,
    /// Number of rounds to play
    #[arg(long, default_value_t = 100)]
    rounds: usize,
    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Only play content for this board side length
    #[arg(long, value_parser = util::parse_board_size)]
    board_size: Option<BoardSize>,
    /// Only play content of this level
    #[arg(long)]
    level: Option<u32>,
    /// Only play content in this language
    #[arg(long)]
    language: Option<String>,
    /// Probability of remembering a word's cell
    #[arg(long, default_value_t = 0.8)]
    recall: f64,
    /// Probability of replaying words in sentence order
    #[arg(long, default_value_t = 0.7)]
    in_order: f64,
    /// Mean time between clicks
    #[arg(long, default_value_t = 1500.0)]
    mean_latency_ms: f64,
    /// Coefficient of variation of the time between clicks
    #[arg(long, default_value_t = 0.5)]
    latency_cv: f64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    let profile = PlayerProfile {
        recall: arg.recall,
        in_order: arg.in_order,
        mean_latency_ms: arg.mean_latency_ms,
        latency_cv: arg.latency_cv,
    };
    let mut player = Player::new(profile, Pcg32::seed_from_u64(rng.random()))?;
    let mut library = ContentLibrary::open(&arg.content_files, Pcg32::seed_from_u64(rng.random()))?;
    let request = ContentRequest {
        level: arg.level,
        language: arg.language.clone(),
        board_size: arg.board_size,
    };

    eprintln!("Simulating {} rounds (seed {seed})...", arg.rounds);
    let mut driver = RoundDriver::new();
    let mut rounds = Vec::with_capacity(arg.rounds);
    for index in 0..arg.rounds {
        let start_ms = u64::try_from(index).unwrap_or(u64::MAX).saturating_mul(ROUND_GAP_MS);
        let round = play_round(&mut driver, &mut library, &mut player, &request, start_ms)
            .with_context(|| format!("Round {index} failed"))?;
        rounds.push(round);
        driver.reset();
    }

    let summary = SimulationSummary::from_rounds(&rounds);
    print_summary(&summary);
    let report = SimulationReport {
        seed,
        player: profile,
        summary,
        rounds,
    };
    Output::save_json(&report, arg.output.as_deref())
}

fn play_round<R>(
    driver: &mut RoundDriver,
    library: &mut ContentLibrary<R>,
    player: &mut Player,
    request: &ContentRequest,
    start_ms: u64,
) -> anyhow::Result<SimulatedRound>
where
    R: Rng,
{
    driver.dispatch(RoundEvent::OpenSettings);
    driver.dispatch(RoundEvent::UpdateSettings(request.clone()));
    driver.load_content(library)?;
    let content = driver.state().content().cloned().context("no content attached")?;

    driver.start(start_ms);
    let mut now_ms = driver.next_deadline().context("round did not start")?;
    driver.poll(now_ms);

    for coords in player.plan(&content) {
        now_ms += player.latency_ms();
        if driver.click(i32::from(coords.x), i32::from(coords.y), now_ms).is_some() {
            break;
        }
    }
    if driver.state().game_state().is_playing() {
        driver.dispatch(RoundEvent::Evaluate { now_ms });
    }

    let mut sent: Vec<ResultPayload> = vec![];
    driver.submit(&mut sent)?;
    let payload = sent.pop().context("round produced no payload")?;
    let report = payload.session_report()?;
    let abilities = CognitiveMetrics::compute(&report, content.board_size());
    tracing::debug!(
        content_id = content.id(),
        result = %payload.result_type,
        score = payload.score,
        "simulated round"
    );
    Ok(SimulatedRound {
        content_id: content.id().to_owned(),
        payload,
        abilities,
    })
}

/// A player who remembers each word's cell with a fixed probability and
/// guesses a random free cell otherwise.
struct Player {
    profile: PlayerProfile,
    latency: LogNormal<f64>,
    rng: Pcg32,
}

impl Player {
    fn new(profile: PlayerProfile, rng: Pcg32) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&profile.recall) && (0.0..=1.0).contains(&profile.in_order),
            "probabilities must be within 0..=1"
        );
        let latency = LogNormal::from_mean_cv(profile.mean_latency_ms, profile.latency_cv)
            .map_err(|e| anyhow::anyhow!("invalid click latency distribution: {e}"))?;
        Ok(Self {
            profile,
            latency,
            rng,
        })
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn latency_ms(&mut self) -> u64 {
        self.latency.sample(&mut self.rng).round() as u64
    }

    /// Cells to click in order: one per word, then every remaining cell in
    /// random order so the round always ends.
    fn plan(&mut self, content: &BoardContent) -> Vec<Coords> {
        let mut targets = expected_order(content)
            .into_iter()
            .map(|index| content.word_mappings()[index].coords)
            .collect::<Vec<_>>();
        if !self.rng.random_bool(self.profile.in_order) {
            targets.shuffle(&mut self.rng);
        }

        let side = content.board_size().side();
        let mut free = (0..side)
            .flat_map(|y| (0..side).map(move |x| Coords::new(x, y)))
            .collect::<BTreeSet<_>>();
        let mut plan = Vec::with_capacity(free.len());
        for target in targets {
            let cell = if self.rng.random_bool(self.profile.recall) {
                target
            } else {
                let guesses = free.iter().filter(|&&c| c != target).copied().collect::<Vec<_>>();
                match guesses.as_slice() {
                    [] => target,
                    cells => cells[self.rng.random_range(0..cells.len())],
                }
            };
            if free.remove(&cell) {
                plan.push(cell);
            }
        }
        let mut rest = free.into_iter().collect::<Vec<_>>();
        rest.shuffle(&mut self.rng);
        plan.extend(rest);
        plan
    }
}

fn print_summary(summary: &SimulationSummary) {
    eprintln!("Played {} rounds", summary.rounds);
    for result_type in [ResultType::Excellent, ResultType::Success, ResultType::Fail] {
        let name = result_type.to_string();
        eprintln!("  {name:<16} {:6}", summary.count(result_type));
    }
    eprintln!("  {:<16} {:6.1}", "mean score", summary.mean_score);
    eprintln!("  {:<16} {:6.0}", "mean time (ms)", summary.mean_time_taken_ms);
    eprintln!("Mean abilities:");
    for (ability, value) in &summary.mean_abilities {
        let name = ability.to_string();
        eprintln!("  {name:<24} {value:6.1}");
    }
}

#[cfg(test)]
mod tests {
    use zengo_engine::WordMapping;

    use super::*;

    fn content() -> BoardContent {
        let mappings = [("A", 0, 0), ("B", 1, 1), ("C", 2, 2)]
            .into_iter()
            .map(|(w, x, y)| WordMapping {
                word: w.to_owned(),
                coords: Coords::new(x, y),
            })
            .collect();
        BoardContent::new("abc", BoardSize::Three, mappings, 9, 3000)
            .unwrap()
            .with_text("A B C")
    }

    fn player(recall: f64, in_order: f64) -> Player {
        let profile = PlayerProfile {
            recall,
            in_order,
            mean_latency_ms: 1000.0,
            latency_cv: 0.3,
        };
        Player::new(profile, Pcg32::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_perfect_player_plans_sentence_order() {
        let plan = player(1.0, 1.0).plan(&content());
        assert_eq!(plan.len(), 9);
        assert_eq!(plan[..3], [Coords::new(0, 0), Coords::new(1, 1), Coords::new(2, 2)]);
        assert_eq!(plan.iter().collect::<BTreeSet<_>>().len(), 9);
    }

    #[test]
    fn test_rejects_invalid_probability() {
        let profile = PlayerProfile {
            recall: 1.5,
            in_order: 0.5,
            mean_latency_ms: 1000.0,
            latency_cv: 0.3,
        };
        assert!(Player::new(profile, Pcg32::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_simulated_rounds_are_reproducible() {
        let play = || {
            let mut library = ContentLibrary::new(vec![content()], Pcg32::seed_from_u64(1));
            let mut player = player(0.6, 0.5);
            let mut driver = RoundDriver::new();
            (0..5)
                .map(|i| {
                    let round =
                        play_round(&mut driver, &mut library, &mut player, &ContentRequest::default(), i * ROUND_GAP_MS)
                            .unwrap();
                    driver.reset();
                    round.payload
                })
                .collect::<Vec<_>>()
        };
        let first = play();
        assert_eq!(first, play());
        assert!(first.iter().all(|p| p.used_stones_count <= 9));
    }

    #[test]
    fn test_perfect_player_is_excellent() {
        let mut library = ContentLibrary::new(vec![content()], Pcg32::seed_from_u64(1));
        let mut driver = RoundDriver::new();
        let round = play_round(&mut driver, &mut library, &mut player(1.0, 1.0), &ContentRequest::default(), 0).unwrap();
        assert_eq!(round.payload.result_type, ResultType::Excellent);
        assert_eq!(round.payload.used_stones_count, 3);
        assert!(round.payload.detailed_metrics.is_some());
    }
}
