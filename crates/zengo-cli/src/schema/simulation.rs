use std::collections::BTreeMap;

use serde::Serialize;
use zengo_engine::{ResultPayload, ResultType};
use zengo_metrics::ability::{Ability, CognitiveMetrics};

/// Parameters of the simulated player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// Probability of remembering where a word was
    pub recall: f64,
    /// Probability of replaying the words in sentence order
    pub in_order: f64,
    pub mean_latency_ms: f64,
    /// Coefficient of variation of the click latency
    pub latency_cv: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedRound {
    pub content_id: String,
    pub payload: ResultPayload,
    pub abilities: CognitiveMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub rounds: usize,
    pub results: BTreeMap<String, usize>,
    pub mean_score: f64,
    pub mean_time_taken_ms: f64,
    pub mean_abilities: BTreeMap<Ability, f64>,
}

impl SimulationSummary {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_rounds(rounds: &[SimulatedRound]) -> Self {
        if rounds.is_empty() {
            return Self::default();
        }
        let n = rounds.len() as f64;
        let mut results = BTreeMap::new();
        let mut mean_abilities = BTreeMap::new();
        for round in rounds {
            *results.entry(round.payload.result_type.to_string()).or_insert(0) += 1;
            for (ability, value) in round.abilities.iter() {
                *mean_abilities.entry(ability).or_insert(0.0) += f64::from(value) / n;
            }
        }
        Self {
            rounds: rounds.len(),
            results,
            mean_score: rounds.iter().map(|r| f64::from(r.payload.score)).sum::<f64>() / n,
            mean_time_taken_ms: rounds.iter().map(|r| r.payload.time_taken_ms as f64).sum::<f64>() / n,
            mean_abilities,
        }
    }

    #[must_use]
    pub fn count(&self, result_type: ResultType) -> usize {
        self.results.get(&result_type.to_string()).copied().unwrap_or(0)
    }
}

/// Output of the `simulate` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub seed: u64,
    pub player: PlayerProfile,
    pub summary: SimulationSummary,
    pub rounds: Vec<SimulatedRound>,
}
