use std::path::PathBuf;

use zengo_metrics::{ability::MetricsReport, difficulty::BoardSize, telemetry::SessionReport};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub struct ScoreArg {
    /// Session report or result payload (JSON)
    report_file: PathBuf,
    /// Board side length the session was played on
    #[arg(long, default_value = "3", value_parser = util::parse_board_size)]
    board_size: BoardSize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        report_file,
        board_size,
        output,
    } = arg;

    let report: SessionReport = util::read_json_file("session report", report_file)?;
    let metrics = MetricsReport::compute(&report, *board_size);
    tracing::info!(path = %metrics.path, board = %board_size, "session scored");
    Output::save_json(&metrics, output.as_deref())
}
