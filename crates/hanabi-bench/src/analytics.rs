use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use hanabi_core::game::snapshot::GameSnapshot;
use hanabi_core::model::board::MAX_SCORE;
use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::runner::Agent;

const Z_95: f64 = 1.96;

#[derive(Debug, Error)]
#[error("failed to render plot: {0}")]
pub struct PlotError(String);

#[derive(Default)]
struct Tally {
    scores: Vec<f64>,
    perfect: usize,
    fail_losses: usize,
    turns: u64,
    decisions: u64,
    decision_ms: f64,
}

/// Per-agent results on the shared decks, in configuration order.
pub struct Scoreboard {
    agents: Vec<(String, &'static str)>,
    tallies: Vec<Tally>,
    baseline: usize,
    latency_budget_ms: f64,
}

impl Scoreboard {
    pub fn new(agents: &[Agent], baseline: usize, latency_budget_ms: f64) -> Self {
        Self {
            agents: agents
                .iter()
                .map(|agent| (agent.name.clone(), agent.kind.as_str()))
                .collect(),
            tallies: agents.iter().map(|_| Tally::default()).collect(),
            baseline,
            latency_budget_ms,
        }
    }

    pub fn record(&mut self, agent: usize, snapshot: &GameSnapshot, decisions: u32, total_ms: f64) {
        let Some(tally) = self.tallies.get_mut(agent) else {
            return;
        };
        tally.scores.push(f64::from(snapshot.score));
        tally.perfect += usize::from(snapshot.score == MAX_SCORE);
        tally.fail_losses += usize::from(snapshot.lost_to_fails());
        tally.turns += u64::from(snapshot.turns);
        tally.decisions += u64::from(decisions);
        tally.decision_ms += total_ms;
    }

    pub fn finish(self) -> AnalyticsSummary {
        let empty = Vec::new();
        let baseline_scores = self
            .tallies
            .get(self.baseline)
            .map_or(&empty, |tally| &tally.scores);
        let baseline_mean = mean(baseline_scores);

        let agents = self
            .agents
            .iter()
            .zip(&self.tallies)
            .enumerate()
            .map(|(index, ((name, kind), tally))| {
                let games = tally.scores.len();
                let avg_score = mean(&tally.scores);
                let ms_per_decision = if tally.decisions == 0 {
                    0.0
                } else {
                    tally.decision_ms / tally.decisions as f64
                };
                let p_value = (index != self.baseline).then(|| {
                    let diffs: Vec<f64> = tally
                        .scores
                        .iter()
                        .zip(baseline_scores)
                        .map(|(score, base)| score - base)
                        .collect();
                    signed_rank_p(&diffs)
                });
                AgentReport {
                    name: name.clone(),
                    kind: *kind,
                    games,
                    avg_score,
                    ci95: confidence_interval(&tally.scores),
                    delta_vs_baseline: avg_score - baseline_mean,
                    perfect_games: tally.perfect,
                    fail_losses: tally.fail_losses,
                    avg_turns: if games == 0 { 0.0 } else { tally.turns as f64 / games as f64 },
                    ms_per_decision,
                    over_budget: ms_per_decision > self.latency_budget_ms,
                    p_value,
                }
            })
            .collect();

        AnalyticsSummary {
            baseline: self.agents.get(self.baseline).map(|(name, _)| name.clone()).unwrap_or_default(),
            latency_budget_ms: self.latency_budget_ms,
            agents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: &'static str,
    pub games: usize,
    pub avg_score: f64,
    pub ci95: (f64, f64),
    pub delta_vs_baseline: f64,
    pub perfect_games: usize,
    pub fail_losses: usize,
    pub avg_turns: f64,
    pub ms_per_decision: f64,
    pub over_budget: bool,
    /// Paired signed-rank test against the baseline; `None` for the baseline.
    pub p_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: String,
    pub latency_budget_ms: f64,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn report(&self, name: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn write_markdown(&self, path: &Path) -> io::Result<()> {
        let mut out = String::from("# Benchmark Summary\n\n");
        out.push_str(&format!(
            "Baseline: `{}`. Latency budget: {} ms per decision.\n\n",
            self.baseline, self.latency_budget_ms
        ));
        out.push_str("| Agent | Kind | Games | Avg score | Δ baseline | 95% CI | Perfect | Fail-outs | Avg turns | ms/decision | p-value |\n");
        out.push_str("|-------|------|-------|-----------|------------|--------|---------|-----------|-----------|-------------|---------|\n");
        for agent in &self.agents {
            let budget = if agent.over_budget { " (over)" } else { "" };
            let p_value = agent
                .p_value
                .map_or_else(|| "-".to_string(), |p| format!("{p:.3}"));
            out.push_str(&format!(
                "| {} | {} | {} | {:.3} | {:+.3} | [{:.2}, {:.2}] | {} | {} | {:.1} | {:.3}{budget} | {p_value} |\n",
                agent.name,
                agent.kind,
                agent.games,
                agent.avg_score,
                agent.delta_vs_baseline,
                agent.ci95.0,
                agent.ci95.1,
                agent.perfect_games,
                agent.fail_losses,
                agent.avg_turns,
                agent.ms_per_decision,
            ));
        }
        fs::write(path, out)
    }

    /// Bar chart of mean score per agent. Plotters panics when no font is
    /// available, so drawing runs under `catch_unwind` with the hook muted.
    pub fn render_plot(&self, path: &Path) -> Result<(), PlotError> {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| draw_bars(path, self)));
        panic::set_hook(previous);

        match attempt {
            Ok(result) => result.map_err(|err| PlotError(err.to_string())),
            Err(_) => Err(PlotError("plotters panicked (missing font support?)".into())),
        }
    }
}

fn draw_bars(path: &Path, summary: &AnalyticsSummary) -> Result<(), Box<dyn std::error::Error>> {
    let agents = &summary.agents;
    let baseline_avg = summary
        .report(&summary.baseline)
        .map_or(0.0, |agent| agent.avg_score);

    let root = BitMapBackend::new(path, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Mean score per agent", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0..agents.len(), 0.0..f64::from(MAX_SCORE) + 1.0)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc("Mean score")
        .x_label_formatter(&|idx| agents.get(*idx).map(|a| a.name.clone()).unwrap_or_default())
        .draw()?;
    chart.draw_series(agents.iter().enumerate().map(|(idx, agent)| {
        let color = if agent.name == summary.baseline {
            BLUE
        } else if agent.avg_score >= baseline_avg {
            GREEN
        } else {
            RED
        };
        Rectangle::new([(idx, 0.0), (idx + 1, agent.avg_score)], color.filled())
    }))?;
    root.present()?;
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() { 0.0 } else { values.mean() }
}

fn confidence_interval(scores: &[f64]) -> (f64, f64) {
    let centre = mean(scores);
    if scores.len() < 2 {
        return (centre, centre);
    }
    let margin = Z_95 * scores.std_dev() / (scores.len() as f64).sqrt();
    (centre - margin, centre + margin)
}

/// Two-sided Wilcoxon signed-rank p-value over paired score differences,
/// using the normal approximation with tie and continuity corrections. Zero
/// differences carry no information and are dropped.
fn signed_rank_p(diffs: &[f64]) -> f64 {
    let mut nonzero: Vec<f64> = diffs.iter().copied().filter(|d| *d != 0.0).collect();
    if nonzero.is_empty() {
        return 1.0;
    }
    nonzero.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

    let mut w_plus = 0.0;
    let mut ties = 0.0;
    let mut next_rank = 1.0;
    for group in nonzero.chunk_by(|a, b| a.abs() == b.abs()) {
        let size = group.len() as f64;
        let rank = next_rank + (size - 1.0) / 2.0;
        w_plus += rank * group.iter().filter(|d| **d > 0.0).count() as f64;
        ties += size.powi(3) - size;
        next_rank += size;
    }

    let n = nonzero.len() as f64;
    let expected = n * (n + 1.0) / 4.0;
    let variance = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0 - ties / 48.0;
    if variance <= 0.0 {
        return 1.0;
    }
    let z = ((w_plus - expected).abs() - 0.5).max(0.0) / variance.sqrt();
    Normal::new(0.0, 1.0)
        .map(|normal| (2.0 * (1.0 - normal.cdf(z))).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanabi_bot::{BotFeatures, BotKind};
    use hanabi_core::game::rules::Rules;
    use hanabi_core::game::state::GameState;

    fn agent(name: &str, kind: BotKind) -> Agent {
        Agent {
            name: name.to_string(),
            kind,
            features: BotFeatures::default(),
        }
    }

    fn snapshot_with_score(score: u8) -> GameSnapshot {
        let state = GameState::with_seed(Rules::new(2).expect("rules"), 1).expect("state");
        GameSnapshot {
            score,
            ..GameSnapshot::capture(&state)
        }
    }

    #[test]
    fn ties_with_the_baseline_give_no_evidence() {
        assert_eq!(signed_rank_p(&[0.0; 10]), 1.0);
        assert!(signed_rank_p(&[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]) > 0.5);
    }

    #[test]
    fn consistent_improvement_is_significant() {
        let diffs: Vec<f64> = (0..30).map(|i| 1.0 + (i % 4) as f64).collect();
        let p = signed_rank_p(&diffs);
        assert!(p < 0.01, "p = {p}");
    }

    #[test]
    fn interval_brackets_the_mean() {
        let (low, high) = confidence_interval(&[10.0, 12.0, 14.0, 16.0]);
        assert!(low < 13.0 && 13.0 < high);
        assert_eq!(confidence_interval(&[7.0]), (7.0, 7.0));
        assert_eq!(confidence_interval(&[]), (0.0, 0.0));
    }

    #[test]
    fn scoreboard_compares_each_agent_to_the_baseline() {
        let agents = [
            agent("steller", BotKind::Heuristic),
            agent("discarder", BotKind::AlwaysDiscard),
        ];
        let mut board = Scoreboard::new(&agents, 0, 5.0);
        for score in [20, 25, 18] {
            board.record(0, &snapshot_with_score(score), 10, 2.0);
            board.record(1, &snapshot_with_score(0), 10, 80.0);
        }
        let summary = board.finish();

        let steller = summary.report("steller").expect("steller");
        assert_eq!(steller.games, 3);
        assert_eq!(steller.perfect_games, 1);
        assert_eq!(steller.p_value, None);
        assert!((steller.avg_score - 21.0).abs() < 1e-9);

        let discarder = summary.report("discarder").expect("discarder");
        assert_eq!(discarder.kind, "always_discard");
        assert!((discarder.delta_vs_baseline + 21.0).abs() < 1e-9);
        assert!(discarder.over_budget);
        assert!(discarder.p_value.is_some_and(|p| p < 1.0));
    }
}
