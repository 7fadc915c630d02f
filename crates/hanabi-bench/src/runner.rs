use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Instant;

use crate::analytics::{AnalyticsSummary, Scoreboard};
use crate::config::{AgentConfig, BenchmarkConfig, OutputPaths, ValidationError};
use crate::logging::TelemetryGuard;
use crate::telemetry::{self, TelemetryError, TelemetrySummary};
use hanabi_bot::policy::{Policy, PolicyContext, PolicyError};
use hanabi_bot::{BotFeatures, BotKind};
use hanabi_core::game::rules::Rules;
use hanabi_core::game::snapshot::GameSnapshot;
use hanabi_core::game::state::{GameError, GameState};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

/// A configured strategy with its kind and feature flags resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub name: String,
    pub kind: BotKind,
    pub features: BotFeatures,
}

impl Agent {
    pub fn resolve(config: &AgentConfig, decision_details: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            name: config.name.clone(),
            kind: config.bot_kind()?,
            features: config.features(decision_details),
        })
    }
}

/// Plays every agent over the same seeded decks, seating one policy instance
/// of the agent's kind in every chair.
pub struct BenchRunner {
    config: BenchmarkConfig,
    paths: OutputPaths,
    rules: Rules,
    agents: Vec<Agent>,
    baseline: usize,
}

pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub paths: OutputPaths,
    pub plot_written: bool,
    pub analytics: AnalyticsSummary,
    pub telemetry: Option<TelemetrySummary>,
}

impl BenchRunner {
    pub fn new(config: BenchmarkConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let rules = config.games.rules().map_err(ValidationError::from)?;
        let agents = config
            .agents
            .iter()
            .map(|agent| Agent::resolve(agent, config.telemetry.decision_details))
            .collect::<Result<Vec<_>, _>>()?;
        let baseline = config
            .baseline_index()
            .ok_or_else(|| ValidationError::UnknownBaseline(config.baseline.clone()))?;

        Ok(Self {
            paths: config.output_paths(),
            config,
            rules,
            agents,
            baseline,
        })
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Plays the run and writes its artifacts. A telemetry guard is finished
    /// after the last game so the log is complete before it is summarised.
    pub fn run(&self, guard: Option<TelemetryGuard>) -> Result<RunSummary, RunnerError> {
        fs::create_dir_all(&self.paths.dir)?;
        let mut writer = BufWriter::new(File::create(&self.paths.games)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed);
        let mut scoreboard =
            Scoreboard::new(&self.agents, self.baseline, self.config.latency_budget_ms);
        let logging = guard.is_some();

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            for (slot, agent) in self.agents.iter().enumerate() {
                let outcome = self.play_game(game_index, game_seed, agent, logging)?;
                scoreboard.record(slot, &outcome.snapshot, outcome.decisions, outcome.total_ms);
                let row = GameRow {
                    run_id: &self.config.run_id,
                    game_index,
                    game_seed,
                    agent: &agent.name,
                    kind: agent.kind.as_str(),
                    lost_to_fails: outcome.snapshot.lost_to_fails(),
                    decisions: outcome.decisions,
                    ms_per_decision: outcome.ms_per_decision(),
                    snapshot: &outcome.snapshot,
                };
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()?;

        let analytics = scoreboard.finish();
        analytics.write_markdown(&self.paths.summary)?;
        let plot_written = match analytics.render_plot(&self.paths.plot) {
            Ok(()) => true,
            Err(err) => {
                event!(target: "hanabi_bench::run", Level::WARN, error = %err, "no plot written");
                false
            }
        };

        let telemetry = match guard {
            Some(guard) => {
                let log = guard.finish();
                let summary = telemetry::summarise(&log)?;
                telemetry::write_outputs(&summary, &self.paths.telemetry_summary, &self.paths.summary)?;
                Some(summary)
            }
            None => None,
        };

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written: self.config.games.count * self.agents.len(),
            paths: self.paths.clone(),
            plot_written,
            analytics,
            telemetry,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        game_seed: u64,
        agent: &Agent,
        logging: bool,
    ) -> Result<GameOutcome, RunnerError> {
        let mut state = GameState::with_seed(self.rules, game_seed)?;
        let mut seats: Vec<Box<dyn Policy>> =
            (0..self.rules.players()).map(|_| agent.kind.build()).collect();
        let mut decisions = 0u32;
        let mut total_ms = 0.0;

        while !state.is_done() {
            let player = state.current_player();
            let turn = state.turns();
            let policy = seats
                .get_mut(player.index())
                .ok_or(RunnerError::EmptySeat(player.index()))?;

            let (decision, elapsed_ms) = {
                let mut ctx = PolicyContext {
                    view: state.seat_view(player)?,
                    turn,
                    features: agent.features,
                };
                let start = Instant::now();
                let decision = policy.choose_action(&mut ctx)?;
                (decision, start.elapsed().as_secs_f64() * 1000.0)
            };
            decisions += 1;
            total_ms += elapsed_ms;

            if logging && tracing::enabled!(target: "hanabi_bench::turn", Level::INFO) {
                event!(
                    target: "hanabi_bench::turn",
                    Level::INFO,
                    game_index = game_index as u64,
                    agent = %agent.name,
                    player = %player,
                    turn,
                    action = %decision.action,
                    action_kind = decision.action.kind().as_str(),
                    reason = decision.reason.as_str(),
                    elapsed_ms
                );
            }

            state.apply(player, decision.action)?;
        }

        let snapshot = GameSnapshot::capture(&state);
        if logging {
            event!(
                target: "hanabi_bench::game",
                Level::INFO,
                game_index = game_index as u64,
                agent = %agent.name,
                score = snapshot.score,
                turns = snapshot.turns,
                lost_to_fails = snapshot.lost_to_fails(),
            );
        }

        Ok(GameOutcome {
            snapshot,
            decisions,
            total_ms,
        })
    }
}

struct GameOutcome {
    snapshot: GameSnapshot,
    decisions: u32,
    total_ms: f64,
}

impl GameOutcome {
    fn ms_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / f64::from(self.decisions)
        }
    }
}

/// One line of `games.jsonl`.
#[derive(Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    game_index: usize,
    game_seed: u64,
    agent: &'a str,
    kind: &'static str,
    lost_to_fails: bool,
    decisions: u32,
    ms_per_decision: f64,
    snapshot: &'a GameSnapshot,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid benchmark settings: {0}")]
    Config(#[from] ValidationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize game row: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("game rejected a move: {0}")]
    Game(#[from] GameError),
    #[error("policy failed to choose a move: {0}")]
    Policy(#[from] PolicyError),
    #[error("no policy seated at position {0}")]
    EmptySeat(usize),
    #[error("telemetry summary failed: {0}")]
    Telemetry(#[from] TelemetryError),
}
