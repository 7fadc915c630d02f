use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use hanabi_bot::{BotFeatures, BotKind};
use hanabi_core::game::rules::{DEFAULT_HINT_TOKENS, Rules, RulesError};
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

const DEFAULT_LATENCY_BUDGET_MS: f64 = 5.0;

/// One benchmark run, loaded from YAML. Every agent plays every game.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GameConfig,
    pub agents: Vec<AgentConfig>,
    /// Agent the others are compared against.
    pub baseline: String,
    #[serde(default = "default_latency_budget")]
    pub latency_budget_ms: f64,
    /// Artifacts land in `<output_dir>/<run_id>/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: u64,
    pub count: usize,
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default = "default_hint_tokens")]
    pub hint_tokens: u8,
}

/// A named strategy. `kind` falls back to `HANABI_BOT_KIND` when omitted;
/// `close_exhausted` overrides `HANABI_CLOSE_EXHAUSTED`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub close_exhausted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub decision_details: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_level(),
            decision_details: false,
        }
    }
}

/// Where a run writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub games: PathBuf,
    pub summary: PathBuf,
    pub plot: PathBuf,
    pub telemetry: PathBuf,
    pub telemetry_summary: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("run_id {0:?} must be a non-empty file name")]
    RunId(String),
    #[error("games.count must be at least 1")]
    NoGames,
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("at least one agent must be configured")]
    NoAgents,
    #[error("agent name {0:?} must be a non-empty file name")]
    AgentName(String),
    #[error("agent {0:?} is defined more than once")]
    DuplicateAgent(String),
    #[error("agent {name:?}: {message}")]
    AgentKind { name: String, message: String },
    #[error("baseline {0:?} is not one of the configured agents")]
    UnknownBaseline(String),
    #[error("latency budget must be positive, got {0}")]
    LatencyBudget(f64),
    #[error("unknown telemetry level {0:?}")]
    Level(String),
}

impl BenchmarkConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config
            .validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_file_name(&self.run_id) {
            return Err(ValidationError::RunId(self.run_id.clone()));
        }
        if self.games.count == 0 {
            return Err(ValidationError::NoGames);
        }
        self.games.rules()?;
        if self.agents.is_empty() {
            return Err(ValidationError::NoAgents);
        }
        let mut names = HashSet::new();
        for agent in &self.agents {
            if !is_file_name(&agent.name) {
                return Err(ValidationError::AgentName(agent.name.clone()));
            }
            if !names.insert(agent.name.as_str()) {
                return Err(ValidationError::DuplicateAgent(agent.name.clone()));
            }
            agent.bot_kind()?;
        }
        if !names.contains(self.baseline.as_str()) {
            return Err(ValidationError::UnknownBaseline(self.baseline.clone()));
        }
        if !(self.latency_budget_ms > 0.0) {
            return Err(ValidationError::LatencyBudget(self.latency_budget_ms));
        }
        self.telemetry.level()?;
        Ok(())
    }

    pub fn baseline_index(&self) -> Option<usize> {
        self.agents.iter().position(|agent| agent.name == self.baseline)
    }

    pub fn output_paths(&self) -> OutputPaths {
        let dir = self.output_dir.join(&self.run_id);
        OutputPaths {
            games: dir.join("games.jsonl"),
            summary: dir.join("summary.md"),
            plot: dir.join("mean_score.png"),
            telemetry: dir.join("telemetry.jsonl"),
            telemetry_summary: dir.join("telemetry_summary.json"),
            dir,
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> Result<Rules, RulesError> {
        Rules::new(self.players)?.with_hint_tokens(self.hint_tokens)
    }
}

impl AgentConfig {
    pub fn bot_kind(&self) -> Result<BotKind, ValidationError> {
        match &self.kind {
            Some(raw) => raw.parse().map_err(|message| ValidationError::AgentKind {
                name: self.name.clone(),
                message,
            }),
            None => Ok(BotKind::from_env()),
        }
    }

    pub fn features(&self, decision_details: bool) -> BotFeatures {
        let env = BotFeatures::from_env();
        BotFeatures::new(
            self.close_exhausted.unwrap_or(env.close_exhausted()),
            env.decision_details() || decision_details,
        )
    }
}

impl TelemetryConfig {
    pub fn level(&self) -> Result<Level, ValidationError> {
        self.level
            .parse()
            .map_err(|_| ValidationError::Level(self.level.clone()))
    }
}

fn is_file_name(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && raw != "."
        && raw != ".."
}

fn default_latency_budget() -> f64 {
    DEFAULT_LATENCY_BUDGET_MS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("bench/out")
}

fn default_players() -> usize {
    2
}

fn default_hint_tokens() -> u8 {
    DEFAULT_HINT_TOKENS
}

fn default_level() -> String {
    "info".to_string()
}
