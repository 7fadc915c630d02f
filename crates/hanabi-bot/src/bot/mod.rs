mod classify;
mod last_chance;
mod turn;

pub use classify::classify;
pub use last_chance::last_chance;
pub use turn::{Decision, DecisionReason, TurnPlanner};

use crate::policy::{AlwaysDiscard, AlwaysPlay, HeuristicPolicy, Policy};
use std::fmt;
use std::str::FromStr;

/// Which strategy a seat runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BotKind {
    #[default]
    Heuristic,
    AlwaysPlay,
    AlwaysDiscard,
}

impl BotKind {
    pub const ALL: [BotKind; 3] = [BotKind::Heuristic, BotKind::AlwaysPlay, BotKind::AlwaysDiscard];

    /// Kind named by `HANABI_BOT_KIND`, or the heuristic when unset or
    /// unrecognised.
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("HANABI_BOT_KIND")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotKind::Heuristic => "heuristic",
            BotKind::AlwaysPlay => "always_play",
            BotKind::AlwaysDiscard => "always_discard",
        }
    }

    pub fn build(self) -> Box<dyn Policy> {
        match self {
            BotKind::Heuristic => Box::new(HeuristicPolicy::new()),
            BotKind::AlwaysPlay => Box::new(AlwaysPlay),
            BotKind::AlwaysDiscard => Box::new(AlwaysDiscard),
        }
    }
}

impl FromStr for BotKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "heuristic" | "steller" | "default" => Ok(BotKind::Heuristic),
            "always_play" | "play" => Ok(BotKind::AlwaysPlay),
            "always_discard" | "discard" => Ok(BotKind::AlwaysDiscard),
            other => Err(format!("unknown bot kind '{other}'")),
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotFeatures {
    close_exhausted: bool,
    decision_details: bool,
}

impl BotFeatures {
    pub const fn new(close_exhausted: bool, decision_details: bool) -> Self {
        Self {
            close_exhausted,
            decision_details,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn close_exhausted(self) -> bool {
        self.close_exhausted
    }

    pub const fn decision_details(self) -> bool {
        self.decision_details
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let close_exhausted = read("HANABI_CLOSE_EXHAUSTED")
            .map(|raw| flag_enabled(&raw))
            .unwrap_or(true);
        let decision_details = read("HANABI_DECISION_DETAILS")
            .map(|raw| flag_enabled(&raw))
            .unwrap_or(false);
        Self {
            close_exhausted,
            decision_details,
        }
    }
}

impl Default for BotFeatures {
    fn default() -> Self {
        Self::new(true, false)
    }
}

fn flag_enabled(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON")
}
