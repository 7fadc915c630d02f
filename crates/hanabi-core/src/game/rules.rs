use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const DEFAULT_HINT_TOKENS: u8 = 8;
pub const FAIL_TOKENS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("player count {0} outside {MIN_PLAYERS}..={MAX_PLAYERS}")]
    PlayerCount(usize),
    #[error("hint token cap must be at least 1")]
    NoHintTokens,
}

/// Table parameters fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    players: usize,
    hint_tokens: u8,
}

impl Rules {
    pub fn new(players: usize) -> Result<Self, RulesError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(RulesError::PlayerCount(players));
        }
        Ok(Self {
            players,
            hint_tokens: DEFAULT_HINT_TOKENS,
        })
    }

    pub fn with_hint_tokens(mut self, cap: u8) -> Result<Self, RulesError> {
        if cap == 0 {
            return Err(RulesError::NoHintTokens);
        }
        self.hint_tokens = cap;
        Ok(self)
    }

    pub fn players(&self) -> usize {
        self.players
    }

    /// Hint token cap; games start full.
    pub fn hint_tokens(&self) -> u8 {
        self.hint_tokens
    }

    pub fn fail_tokens(&self) -> u8 {
        FAIL_TOKENS
    }

    pub fn hand_size(&self) -> usize {
        if self.players <= 3 { 5 } else { 4 }
    }

    /// Turns left once the deck runs dry, one per player.
    pub fn final_turns(&self) -> u8 {
        self.players as u8
    }
}
