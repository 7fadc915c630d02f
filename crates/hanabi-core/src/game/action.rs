use crate::model::card::Card;
use crate::model::hint::{Clue, Hint};
use crate::model::player::PlayerId;
use serde::Serialize;
use std::fmt;

/// One turn's move, addressed by hand position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Play { position: usize },
    Discard { position: usize },
    Hint(Hint),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Play { .. } => ActionKind::Play,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Hint(_) => ActionKind::Hint,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play { position } => write!(f, "play card {}", position + 1),
            Action::Discard { position } => write!(f, "discard card {}", position + 1),
            Action::Hint(hint) => write!(f, "hint {} {}", hint.target(), hint),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Play,
    Discard,
    Hint,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Play => "play",
            ActionKind::Discard => "discard",
            ActionKind::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub card: Card,
    pub success: bool,
    /// `None` once the deck is empty.
    pub drew: Option<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardOutcome {
    pub card: Card,
    pub drew: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Played(PlayOutcome),
    Discarded(DiscardOutcome),
    Hinted {
        target: PlayerId,
        clue: Clue,
        positions: Vec<usize>,
    },
}

impl ActionOutcome {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionOutcome::Played(_) => ActionKind::Play,
            ActionOutcome::Discarded(_) => ActionKind::Discard,
            ActionOutcome::Hinted { .. } => ActionKind::Hint,
        }
    }
}
