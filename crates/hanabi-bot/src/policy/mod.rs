mod baseline;
mod heuristic;

pub use baseline::{AlwaysDiscard, AlwaysPlay};
pub use heuristic::HeuristicPolicy;

use crate::bot::{BotFeatures, Decision};
use hanabi_core::belief::KnowledgeError;
use hanabi_core::game::view::SeatView;
use hanabi_core::model::player::PlayerId;
use thiserror::Error;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub view: SeatView<'a>,
    pub turn: u32,
    pub features: BotFeatures,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{0} has no cards to act with")]
    EmptyHand(PlayerId),
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}

/// One seat's strategy. Implementations see their own cards only through
/// `SeatView::own`.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Chooses this turn's move. May update the seat's own labels.
    fn choose_action(&mut self, ctx: &mut PolicyContext<'_>) -> Result<Decision, PolicyError>;
}
