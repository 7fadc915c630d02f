use crate::game::rules::Rules;
use crate::model::board::Board;
use crate::model::hand::{OwnHand, VisibleHand};
use crate::model::player::PlayerId;

/// Everything one seat may consult when deciding its move: its own knowledge
/// (never the cards themselves), every other hand in full, and the public
/// table. Other hands are ordered by turn, starting with the next player.
#[derive(Debug)]
pub struct SeatView<'a> {
    pub player: PlayerId,
    pub own: OwnHand<'a>,
    pub others: Vec<VisibleHand<'a>>,
    pub board: Board,
    pub hints: u8,
    pub rules: Rules,
}

impl<'a> SeatView<'a> {
    pub fn next_player(&self) -> Option<VisibleHand<'a>> {
        self.others.first().copied()
    }

    pub fn can_hint(&self) -> bool {
        self.hints > 0
    }
}
