use super::{BotFeatures, classify, last_chance};
use crate::policy::PolicyError;
use hanabi_core::belief::close_exhausted;
use hanabi_core::game::action::Action;
use hanabi_core::game::view::SeatView;
use hanabi_core::model::hand::VisibleHand;
use hanabi_core::model::hint::{Clue, Hint};
use hanabi_core::model::intent::Intent;

/// Which rule produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionReason {
    /// Next player's Play label disagrees with what is playable right now.
    FixPlayLabel,
    /// Next player's oldest queued card is the last copy and its suit is unknown.
    ProtectLastChance,
    PlayKnown,
    DiscardKnown,
    DiscardQueued,
    /// Everything is kept and nothing else applies.
    ForcedPlay,
    AlwaysPlay,
    AlwaysDiscard,
}

impl DecisionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionReason::FixPlayLabel => "fix_play_label",
            DecisionReason::ProtectLastChance => "protect_last_chance",
            DecisionReason::PlayKnown => "play_known",
            DecisionReason::DiscardKnown => "discard_known",
            DecisionReason::DiscardQueued => "discard_queued",
            DecisionReason::ForcedPlay => "forced_play",
            DecisionReason::AlwaysPlay => "always_play",
            DecisionReason::AlwaysDiscard => "always_discard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn new(action: Action, reason: DecisionReason) -> Self {
        Self { action, reason }
    }
}

pub struct TurnPlanner;

impl TurnPlanner {
    /// Runs the full turn procedure: narrow globally, relabel own cards, then
    /// take the first applicable move in priority order.
    pub fn decide(view: &mut SeatView<'_>, features: BotFeatures) -> Result<Decision, PolicyError> {
        if view.own.is_empty() {
            return Err(PolicyError::EmptyHand(view.player));
        }
        if features.close_exhausted() {
            close_exhausted(&mut view.own, &view.others, &view.board)?;
        }
        Self::relabel(view);

        if view.can_hint()
            && let Some(next) = view.next_player()
        {
            if let Some(hint) = Self::fix_play_label(next, view) {
                return Ok(Decision::new(Action::Hint(hint), DecisionReason::FixPlayLabel));
            }
            if let Some(hint) = Self::protect_last_chance(next, view) {
                return Ok(Decision::new(
                    Action::Hint(hint),
                    DecisionReason::ProtectLastChance,
                ));
            }
        }

        if let Some(position) = Self::lowest_play(view) {
            return Ok(Decision::new(Action::Play { position }, DecisionReason::PlayKnown));
        }
        if let Some(position) = Self::first_labelled(view, Intent::Discard) {
            return Ok(Decision::new(
                Action::Discard { position },
                DecisionReason::DiscardKnown,
            ));
        }
        if let Some(position) = Self::first_labelled(view, Intent::Queue) {
            return Ok(Decision::new(
                Action::Discard { position },
                DecisionReason::DiscardQueued,
            ));
        }
        Ok(Decision::new(Action::Play { position: 0 }, DecisionReason::ForcedPlay))
    }

    /// Reclassifies every own card, then promotes queued cards with a
    /// resolved suit or number to Keep. An axis resolved by elimination
    /// counts the same as one resolved by a hint.
    pub fn relabel(view: &mut SeatView<'_>) {
        let board = view.board;
        for knowledge in view.own.iter_mut() {
            let label = classify(knowledge, &board);
            knowledge.set_label(label);
            let hinted = knowledge.known_suit().is_some() || knowledge.known_number().is_some();
            if label == Intent::Queue && hinted {
                knowledge.set_label(Intent::Keep);
            }
        }
    }

    fn fix_play_label(next: VisibleHand<'_>, view: &SeatView<'_>) -> Option<Hint> {
        next.iter().find_map(|(card, knowledge)| {
            let playable = view.board.allow_play(card);
            let labelled = knowledge.label() == Intent::Play;
            if playable == labelled {
                return None;
            }
            let clue = if knowledge.known_number().is_none() {
                Clue::Number(card.number)
            } else if knowledge.known_suit().is_none() {
                Clue::Suit(card.suit)
            } else {
                return None;
            };
            Hint::new(next.player(), clue, &next.cards()).ok()
        })
    }

    fn protect_last_chance(next: VisibleHand<'_>, view: &SeatView<'_>) -> Option<Hint> {
        let (card, knowledge) = next
            .iter()
            .find(|(_, knowledge)| knowledge.label() == Intent::Queue)?;
        if knowledge.known_suit().is_some() || !last_chance(card, next, &view.own, &view.board) {
            return None;
        }
        Hint::new(next.player(), Clue::Suit(card.suit), &next.cards()).ok()
    }

    /// Play-labelled card with the lowest resolved number; unresolved numbers
    /// sort last and ties go to the older card.
    fn lowest_play(view: &SeatView<'_>) -> Option<usize> {
        view.own
            .iter()
            .enumerate()
            .filter(|(_, knowledge)| knowledge.label() == Intent::Play)
            .min_by_key(|(position, knowledge)| {
                let number = knowledge.known_number().map_or(u8::MAX, |n| n.value());
                (number, *position)
            })
            .map(|(position, _)| position)
    }

    fn first_labelled(view: &SeatView<'_>, label: Intent) -> Option<usize> {
        view.own
            .iter()
            .position(|knowledge| knowledge.label() == label)
    }
}
