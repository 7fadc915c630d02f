use crate::belief::KnowledgeError;
use crate::game::action::{Action, ActionOutcome, DiscardOutcome, PlayOutcome};
use crate::game::rules::Rules;
use crate::game::view::SeatView;
use crate::model::board::Board;
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError, LocationCounts};
use crate::model::hand::{Hand, HeldCard, VisibleHand};
use crate::model::hint::{Hint, HintError};
use crate::model::number::Number;
use crate::model::player::PlayerId;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error("{actual} moved out of turn; {expected} is to act")]
    OutOfTurn {
        expected: PlayerId,
        actual: PlayerId,
    },
    #[error("no player {0} at this table")]
    UnknownPlayer(PlayerId),
    #[error("{player} has no card at position {position}")]
    InvalidPosition { player: PlayerId, position: usize },
    #[error("no hint tokens left")]
    NoHintTokens,
    #[error("{0} cannot hint themselves")]
    SelfHint(PlayerId),
    #[error("hint positions no longer match {0}'s hand")]
    StaleHint(PlayerId),
    #[error(transparent)]
    Hint(#[from] HintError),
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Owns the deck, every hand and the shared token counters. Nothing outside
/// this type mutates table state.
#[derive(Debug, Clone)]
pub struct GameState {
    rules: Rules,
    deck: Deck,
    hands: Vec<Hand>,
    hints: u8,
    fails: u8,
    final_turns: u8,
    current: PlayerId,
    turns: u32,
    seed: Option<u64>,
}

impl GameState {
    pub fn with_seed(rules: Rules, seed: u64) -> Result<Self, GameError> {
        let mut state = Self::from_deck(rules, Deck::shuffled_with_seed(seed))?;
        state.seed = Some(seed);
        Ok(state)
    }

    /// Deals round-robin from player 0, one card at a time.
    pub fn from_deck(rules: Rules, deck: Deck) -> Result<Self, GameError> {
        let mut state = Self {
            rules,
            deck,
            hands: vec![Hand::new(); rules.players()],
            hints: rules.hint_tokens(),
            fails: rules.fail_tokens(),
            final_turns: rules.final_turns(),
            current: PlayerId::new(0),
            turns: 0,
            seed: None,
        };
        for _ in 0..rules.hand_size() {
            for player in PlayerId::all(rules.players()) {
                state.draw(player)?;
            }
        }
        Ok(state)
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hints(&self) -> u8 {
        self.hints
    }

    pub fn fails(&self) -> u8 {
        self.fails
    }

    pub fn final_turns(&self) -> u8 {
        self.final_turns
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.hands.get(player.index())
    }

    pub fn board(&self) -> Board {
        self.deck.board()
    }

    pub fn score(&self) -> u8 {
        self.board().score()
    }

    pub fn is_done(&self) -> bool {
        self.board().is_complete() || self.fails == 0 || self.final_turns == 0
    }

    pub fn location_counts(&self, card: Card) -> LocationCounts {
        self.deck.location_counts(card)
    }

    /// Draws the top card into `player`'s hand. An empty deck costs one
    /// final turn instead.
    pub fn draw(&mut self, player: PlayerId) -> Result<Option<Card>, GameError> {
        let hand = self
            .hands
            .get_mut(player.index())
            .ok_or(GameError::UnknownPlayer(player))?;
        match self.deck.draw(player) {
            Some((slot, card)) => {
                hand.push(HeldCard::new(slot, card));
                Ok(Some(card))
            }
            None => {
                self.final_turns = self.final_turns.saturating_sub(1);
                event!(
                    target: "hanabi_core::game",
                    Level::DEBUG,
                    player = %player,
                    final_turns = self.final_turns,
                    "deck empty"
                );
                Ok(None)
            }
        }
    }

    pub fn play(&mut self, player: PlayerId, position: usize) -> Result<PlayOutcome, GameError> {
        let held = self.take(player, position)?;
        let card = held.card();
        let success = self.board().allow_play(card);
        if success {
            self.deck.mark_played(held.slot())?;
            if card.number == Number::Five {
                self.refill_hint();
            }
        } else {
            self.deck.mark_discarded(held.slot())?;
            self.fails = self.fails.saturating_sub(1);
        }
        event!(
            target: "hanabi_core::game",
            Level::DEBUG,
            player = %player,
            card = %card,
            success,
            score = self.score(),
            fails = self.fails,
            "play"
        );
        let drew = self.draw(player)?;
        Ok(PlayOutcome {
            card,
            success,
            drew,
        })
    }

    pub fn discard(
        &mut self,
        player: PlayerId,
        position: usize,
    ) -> Result<DiscardOutcome, GameError> {
        let held = self.take(player, position)?;
        let card = self.deck.mark_discarded(held.slot())?;
        self.refill_hint();
        event!(
            target: "hanabi_core::game",
            Level::DEBUG,
            player = %player,
            card = %card,
            hints = self.hints,
            "discard"
        );
        let drew = self.draw(player)?;
        Ok(DiscardOutcome { card, drew })
    }

    /// Spends a token and narrows the target's knowledge. The hint must have
    /// been built against the target's current hand.
    pub fn give_hint(&mut self, from: PlayerId, hint: &Hint) -> Result<(), GameError> {
        if self.hints == 0 {
            return Err(GameError::NoHintTokens);
        }
        let target = hint.target();
        if target == from {
            return Err(GameError::SelfHint(from));
        }
        let hand = self
            .hands
            .get_mut(target.index())
            .ok_or(GameError::UnknownPlayer(target))?;
        let fresh = Hint::new(target, hint.clue(), &hand.cards())?;
        if fresh.positions() != hint.positions() {
            return Err(GameError::StaleHint(target));
        }
        hand.receive_hint(hint)?;
        self.hints -= 1;
        event!(
            target: "hanabi_core::game",
            Level::DEBUG,
            player = %from,
            target = %target,
            hint = %hint,
            hints = self.hints,
            "hint"
        );
        Ok(())
    }

    /// Applies the current player's move, then passes the turn.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<ActionOutcome, GameError> {
        if self.is_done() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::OutOfTurn {
                expected: self.current,
                actual: player,
            });
        }
        let outcome = match action {
            Action::Play { position } => ActionOutcome::Played(self.play(player, position)?),
            Action::Discard { position } => {
                ActionOutcome::Discarded(self.discard(player, position)?)
            }
            Action::Hint(hint) => {
                self.give_hint(player, &hint)?;
                ActionOutcome::Hinted {
                    target: hint.target(),
                    clue: hint.clue(),
                    positions: hint.positions().to_vec(),
                }
            }
        };
        self.advance();
        Ok(outcome)
    }

    /// Passes the turn to the next seat holding cards.
    pub fn advance(&mut self) {
        self.turns += 1;
        let players = self.rules.players();
        let mut next = self.current.next(players);
        for _ in 0..players {
            if !self.hands[next.index()].is_empty() {
                break;
            }
            next = next.next(players);
        }
        self.current = next;
    }

    /// Splits the table into the deciding seat's private knowledge and the
    /// hands it can see.
    pub fn seat_view(&mut self, player: PlayerId) -> Result<SeatView<'_>, GameError> {
        let players = self.rules.players();
        let board = self.deck.board();
        let mut own = None;
        let mut seats: Vec<Option<VisibleHand<'_>>> = vec![None; players];
        for (index, hand) in self.hands.iter_mut().enumerate() {
            let seat = PlayerId::new(index as u8);
            if seat == player {
                own = Some(hand.own_view());
            } else {
                let hand: &Hand = hand;
                seats[index] = Some(hand.visible_view(seat));
            }
        }
        let own = own.ok_or(GameError::UnknownPlayer(player))?;
        let others = player
            .others(players)
            .filter_map(|seat| seats[seat.index()])
            .collect();
        Ok(SeatView {
            player,
            own,
            others,
            board,
            hints: self.hints,
            rules: self.rules,
        })
    }

    fn take(&mut self, player: PlayerId, position: usize) -> Result<HeldCard, GameError> {
        self.hands
            .get_mut(player.index())
            .ok_or(GameError::UnknownPlayer(player))?
            .remove(position)
            .ok_or(GameError::InvalidPosition { player, position })
    }

    fn refill_hint(&mut self) {
        self.hints = (self.hints + 1).min(self.rules.hint_tokens());
    }
}
