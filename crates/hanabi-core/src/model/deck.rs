use crate::model::board::Board;
use crate::model::card::Card;
use crate::model::number::Number;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

/// Cards in a full deck: five suits of 1,1,1,2,2,3,3,4,4,5.
pub const DECK_SIZE: usize = 50;

/// Where a physical card currently lives. Played and Discarded are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Location {
    InDeck,
    Held(PlayerId),
    Played,
    Discarded,
}

/// Handle to one physical card in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardSlot(usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationCounts {
    pub in_deck: u8,
    pub held: u8,
    pub played: u8,
    pub discarded: u8,
}

impl LocationCounts {
    pub fn total(&self) -> u8 {
        self.in_deck + self.held + self.played + self.discarded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("card {0} exceeds its copy count")]
    TooManyCopies(Card),
    #[error("card slot {0} is not in the deck")]
    UnknownSlot(usize),
    #[error("card {card} cannot move from {from:?} to {to:?}")]
    IllegalMove {
        card: Card,
        from: Location,
        to: Location,
    },
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    locations: Vec<Location>,
    cursor: usize,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for number in Number::ORDERED {
                for _ in 0..number.copies() {
                    cards.push(Card::new(suit, number));
                }
            }
        }
        Self::from_cards(cards)
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Self::standard().cards;
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Full deck whose draw order starts with `top`, followed by every
    /// remaining card in standard order.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut rest = Self::standard().cards;
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &card in top {
            let index = rest
                .iter()
                .position(|&c| c == card)
                .ok_or(DeckError::TooManyCopies(card))?;
            cards.push(rest.remove(index));
        }
        cards.extend(rest);
        Ok(Self::from_cards(cards))
    }

    fn from_cards(cards: Vec<Card>) -> Self {
        let locations = vec![Location::InDeck; cards.len()];
        Self {
            cards,
            locations,
            cursor: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, slot: CardSlot) -> Card {
        self.cards[slot.0]
    }

    pub fn location(&self, slot: CardSlot) -> Location {
        self.locations[slot.0]
    }

    /// Cards still in the draw pile.
    pub fn depth(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Takes the top card for `holder`, or `None` once the pile is empty.
    pub fn draw(&mut self, holder: PlayerId) -> Option<(CardSlot, Card)> {
        if self.cursor >= self.cards.len() {
            return None;
        }
        let slot = CardSlot(self.cursor);
        self.cursor += 1;
        self.locations[slot.0] = Location::Held(holder);
        Some((slot, self.cards[slot.0]))
    }

    pub fn mark_played(&mut self, slot: CardSlot) -> Result<Card, DeckError> {
        self.retire(slot, Location::Played)
    }

    pub fn mark_discarded(&mut self, slot: CardSlot) -> Result<Card, DeckError> {
        self.retire(slot, Location::Discarded)
    }

    fn retire(&mut self, slot: CardSlot, to: Location) -> Result<Card, DeckError> {
        let from = *self
            .locations
            .get(slot.0)
            .ok_or(DeckError::UnknownSlot(slot.0))?;
        let card = self.cards[slot.0];
        if !matches!(from, Location::Held(_)) {
            return Err(DeckError::IllegalMove { card, from, to });
        }
        self.locations[slot.0] = to;
        Ok(card)
    }

    /// Public view of the table derived from card locations.
    pub fn board(&self) -> Board {
        let mut board = Board::new();
        for (card, location) in self.cards.iter().zip(&self.locations) {
            match location {
                Location::Played => board.record_played(*card),
                Location::Discarded => board.record_discarded(*card),
                Location::InDeck | Location::Held(_) => {}
            }
        }
        board.set_depth(self.depth());
        board
    }

    pub fn location_counts(&self, card: Card) -> LocationCounts {
        let mut counts = LocationCounts::default();
        for (_, location) in self.cards.iter().zip(&self.locations).filter(|(c, _)| **c == card) {
            match location {
                Location::InDeck => counts.in_deck += 1,
                Location::Held(_) => counts.held += 1,
                Location::Played => counts.played += 1,
                Location::Discarded => counts.discarded += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_has_fifty_cards_with_copy_counts() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), DECK_SIZE);
        for card in Card::all() {
            assert_eq!(deck.location_counts(card).in_deck, card.copies());
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn draw_moves_cards_in_order_until_empty() {
        let mut deck = Deck::standard();
        let holder = PlayerId::new(0);
        let first = deck.draw(holder).expect("card available");
        assert_eq!(first.1, Card::new(Suit::Red, Number::One));
        assert_eq!(deck.location(first.0), Location::Held(holder));
        for _ in 1..DECK_SIZE {
            assert!(deck.draw(holder).is_some());
        }
        assert_eq!(deck.depth(), 0);
        assert!(deck.draw(holder).is_none());
    }

    #[test]
    fn stacked_deck_places_requested_cards_on_top() {
        let top = [
            Card::new(Suit::White, Number::Five),
            Card::new(Suit::Red, Number::One),
        ];
        let mut deck = Deck::stacked(&top).expect("legal stack");
        assert_eq!(deck.cards().len(), DECK_SIZE);
        let holder = PlayerId::new(1);
        assert_eq!(deck.draw(holder).map(|(_, c)| c), Some(top[0]));
        assert_eq!(deck.draw(holder).map(|(_, c)| c), Some(top[1]));
    }

    #[test]
    fn stacked_deck_rejects_extra_copies() {
        let five = Card::new(Suit::Blue, Number::Five);
        assert_eq!(
            Deck::stacked(&[five, five]).unwrap_err(),
            DeckError::TooManyCopies(five)
        );
    }

    #[test]
    fn retired_cards_never_move_again() {
        let mut deck = Deck::standard();
        let (slot, card) = deck.draw(PlayerId::new(0)).expect("card available");
        assert_eq!(deck.mark_played(slot), Ok(card));
        assert!(matches!(
            deck.mark_discarded(slot),
            Err(DeckError::IllegalMove { .. })
        ));
        let board = deck.board();
        assert_eq!(board.score(), 1);
        assert_eq!(board.depth(), DECK_SIZE - 1);
    }
}
