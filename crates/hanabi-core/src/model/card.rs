use crate::model::number::Number;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identity of a card: suit and number. Two copies of the same card compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub number: Number,
}

impl Card {
    /// Number of distinct (suit, number) identities.
    pub const KINDS: usize = Suit::COUNT * Number::COUNT;

    pub const fn new(suit: Suit, number: Number) -> Self {
        Self { suit, number }
    }

    pub const fn copies(self) -> u8 {
        self.number.copies()
    }

    /// Dense index in `0..Card::KINDS`, suit-major.
    pub const fn to_id(self) -> u8 {
        (self.suit.index() * Number::COUNT + self.number.index()) as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        let id = id as usize;
        if id >= Self::KINDS {
            return None;
        }
        match (
            Suit::from_index(id / Number::COUNT),
            Number::from_index(id % Number::COUNT),
        ) {
            (Some(suit), Some(number)) => Some(Self::new(suit, number)),
            _ => None,
        }
    }

    /// Every identity in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Number::ORDERED.into_iter().map(move |n| Card::new(suit, n)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Number, Suit};

    #[test]
    fn id_roundtrip_covers_all_kinds() {
        let cards: Vec<Card> = Card::all().collect();
        assert_eq!(cards.len(), Card::KINDS);
        for (expected, card) in cards.iter().enumerate() {
            assert_eq!(card.to_id() as usize, expected);
            assert_eq!(Card::from_id(card.to_id()), Some(*card));
        }
        assert_eq!(Card::from_id(25), None);
    }

    #[test]
    fn copies_follow_number() {
        assert_eq!(Card::new(Suit::Blue, Number::One).copies(), 3);
        assert_eq!(Card::new(Suit::Blue, Number::Three).copies(), 2);
        assert_eq!(Card::new(Suit::Blue, Number::Five).copies(), 1);
    }

    #[test]
    fn display_combines_suit_and_number() {
        assert_eq!(Card::new(Suit::Green, Number::Four).to_string(), "G4");
    }
}
