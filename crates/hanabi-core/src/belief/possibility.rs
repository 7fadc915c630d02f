use crate::model::card::Card;
use crate::model::number::Number;
use crate::model::suit::Suit;

/// Set of card identities still consistent with public information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PossibilitySet(u32);

impl PossibilitySet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self((1 << Card::KINDS) - 1);

    pub fn only(card: Card) -> Self {
        Self::EMPTY.with(card)
    }

    pub fn contains(self, card: Card) -> bool {
        self.0 & bit(card) != 0
    }

    pub fn with(mut self, card: Card) -> Self {
        self.0 |= bit(card);
        self
    }

    pub fn without(mut self, card: Card) -> Self {
        self.0 &= !bit(card);
        self
    }

    /// Keeps only the identities for which `keep` holds.
    pub fn filter(self, mut keep: impl FnMut(Card) -> bool) -> Self {
        self.iter()
            .filter(|&card| keep(card))
            .fold(Self::EMPTY, Self::with)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Card> {
        (0..Card::KINDS as u8)
            .filter(move |&id| self.0 & (1 << id) != 0)
            .filter_map(Card::from_id)
    }

    /// The identity, once only one remains.
    pub fn single(self) -> Option<Card> {
        if self.len() == 1 { self.iter().next() } else { None }
    }

    /// Suit shared by every remaining identity.
    pub fn known_suit(self) -> Option<Suit> {
        let mut suits = self.iter().map(|card| card.suit);
        let first = suits.next()?;
        suits.all(|suit| suit == first).then_some(first)
    }

    /// Number shared by every remaining identity.
    pub fn known_number(self) -> Option<Number> {
        let mut numbers = self.iter().map(|card| card.number);
        let first = numbers.next()?;
        numbers.all(|number| number == first).then_some(first)
    }
}

impl Default for PossibilitySet {
    fn default() -> Self {
        Self::FULL
    }
}

fn bit(card: Card) -> u32 {
    1 << card.to_id()
}
