use crate::model::card::Card;
use crate::model::number::Number;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use core::fmt;
use serde::Serialize;
use thiserror::Error;

/// The single dimension and value a hint discloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum Clue {
    Suit(Suit),
    Number(Number),
}

impl Clue {
    /// Builds a clue from optional parts; exactly one must be present.
    pub fn from_parts(suit: Option<Suit>, number: Option<Number>) -> Result<Self, HintError> {
        match (suit, number) {
            (Some(suit), None) => Ok(Clue::Suit(suit)),
            (None, Some(number)) => Ok(Clue::Number(number)),
            (Some(_), Some(_)) => Err(HintError::BothDimensions),
            (None, None) => Err(HintError::NoDimension),
        }
    }

    pub fn matches(self, card: Card) -> bool {
        match self {
            Clue::Suit(suit) => card.suit == suit,
            Clue::Number(number) => card.number == number,
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clue::Suit(suit) => write!(f, "suit {suit}"),
            Clue::Number(number) => write!(f, "number {number}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("a hint names either a suit or a number, not both")]
    BothDimensions,
    #[error("a hint must name a suit or a number")]
    NoDimension,
    #[error("{clue} matches none of {target}'s cards")]
    NoMatch { target: PlayerId, clue: Clue },
}

/// A public disclosure to one player. Matching positions are fixed against the
/// target's hand at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    target: PlayerId,
    clue: Clue,
    positions: Vec<usize>,
}

impl Hint {
    pub fn new(target: PlayerId, clue: Clue, hand: &[Card]) -> Result<Self, HintError> {
        let positions: Vec<usize> = hand
            .iter()
            .enumerate()
            .filter(|(_, card)| clue.matches(**card))
            .map(|(index, _)| index)
            .collect();
        if positions.is_empty() {
            return Err(HintError::NoMatch { target, clue });
        }
        Ok(Self {
            target,
            clue,
            positions,
        })
    }

    pub fn target(&self) -> PlayerId {
        self.target
    }

    pub fn clue(&self) -> Clue {
        self.clue
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn matches_position(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions = self
            .positions
            .iter()
            .map(|p| (p + 1).to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "cards {positions} = {}", self.clue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> Vec<Card> {
        vec![
            Card::new(Suit::Red, Number::One),
            Card::new(Suit::Blue, Number::Three),
            Card::new(Suit::Green, Number::One),
            Card::new(Suit::Red, Number::Four),
            Card::new(Suit::White, Number::Two),
        ]
    }

    #[test]
    fn number_hint_lists_matching_positions() {
        let hint = Hint::new(PlayerId::new(1), Clue::Number(Number::One), &hand()).unwrap();
        assert_eq!(hint.positions(), &[0, 2]);
        assert!(hint.matches_position(2));
        assert!(!hint.matches_position(1));
    }

    #[test]
    fn suit_hint_lists_matching_positions() {
        let hint = Hint::new(PlayerId::new(1), Clue::Suit(Suit::Red), &hand()).unwrap();
        assert_eq!(hint.positions(), &[0, 3]);
        assert_eq!(hint.to_string(), "cards 1,4 = suit R");
    }

    #[test]
    fn hint_without_matches_is_rejected() {
        let target = PlayerId::new(0);
        let err = Hint::new(target, Clue::Suit(Suit::Yellow), &hand()).unwrap_err();
        assert_eq!(
            err,
            HintError::NoMatch {
                target,
                clue: Clue::Suit(Suit::Yellow)
            }
        );
    }

    #[test]
    fn clue_requires_exactly_one_dimension() {
        assert_eq!(
            Clue::from_parts(Some(Suit::Red), Some(Number::One)),
            Err(HintError::BothDimensions)
        );
        assert_eq!(Clue::from_parts(None, None), Err(HintError::NoDimension));
        assert_eq!(
            Clue::from_parts(None, Some(Number::Five)),
            Ok(Clue::Number(Number::Five))
        );
    }
}
