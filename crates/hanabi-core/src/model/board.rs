use crate::model::card::Card;
use crate::model::number::Number;
use crate::model::suit::Suit;

/// Highest score reachable: every suit built up to five.
pub const MAX_SCORE: u8 = (Suit::COUNT * Number::COUNT) as u8;

/// Public, read-only summary of the table: fireworks built so far, the discard
/// pile and how many cards remain to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    heights: [u8; Suit::COUNT],
    played: [u8; Card::KINDS],
    discarded: [u8; Card::KINDS],
    depth: u8,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_played(&mut self, card: Card) {
        self.played[card.to_id() as usize] += 1;
        let height = &mut self.heights[card.suit.index()];
        *height = (*height).max(card.number.value());
    }

    pub fn record_discarded(&mut self, card: Card) {
        self.discarded[card.to_id() as usize] += 1;
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth.min(u8::MAX as usize) as u8;
    }

    pub fn with_played(mut self, cards: &[Card]) -> Self {
        for &card in cards {
            self.record_played(card);
        }
        self
    }

    pub fn with_discarded(mut self, cards: &[Card]) -> Self {
        for &card in cards {
            self.record_discarded(card);
        }
        self
    }

    pub fn score(&self) -> u8 {
        self.heights.iter().sum()
    }

    pub fn is_complete(&self) -> bool {
        self.score() >= MAX_SCORE
    }

    /// Cards remaining in the draw pile.
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Highest number on the board for `suit`, zero when nothing is played.
    pub fn height(&self, suit: Suit) -> u8 {
        self.heights[suit.index()]
    }

    /// Smallest number not yet played in `suit`. Six once the suit is complete.
    pub fn next_playable(&self, suit: Suit) -> u8 {
        self.height(suit) + 1
    }

    pub fn allow_play(&self, card: Card) -> bool {
        self.next_playable(card.suit) == card.number.value()
    }

    /// First number at or above the next playable one whose copies are all
    /// down, so the suit can never progress past it.
    pub fn stuck_at(&self, suit: Suit) -> Option<Number> {
        Number::ORDERED
            .into_iter()
            .filter(|number| number.value() >= self.next_playable(suit))
            .find(|&number| {
                let card = Card::new(suit, number);
                self.down_count(card) == card.copies()
            })
    }

    /// Whether `card`'s position in its suit is unreachable.
    pub fn is_stuck(&self, card: Card) -> bool {
        self.stuck_at(card.suit)
            .is_some_and(|stuck| stuck <= card.number)
    }

    pub fn board_count(&self, card: Card) -> u8 {
        self.played[card.to_id() as usize]
    }

    pub fn discard_count(&self, card: Card) -> u8 {
        self.discarded[card.to_id() as usize]
    }

    /// Copies that have permanently left the players' hands.
    pub fn down_count(&self, card: Card) -> u8 {
        self.board_count(card) + self.discard_count(card)
    }

    pub fn discard_total(&self) -> usize {
        self.discarded.iter().map(|&count| count as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(suit: Suit, number: u8) -> Card {
        Card::new(suit, Number::from_value(number).expect("valid number"))
    }

    #[test]
    fn empty_board_expects_ones() {
        let board = Board::new();
        for suit in Suit::ALL {
            assert_eq!(board.next_playable(suit), 1);
            assert_eq!(board.stuck_at(suit), None);
        }
        assert!(board.allow_play(card(Suit::Red, 1)));
        assert!(!board.allow_play(card(Suit::Red, 2)));
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn played_cards_advance_height() {
        let board =
            Board::new().with_played(&[card(Suit::Blue, 1), card(Suit::Blue, 2), card(Suit::Red, 1)]);
        assert_eq!(board.height(Suit::Blue), 2);
        assert_eq!(board.next_playable(Suit::Blue), 3);
        assert_eq!(board.next_playable(Suit::Red), 2);
        assert_eq!(board.score(), 3);
    }

    #[test]
    fn stuck_when_all_copies_of_needed_number_are_down() {
        let board = Board::new()
            .with_played(&[card(Suit::Green, 1)])
            .with_discarded(&[card(Suit::Green, 3), card(Suit::Green, 3)]);
        assert_eq!(board.stuck_at(Suit::Green), Some(Number::Three));
        assert!(board.is_stuck(card(Suit::Green, 3)));
        assert!(board.is_stuck(card(Suit::Green, 5)));
        assert!(!board.is_stuck(card(Suit::Green, 2)));
    }

    #[test]
    fn partial_discards_do_not_stick() {
        let board = Board::new().with_discarded(&[card(Suit::White, 1), card(Suit::White, 1)]);
        assert_eq!(board.stuck_at(Suit::White), None);
        let board = board.with_discarded(&[card(Suit::White, 1)]);
        assert_eq!(board.stuck_at(Suit::White), Some(Number::One));
    }

    #[test]
    fn discarded_five_sticks_suit_at_five() {
        let board = Board::new().with_discarded(&[card(Suit::Yellow, 5)]);
        assert_eq!(board.stuck_at(Suit::Yellow), Some(Number::Five));
        assert!(!board.is_stuck(card(Suit::Yellow, 4)));
    }

    #[test]
    fn down_count_includes_played_and_discarded() {
        let board = Board::new()
            .with_played(&[card(Suit::Red, 1)])
            .with_discarded(&[card(Suit::Red, 1)]);
        assert_eq!(board.down_count(card(Suit::Red, 1)), 2);
        assert_eq!(board.board_count(card(Suit::Red, 1)), 1);
        assert_eq!(board.discard_total(), 1);
    }

    #[test]
    fn all_five_fives_complete_the_fireworks() {
        let mut board = Board::new();
        for suit in Suit::ALL {
            for number in 1..=4 {
                board.record_played(card(suit, number));
            }
        }
        assert_eq!(board.score(), MAX_SCORE - 5);
        assert!(!board.is_complete());
        board = board.with_played(&Suit::ALL.map(|suit| card(suit, 5)));
        assert_eq!(board.score(), MAX_SCORE);
        assert!(board.is_complete());
    }
}
