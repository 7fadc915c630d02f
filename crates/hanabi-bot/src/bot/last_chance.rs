use hanabi_core::model::board::Board;
use hanabi_core::model::card::Card;
use hanabi_core::model::hand::{OwnHand, VisibleHand};

/// Whether `card` in `holder`'s hand is the last copy that can still reach
/// the board, as far as `observer` can tell.
///
/// Copies are accounted for from the down pile, the holder's hand and the
/// observer's own resolved cards only. A copy sitting unresolved in the
/// observer's hand or in a third hand stays unaccounted for.
pub fn last_chance(card: Card, holder: VisibleHand<'_>, observer: &OwnHand<'_>, board: &Board) -> bool {
    let held = holder.count(card);
    if held > 1 {
        return false;
    }
    if board.board_count(card) > 0 {
        return false;
    }
    board.down_count(card) + held + observer.known_count(card) == card.copies()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanabi_core::game::rules::Rules;
    use hanabi_core::game::state::GameState;
    use hanabi_core::model::deck::Deck;
    use hanabi_core::model::number::Number;
    use hanabi_core::model::player::PlayerId;
    use hanabi_core::model::suit::Suit;

    fn game(top: &[Card]) -> GameState {
        let rules = Rules::new(2).unwrap();
        GameState::from_deck(rules, Deck::stacked(top).unwrap()).unwrap()
    }

    const FILLER: Card = Card::new(Suit::Red, Number::Four);

    #[test]
    fn single_copy_card_is_a_last_chance() {
        let g5 = Card::new(Suit::Green, Number::Five);
        let mut state = game(&[FILLER, g5]);
        let view = state.seat_view(PlayerId::new(0)).unwrap();
        let holder = view.next_player().unwrap();
        assert!(last_chance(g5, holder, &view.own, &view.board));
    }

    #[test]
    fn two_copies_in_holder_hand_are_never_last_chance() {
        let b3 = Card::new(Suit::Blue, Number::Three);
        let mut state = game(&[FILLER, b3, FILLER, b3]);
        let view = state.seat_view(PlayerId::new(0)).unwrap();
        let holder = view.next_player().unwrap();
        assert_eq!(holder.count(b3), 2);
        assert!(!last_chance(b3, holder, &view.own, &view.board));
    }

    #[test]
    fn copy_on_board_is_never_last_chance() {
        let y1 = Card::new(Suit::Yellow, Number::One);
        let mut state = game(&[y1, y1, FILLER, FILLER]);
        state.play(PlayerId::new(0), 0).unwrap();
        let view = state.seat_view(PlayerId::new(0)).unwrap();
        let holder = view.next_player().unwrap();
        assert!(!last_chance(y1, holder, &view.own, &view.board));
    }

    #[test]
    fn discarded_copy_makes_remaining_one_critical() {
        let w2 = Card::new(Suit::White, Number::Two);
        let mut state = game(&[w2, w2]);
        state.discard(PlayerId::new(0), 0).unwrap();
        let view = state.seat_view(PlayerId::new(0)).unwrap();
        let holder = view.next_player().unwrap();
        assert!(last_chance(w2, holder, &view.own, &view.board));
    }

    #[test]
    fn unresolved_own_copy_stays_unaccounted() {
        let w2 = Card::new(Suit::White, Number::Two);
        // Player 0 secretly holds the other white two.
        let mut state = game(&[w2, w2]);
        let view = state.seat_view(PlayerId::new(0)).unwrap();
        let holder = view.next_player().unwrap();
        assert!(!last_chance(w2, holder, &view.own, &view.board));
    }
}
