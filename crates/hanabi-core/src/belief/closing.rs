use super::knowledge::KnowledgeError;
use crate::model::board::Board;
use crate::model::card::Card;
use crate::model::hand::{OwnHand, VisibleHand};

/// Removes every identity whose copies are all visible to the deciding player
/// (down on the table, in another hand, or already resolved in their own hand)
/// from their own unresolved cards. Repeats until nothing changes, since a card
/// resolved by elimination adds to the visible counts. Returns the number of
/// identities removed.
pub fn close_exhausted(
    own: &mut OwnHand<'_>,
    others: &[VisibleHand<'_>],
    board: &Board,
) -> Result<usize, KnowledgeError> {
    let mut removed = 0;
    loop {
        let mut changed = false;
        for card in Card::all() {
            let visible = board.down_count(card)
                + others.iter().map(|hand| hand.count(card)).sum::<u8>()
                + own.known_count(card);
            if visible < card.copies() {
                continue;
            }
            for knowledge in own.iter_mut() {
                if knowledge.known_card() == Some(card) {
                    continue;
                }
                if knowledge.eliminate(card)? {
                    removed += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::Rules;
    use crate::game::state::GameState;
    use crate::model::deck::Deck;
    use crate::model::number::Number;
    use crate::model::player::PlayerId;
    use crate::model::suit::Suit;

    fn card(suit: Suit, number: Number) -> Card {
        Card::new(suit, number)
    }

    #[test]
    fn exhausted_identity_is_removed_from_own_cards() {
        // Dealt round-robin: player 1 holds the only blue five.
        let b5 = card(Suit::Blue, Number::Five);
        let top = [
            card(Suit::Red, Number::Two),
            b5,
            card(Suit::Red, Number::Three),
            card(Suit::Green, Number::One),
        ];
        let rules = Rules::new(2).unwrap();
        let deck = Deck::stacked(&top).unwrap();
        let mut state = GameState::from_deck(rules, deck).unwrap();
        let mut view = state.seat_view(PlayerId::new(0)).unwrap();
        let removed = close_exhausted(&mut view.own, &view.others, &view.board).unwrap();

        assert_eq!(removed, 5);
        assert!(view.own.iter().all(|k| !k.possibilities().contains(b5)));
    }

    #[test]
    fn partially_seen_identity_is_kept() {
        let g1 = card(Suit::Green, Number::One);
        let top = [card(Suit::Red, Number::Two), g1, card(Suit::Red, Number::Three), g1];
        let rules = Rules::new(2).unwrap();
        let deck = Deck::stacked(&top).unwrap();
        let mut state = GameState::from_deck(rules, deck).unwrap();
        let mut view = state.seat_view(PlayerId::new(0)).unwrap();
        close_exhausted(&mut view.own, &view.others, &view.board).unwrap();

        assert!(view.own.iter().all(|k| k.possibilities().contains(g1)));
    }
}
