use hanabi_core::belief::CardKnowledge;
use hanabi_core::model::board::Board;
use hanabi_core::model::intent::Intent;

/// Labels a card from what its holder knows. `Play` and `Discard` require the
/// verdict to hold for every identity still possible; otherwise the previous
/// label stands.
pub fn classify(knowledge: &CardKnowledge, board: &Board) -> Intent {
    let mut next = true;
    let mut played = true;
    let mut stuck = true;
    for card in knowledge.possibilities().iter() {
        let target = board.next_playable(card.suit);
        let number = card.number.value();
        next &= number == target;
        played &= number < target;
        stuck &= board.is_stuck(card);
        if !(next || played || stuck) {
            break;
        }
    }
    if next {
        Intent::Play
    } else if played || stuck {
        Intent::Discard
    } else {
        knowledge.label()
    }
}
