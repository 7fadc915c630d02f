use crate::belief::{CardKnowledge, KnowledgeError};
use crate::model::card::Card;
use crate::model::deck::CardSlot;
use crate::model::hint::Hint;
use crate::model::player::PlayerId;
use std::vec::Vec;

/// A card in a player's hand: the physical card plus its holder's knowledge.
#[derive(Debug, Clone)]
pub struct HeldCard {
    slot: CardSlot,
    card: Card,
    knowledge: CardKnowledge,
}

impl HeldCard {
    pub fn new(slot: CardSlot, card: Card) -> Self {
        Self {
            slot,
            card,
            knowledge: CardKnowledge::new(),
        }
    }

    pub fn slot(&self) -> CardSlot {
        self.slot
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn knowledge(&self) -> &CardKnowledge {
        &self.knowledge
    }
}

/// Ordered hand. New cards are appended, so position 0 is the oldest card.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<HeldCard>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, held: HeldCard) {
        self.cards.push(held);
    }

    pub fn remove(&mut self, position: usize) -> Option<HeldCard> {
        (position < self.cards.len()).then(|| self.cards.remove(position))
    }

    pub fn get(&self, position: usize) -> Option<&HeldCard> {
        self.cards.get(position)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeldCard> {
        self.cards.iter()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().map(HeldCard::card).collect()
    }

    /// Narrows every card by a hint addressed to this hand. Either all cards
    /// are narrowed or none are.
    pub fn receive_hint(&mut self, hint: &Hint) -> Result<(), KnowledgeError> {
        let mut narrowed: Vec<CardKnowledge> =
            self.cards.iter().map(|held| held.knowledge).collect();
        for (position, knowledge) in narrowed.iter_mut().enumerate() {
            knowledge.apply_clue(hint.clue(), hint.matches_position(position))?;
        }
        for (held, knowledge) in self.cards.iter_mut().zip(narrowed) {
            held.knowledge = knowledge;
        }
        Ok(())
    }

    pub(crate) fn own_view(&mut self) -> OwnHand<'_> {
        OwnHand {
            cards: &mut self.cards,
        }
    }

    pub(crate) fn visible_view(&self, player: PlayerId) -> VisibleHand<'_> {
        VisibleHand {
            player,
            cards: &self.cards,
        }
    }
}

/// The deciding player's own hand. Exposes knowledge and labels only; the
/// true identity of each card is unreachable through this view.
#[derive(Debug)]
pub struct OwnHand<'a> {
    cards: &'a mut [HeldCard],
}

impl<'a> OwnHand<'a> {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn knowledge(&self, position: usize) -> Option<&CardKnowledge> {
        self.cards.get(position).map(|held| &held.knowledge)
    }

    pub fn knowledge_mut(&mut self, position: usize) -> Option<&mut CardKnowledge> {
        self.cards.get_mut(position).map(|held| &mut held.knowledge)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardKnowledge> {
        self.cards.iter().map(|held| &held.knowledge)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardKnowledge> {
        self.cards.iter_mut().map(|held| &mut held.knowledge)
    }

    /// Number of own cards known with certainty to be `card`.
    pub fn known_count(&self, card: Card) -> u8 {
        self.iter()
            .filter(|knowledge| knowledge.known_card() == Some(card))
            .count() as u8
    }
}

/// Another player's hand as seen from across the table: true cards and the
/// holder's knowledge about them.
#[derive(Debug, Clone, Copy)]
pub struct VisibleHand<'a> {
    player: PlayerId,
    cards: &'a [HeldCard],
}

impl<'a> VisibleHand<'a> {
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, position: usize) -> Option<Card> {
        self.cards.get(position).map(HeldCard::card)
    }

    pub fn knowledge(&self, position: usize) -> Option<&'a CardKnowledge> {
        self.cards.get(position).map(|held| &held.knowledge)
    }

    pub fn iter(self) -> impl Iterator<Item = (Card, &'a CardKnowledge)> + 'a {
        self.cards.iter().map(|held| (held.card, &held.knowledge))
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().map(HeldCard::card).collect()
    }

    pub fn count(&self, card: Card) -> u8 {
        self.cards.iter().filter(|held| held.card == card).count() as u8
    }
}
