use super::possibility::PossibilitySet;
use crate::model::card::Card;
use crate::model::hint::Clue;
use crate::model::intent::Intent;
use crate::model::number::Number;
use crate::model::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    /// Narrowing would leave no consistent identity. Hints are truthful, so
    /// this only happens when earlier bookkeeping went wrong.
    #[error("narrowing by {reason} would leave no possible identity")]
    Contradiction { reason: &'static str },
}

/// What the holder of a card can deduce about it, plus their label for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardKnowledge {
    possible: PossibilitySet,
    label: Intent,
}

impl CardKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_possibilities(possible: PossibilitySet) -> Self {
        Self {
            possible,
            label: Intent::Queue,
        }
    }

    pub fn possibilities(&self) -> PossibilitySet {
        self.possible
    }

    pub fn label(&self) -> Intent {
        self.label
    }

    pub fn set_label(&mut self, label: Intent) {
        self.label = label;
    }

    pub fn is_known(&self) -> bool {
        self.possible.len() == 1
    }

    pub fn known_card(&self) -> Option<Card> {
        self.possible.single()
    }

    pub fn known_suit(&self) -> Option<Suit> {
        self.possible.known_suit()
    }

    pub fn known_number(&self) -> Option<Number> {
        self.possible.known_number()
    }

    /// Narrows by a hint. A matched card keeps only identities sharing the
    /// hinted value; an unmatched card drops every identity that has it.
    pub fn apply_clue(&mut self, clue: Clue, matched: bool) -> Result<(), KnowledgeError> {
        let narrowed = self.possible.filter(|card| clue.matches(card) == matched);
        self.replace(narrowed, "hint")
    }

    /// Rules out one identity. Returns whether anything changed.
    pub fn eliminate(&mut self, card: Card) -> Result<bool, KnowledgeError> {
        if !self.possible.contains(card) {
            return Ok(false);
        }
        self.replace(self.possible.without(card), "elimination")?;
        Ok(true)
    }

    fn replace(
        &mut self,
        narrowed: PossibilitySet,
        reason: &'static str,
    ) -> Result<(), KnowledgeError> {
        if narrowed.is_empty() {
            return Err(KnowledgeError::Contradiction { reason });
        }
        self.possible = narrowed;
        Ok(())
    }
}
