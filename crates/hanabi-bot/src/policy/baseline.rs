use super::{Policy, PolicyContext, PolicyError};
use crate::bot::{Decision, DecisionReason};
use hanabi_core::game::action::Action;

/// Always plays the oldest card.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPlay;

/// Always discards the oldest card.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDiscard;

impl Policy for AlwaysPlay {
    fn name(&self) -> &'static str {
        "always_play"
    }

    fn choose_action(&mut self, ctx: &mut PolicyContext<'_>) -> Result<Decision, PolicyError> {
        if ctx.view.own.is_empty() {
            return Err(PolicyError::EmptyHand(ctx.view.player));
        }
        Ok(Decision::new(
            Action::Play { position: 0 },
            DecisionReason::AlwaysPlay,
        ))
    }
}

impl Policy for AlwaysDiscard {
    fn name(&self) -> &'static str {
        "always_discard"
    }

    fn choose_action(&mut self, ctx: &mut PolicyContext<'_>) -> Result<Decision, PolicyError> {
        if ctx.view.own.is_empty() {
            return Err(PolicyError::EmptyHand(ctx.view.player));
        }
        Ok(Decision::new(
            Action::Discard { position: 0 },
            DecisionReason::AlwaysDiscard,
        ))
    }
}
