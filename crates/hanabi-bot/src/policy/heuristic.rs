use super::{Policy, PolicyContext, PolicyError};
use crate::bot::{Decision, TurnPlanner};
use tracing::{Level, event};

/// Hint-first strategy: fix the next player's play labels, protect their
/// last copies, then play, discard, or guess in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn choose_action(&mut self, ctx: &mut PolicyContext<'_>) -> Result<Decision, PolicyError> {
        let decision = TurnPlanner::decide(&mut ctx.view, ctx.features)?;
        log_decision(ctx, &decision);
        Ok(decision)
    }
}

fn log_decision(ctx: &PolicyContext<'_>, decision: &Decision) {
    if !ctx.features.decision_details() || !tracing::enabled!(Level::INFO) {
        return;
    }

    let labels = ctx
        .view
        .own
        .iter()
        .map(|knowledge| knowledge.label().as_str())
        .collect::<Vec<_>>()
        .join(",");
    let action = decision.action.to_string();

    event!(
        target: "hanabi_bot::decision",
        Level::INFO,
        player = %ctx.view.player,
        turn = ctx.turn,
        hints = ctx.view.hints,
        score = ctx.view.board.score(),
        labels = %labels,
        action = %action,
        action_kind = decision.action.kind().as_str(),
        reason = decision.reason.as_str(),
    );
}
