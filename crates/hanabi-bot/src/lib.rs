pub mod bot;
pub mod policy;

pub use bot::{BotFeatures, BotKind, Decision, DecisionReason, TurnPlanner, classify, last_chance};
pub use policy::{
    AlwaysDiscard, AlwaysPlay, HeuristicPolicy, Policy, PolicyContext, PolicyError,
};
