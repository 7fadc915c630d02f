pub mod action;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod view;
