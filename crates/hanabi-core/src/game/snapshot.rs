use super::state::GameState;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// End-of-game summary persisted by the bench harness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: Option<u64>,
    pub players: usize,
    pub hint_cap: u8,
    pub score: u8,
    pub hints: u8,
    pub fails: u8,
    pub final_turns: u8,
    pub turns: u32,
    /// Highest number played per suit, in suit order.
    pub heights: [u8; 5],
    pub discarded: usize,
    pub deck_depth: usize,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let board = state.board();
        GameSnapshot {
            seed: state.seed(),
            players: state.rules().players(),
            hint_cap: state.rules().hint_tokens(),
            score: board.score(),
            hints: state.hints(),
            fails: state.fails(),
            final_turns: state.final_turns(),
            turns: state.turns(),
            heights: Suit::ALL.map(|suit| board.height(suit)),
            discarded: board.discard_total(),
            deck_depth: board.depth(),
        }
    }

    pub fn lost_to_fails(&self) -> bool {
        self.fails == 0
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::GameSnapshot;
    use crate::game::rules::Rules;
    use crate::game::state::GameState;
    use crate::model::player::PlayerId;

    #[test]
    fn snapshot_serializes_to_json() {
        let state = GameState::with_seed(Rules::new(2).unwrap(), 99).unwrap();
        let json = GameSnapshot::to_json(&state).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"score\": 0"));
        assert!(json.contains("\"deck_depth\": 40"));
    }

    #[test]
    fn snapshot_roundtrip_preserves_counters() {
        let mut state = GameState::with_seed(Rules::new(3).unwrap(), 123).unwrap();
        state.discard(PlayerId::new(0), 0).unwrap();
        let snapshot = GameSnapshot::capture(&state);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.discarded, 1);
        assert!(!restored.lost_to_fails());
    }
}
