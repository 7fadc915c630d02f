use core::fmt;
use serde::{Deserialize, Serialize};

/// A player's working label for one of their own cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Play,
    Discard,
    Keep,
    #[default]
    Queue,
}

impl Intent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Intent::Play => "play",
            Intent::Discard => "discard",
            Intent::Keep => "keep",
            Intent::Queue => "queue",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
