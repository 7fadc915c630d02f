use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index at the table, in turn order starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat in a table of `players` seats.
    pub const fn next(self, players: usize) -> PlayerId {
        PlayerId(((self.0 as usize + 1) % players) as u8)
    }

    /// Seats in turn order starting after `self`, excluding `self`.
    pub fn others(self, players: usize) -> impl Iterator<Item = PlayerId> {
        (1..players).map(move |offset| PlayerId(((self.0 as usize + offset) % players) as u8))
    }

    pub fn all(players: usize) -> impl Iterator<Item = PlayerId> {
        (0..players).map(|index| PlayerId(index as u8))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    }

    #[test]
    fn others_starts_with_next_seat() {
        let others: Vec<_> = PlayerId::new(1).others(4).collect();
        assert_eq!(
            others,
            vec![PlayerId::new(2), PlayerId::new(3), PlayerId::new(0)]
        );
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(PlayerId::new(0).to_string(), "P1");
    }
}
