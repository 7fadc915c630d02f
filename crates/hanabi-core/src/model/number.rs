use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Number {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Number {
    pub const COUNT: usize = 5;

    pub const ORDERED: [Number; 5] = [
        Number::One,
        Number::Two,
        Number::Three,
        Number::Four,
        Number::Five,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Number::One),
            2 => Some(Number::Two),
            3 => Some(Number::Three),
            4 => Some(Number::Four),
            5 => Some(Number::Five),
            _ => None,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Self::from_value(index as u8 + 1)
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Copies of each card with this number in a full deck.
    pub const fn copies(self) -> u8 {
        match self {
            Number::One => 3,
            Number::Five => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::Number;

    #[test]
    fn from_value_maps() {
        assert_eq!(Number::from_value(4), Some(Number::Four));
        assert_eq!(Number::from_value(0), None);
        assert_eq!(Number::from_value(6), None);
    }

    #[test]
    fn copy_counts_follow_deck_distribution() {
        let copies: Vec<u8> = Number::ORDERED.iter().map(|n| n.copies()).collect();
        assert_eq!(copies, vec![3, 2, 2, 2, 1]);
        assert_eq!(copies.iter().map(|&c| c as usize).sum::<usize>(), 10);
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(Number::Three.to_string(), "3");
    }
}
