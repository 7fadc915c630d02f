use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Red = 1,
    Yellow = 2,
    Green = 3,
    Blue = 4,
    White = 5,
}

impl Suit {
    pub const COUNT: usize = 5;

    pub const ALL: [Suit; 5] = [Suit::Red, Suit::Yellow, Suit::Green, Suit::Blue, Suit::White];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Suit::Red),
            2 => Some(Suit::Yellow),
            3 => Some(Suit::Green),
            4 => Some(Suit::Blue),
            5 => Some(Suit::White),
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

    /// One-based value used in hints and log output.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Red => "R",
            Suit::Yellow => "Y",
            Suit::Green => "G",
            Suit::Blue => "B",
            Suit::White => "W",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Red.to_string(), "R");
        assert_eq!(Suit::White.to_string(), "W");
    }

    #[test]
    fn from_value_maps_valid_values() {
        assert_eq!(Suit::from_value(3), Some(Suit::Green));
        assert_eq!(Suit::from_value(0), None);
        assert_eq!(Suit::from_value(6), None);
    }

    #[test]
    fn index_roundtrip() {
        for (i, suit) in Suit::ALL.iter().enumerate() {
            assert_eq!(Suit::from_index(i), Some(*suit));
            assert_eq!(suit.index(), i);
        }
        assert_eq!(Suit::from_index(5), None);
    }
}
