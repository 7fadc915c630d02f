pub mod board;
pub mod card;
pub mod deck;
pub mod hand;
pub mod hint;
pub mod intent;
pub mod number;
pub mod player;
pub mod suit;
