//! Per-card knowledge derived from public information.
//!
//! - `possibility`: bitset over the 25 (suit, number) identities.
//! - `knowledge`: possibility set plus the owner's intent label, narrowed by hints.
//! - `closing`: global elimination of identities whose copies are all accounted for.

mod closing;
mod knowledge;
mod possibility;

pub use closing::close_exhausted;
pub use knowledge::{CardKnowledge, KnowledgeError};
pub use possibility::PossibilitySet;
