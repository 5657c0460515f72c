pub mod suggest;

pub use suggest::{ScoringContext, Suggestion, suggest};
