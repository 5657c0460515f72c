pub mod decrypt;
pub mod tokenize;

pub use decrypt::decrypt;
pub use tokenize::{Token, tokenize};
