pub mod english;
pub mod frequency;

pub use frequency::FrequencyTable;
