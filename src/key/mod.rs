pub mod import;
pub mod store;

pub use store::{ApplyOutcome, Conflict, KeyStore, MappingChange, Proposal, SubstitutionKey};
