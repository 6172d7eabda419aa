//! State transitions for the record store.

mod mutations;

pub use mutations::{apply_mutation, Mutation};
