//! Adversarial search engine for playing chess against a human opponent.
//!
//! The crate is split the same way the engine is used:
//! - [`logic`] adapts the rules engine to the contract the search consumes.
//! - [`engine`] holds the evaluators, the move shuffler, the search cores and
//!   the public entry points wrapping them.
//! - [`worker`] answers one search request from a position snapshot so the
//!   caller can run it off its own critical path.

pub mod engine;
pub mod error;
pub mod logic;
pub mod worker;

pub use error::SearchError;
