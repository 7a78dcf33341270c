//! Candidate resolution
//!
//! Turns a segmentation filter into the set of client ids every dataset of
//! one export call is scoped to.

pub mod predicates;
pub mod resolver;

pub use predicates::ClientPredicate;
pub use resolver::CandidateResolver;
