//! Port trait definitions.
//!
//! These traits define the external collaborators of the chat service. The
//! infrastructure layer implements them against AWS; tests implement them
//! with in-memory fakes.

pub mod history;
pub mod intent;
