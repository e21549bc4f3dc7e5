//! Run state machine for a ride session
//!
//! The session is either stopped or running. The state is explicit,
//! finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::RunState;
