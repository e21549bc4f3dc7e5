//! Collaborator traits
//!
//! The ride logic talks to the screen and to the paired device only
//! through these traits. Implementations live in the display and
//! firmware crates, and as recording fakes in tests.

pub mod display;
pub mod link;

pub use display::{ButtonLabel, RideDisplay};
pub use link::PairedLink;
