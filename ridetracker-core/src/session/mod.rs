//! Ride session
//!
//! Elapsed time, distance, and the running flag, plus the text shown
//! for them on the watch face.

pub mod format;
pub mod ride;

pub use format::{format_distance, format_elapsed, DistanceText, ElapsedText};
pub use ride::{Elapsed, RideSession, MINUTES_PER_HOUR};
