//! Board-agnostic ride logic for the RideTracker watch app
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Ride session (elapsed time, distance, running flag)
//! - Run state machine and session events
//! - Button mapping
//! - Collaborator traits for the screen and the paired-device link
//! - Single-slot outbox and inbound decoder for app messages
//! - The ride app that routes host events to the session
//! - Configuration types and the `ride.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod input;
pub mod link;
pub mod session;
pub mod state;
pub mod traits;

pub use app::{HostEvent, RideApp, RideHandler};
pub use session::RideSession;
