//! Watch face for RideTracker
//!
//! This crate provides:
//! - `layout`: element frames, fonts and colours of the ride screen
//! - `RideScreen`: the face model, implementing `RideDisplay` with
//!   per-element dirty tracking
//! - `DisplayBackend` trait for panels the face can be drawn on
//! - `Framebuffer`: a 1-bit `embedded-graphics` backend for line-addressed
//!   panels
//!
//! # Architecture
//!
//! The ride app only ever calls `RideDisplay` setters, which update the
//! model. The firmware's display task renders the model to a backend when
//! it changes, so drawing never blocks the ride logic.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;
pub mod layout;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use framebuffer::{Framebuffer, LINE_BYTES};
pub use layout::{Element, ElementStyle, Frame, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use screen::RideScreen;
