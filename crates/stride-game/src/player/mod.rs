//! Player controller module
//!
//! Drives the locomotion core against a rapier collision scene.

mod controller;

pub use controller::{LocomotionFrame, PlayerController};
