//! Stride Core - Core types and utilities for the Stride locomotion stack
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for character poses
//! - Fixed-timestep game clock
//! - Sampled keyframe curves and angle helpers

pub mod curve;
pub mod math;
pub mod time;
pub mod types;

pub use curve::{CurveError, CurveInterpolation, Keyframe, SampledCurve};
pub use glam::{Quat, Vec2, Vec3};
pub use math::{lerp_angle, wrap_degrees};
pub use time::{GameTime, TimeConfig};
pub use types::{look_rotation, yaw_pitch_rotation, Transform};
