//! Per-frame inputs and the mover → animator event protocol

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What the player wants this frame, already resolved from raw input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocomotionIntent {
    /// Any travel along the facing axis (the blend space only sees forward)
    pub forward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    /// Edge-triggered: true only on the frame the jump was pressed
    pub jump_pressed: bool,
    /// Strafe axis in `[-1, 1]`
    pub horizontal_axis: f32,
    /// Forward axis in `[-1, 1]`
    pub vertical_axis: f32,
    /// World-space travel direction, flattened onto the ground plane
    pub move_direction: Vec3,
}

impl LocomotionIntent {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Ground queries resolved by the physics layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundSignals {
    /// Standing on something this frame
    pub is_grounded: bool,
    /// Terrain within the landing-start height below the feet
    pub is_approaching_ground: bool,
}

impl GroundSignals {
    pub const GROUNDED: Self = Self {
        is_grounded: true,
        is_approaching_ground: true,
    };

    pub const AIRBORNE: Self = Self {
        is_grounded: false,
        is_approaching_ground: false,
    };

    pub const APPROACHING: Self = Self {
        is_grounded: false,
        is_approaching_ground: true,
    };
}

/// Jump lifecycle notifications sent from the mover to the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionEvent {
    /// The mover left the ground on a jump
    StartJump,
    /// Touchdown is imminent; begin the landing blend
    StartLanding,
    /// The mover touched down; return to the idle baseline
    JumpAnimationEnd,
}

impl LocomotionEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::StartJump => "StartJump",
            Self::StartLanding => "StartLanding",
            Self::JumpAnimationEnd => "JumpAnimationEnd",
        }
    }
}
