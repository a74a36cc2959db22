//! Core types used throughout Stride

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World pose of a character: position plus orientation.
///
/// Characters face local +Z, so a yaw of zero looks down the world +Z axis
/// and positive pitch leans the facing direction toward the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Direction the character is facing (local +Z)
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Heading around the world Y axis, in radians
    pub fn yaw(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        yaw
    }

    /// Lean around the local X axis, in degrees
    pub fn pitch_degrees(&self) -> f32 {
        let (_, pitch, _) = self.rotation.to_euler(EulerRot::YXZ);
        pitch.to_degrees()
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

/// Rotation that faces `direction` on the horizontal plane.
///
/// Returns `None` for directions with no horizontal component.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Compose a rotation from a heading (radians) and a lean (degrees).
pub fn yaw_pitch_rotation(yaw: f32, pitch_degrees: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch_degrees.to_radians(), 0.0)
}
