//! Collision-aware character mover using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::debug;

/// Character controller configuration
#[derive(Debug, Clone)]
pub struct CharacterControllerConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.3m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.3,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
        }
    }
}

/// Capsule that moves through the static scene and reports contact.
///
/// `position` is the bottom of the capsule (the character's feet).
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current feet position
    pub position: Vec3,
    /// Whether the last move ended in ground contact
    pub grounded: bool,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the character's capsule in the physics world
    pub fn spawn(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) -> ColliderHandle {
        if let Some(old) = self.collider_handle.take() {
            physics.remove_collider(old);
        }
        self.position = position;
        self.grounded = false;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        debug!("Spawned character capsule at {:?}", position);
        handle
    }

    /// Whether the capsule exists in the physics world
    pub fn is_spawned(&self) -> bool {
        self.collider_handle.is_some()
    }

    /// Move the character with collision detection, returning the applied translation
    pub fn move_character(
        &mut self,
        physics: &mut crate::PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> Vec3 {
        let Some(collider_handle) = self.collider_handle else {
            return Vec3::ZERO;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return Vec3::ZERO;
        };

        let shape = collider.shape();
        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            shape,
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        self.grounded = movement.grounded;

        let applied = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += applied;
        self.sync_collider(physics);
        applied
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) {
        self.position = position;
        self.sync_collider(physics);
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        )
    }

    /// Check if the last move ended on the ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn sync_collider(&self, physics: &mut crate::PhysicsWorld) {
        let center = self.center_position();
        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(vector![center.x, center.y, center.z]);
            }
        }
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}
