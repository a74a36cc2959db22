//! Downward probes that resolve grounding and landing approach

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{CharacterController, PhysicsWorld};

/// How far the probe origin sits above the feet, so a character resting
/// exactly on the surface still registers a hit
const PROBE_LIFT: f32 = 0.1;

/// Probe lengths
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeConfig {
    /// Reach of the grounding probe below the feet
    pub ground_check_distance: f32,
    /// Height above terrain at which the landing animation should begin
    pub landing_start_height: f32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            ground_check_distance: 0.01,
            landing_start_height: 1.0,
        }
    }
}

/// Raycasts the scene under a character
#[derive(Debug, Clone, Default)]
pub struct GroundSensor {
    pub config: GroundProbeConfig,
}

impl GroundSensor {
    pub fn new(config: GroundProbeConfig) -> Self {
        Self { config }
    }

    /// Short probe from just above the feet
    pub fn probe_ground(&self, physics: &PhysicsWorld, feet: Vec3, ignore: Option<ColliderHandle>) -> bool {
        let origin = feet + Vec3::Y * PROBE_LIFT;
        let reach = self.config.ground_check_distance.max(0.0) + PROBE_LIFT;
        physics
            .raycast(origin, Vec3::NEG_Y, reach, Self::filter(ignore))
            .is_some()
    }

    /// Longer probe from the feet used to predict touchdown
    pub fn probe_landing(&self, physics: &PhysicsWorld, feet: Vec3, ignore: Option<ColliderHandle>) -> bool {
        let reach = self.config.landing_start_height.max(0.0);
        if reach <= 0.0 {
            return false;
        }
        physics
            .raycast(feet, Vec3::NEG_Y, reach, Self::filter(ignore))
            .is_some()
    }

    /// Sample both probes for a character.
    ///
    /// Returns `(is_grounded, is_approaching_ground)`; grounding also accepts
    /// the capsule's contact flag from its last move.
    pub fn sample(&self, physics: &PhysicsWorld, character: &CharacterController) -> (bool, bool) {
        let ignore = character.collider_handle;
        let grounded = self.probe_ground(physics, character.position, ignore) || character.is_grounded();
        let approaching = self.probe_landing(physics, character.position, ignore);
        (grounded, approaching)
    }

    fn filter(ignore: Option<ColliderHandle>) -> QueryFilter<'static> {
        match ignore {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        }
    }
}
