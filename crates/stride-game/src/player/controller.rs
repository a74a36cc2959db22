//! Player controller pairing the mover and animator against the physics scene

use glam::Vec3;
use stride_core::Transform;
use stride_physics::{CharacterController, GroundProbeConfig, GroundSensor, PhysicsWorld};
use tracing::{info, warn};

use crate::locomotion::{
    AnimationParameters, AnimatorDriver, ConfigError, GroundSignals, JumpPhase, LocomotionConfig,
    LocomotionEvent, LocomotionIntent, Mover,
};

/// What one fixed update produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocomotionFrame {
    /// Lifecycle events raised by the mover, in order
    pub events: Vec<LocomotionEvent>,
    /// Parameters for the animation graph after the update
    pub parameters: AnimationParameters,
}

/// Player controller handling locomotion, animation parameters, and collision
pub struct PlayerController {
    /// Kinematic mover (owns the transform)
    mover: Mover,
    /// Animation parameter driver
    animator: AnimatorDriver,
    /// Physics character capsule
    pub character: CharacterController,
    /// Downward probes under the capsule
    sensor: GroundSensor,
    /// Last resolved ground signals
    ground: GroundSignals,
    /// Set once the missing-capsule warning has been logged
    warned_unspawned: bool,
}

impl PlayerController {
    /// Create a controller, rejecting unusable tuning up front
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let sensor = GroundSensor::new(GroundProbeConfig {
            ground_check_distance: config.mover.ground_check_distance,
            landing_start_height: config.mover.landing_animation_start_height,
        });

        Ok(Self {
            mover: Mover::new(config.mover),
            animator: AnimatorDriver::new(config.animator),
            character: CharacterController::new(),
            sensor,
            ground: GroundSignals::AIRBORNE,
            warned_unspawned: false,
        })
    }

    /// Spawn the player in the world at a position
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.spawn(physics, position);
        physics.refresh_queries();
        self.mover.reset(position);
        self.animator.reset();
        self.ground = GroundSignals::AIRBORNE;
        info!("Player spawned at ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
    }

    /// Teleport the player to a position, dropping all motion
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.set_position(physics, position);
        physics.refresh_queries();
        self.mover.reset(position);
        self.animator.reset();
        self.ground = GroundSignals::AIRBORNE;
    }

    /// Update the player (fixed timestep)
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        intent: &LocomotionIntent,
        dt: f32,
    ) -> LocomotionFrame {
        if !self.character.is_spawned() {
            if !self.warned_unspawned {
                warn!("Player controller updated before spawn, skipping locomotion");
                self.warned_unspawned = true;
            }
            return LocomotionFrame {
                events: Vec::new(),
                parameters: self.animator.parameters(),
            };
        }

        let (is_grounded, is_approaching_ground) = self.sensor.sample(physics, &self.character);
        self.ground = GroundSignals {
            is_grounded,
            is_approaching_ground,
        };

        let step = self.mover.step(intent, self.ground, dt);
        self.animator.handle_all(&step.events);
        let parameters = self.animator.update(intent, dt);

        self.character.move_character(physics, step.displacement, dt);
        physics.refresh_queries();
        self.mover.settle(self.character.position);

        LocomotionFrame {
            events: step.events,
            parameters,
        }
    }

    /// Feet position
    pub fn position(&self) -> Vec3 {
        self.mover.transform().position
    }

    pub fn transform(&self) -> &Transform {
        self.mover.transform()
    }

    pub fn is_grounded(&self) -> bool {
        self.mover.is_grounded()
    }

    /// Ground signals used by the last update
    pub fn ground(&self) -> GroundSignals {
        self.ground
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn animator(&self) -> &AnimatorDriver {
        &self.animator
    }

    pub fn phase(&self) -> JumpPhase {
        self.animator.phase()
    }

    pub fn parameters(&self) -> AnimationParameters {
        self.animator.parameters()
    }
}
