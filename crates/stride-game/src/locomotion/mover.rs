//! Kinematic mover: grounding, curve-driven jumps, landing prediction, air tilt

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stride_core::{lerp_angle, look_rotation, wrap_degrees, yaw_pitch_rotation, Transform};
use tracing::{debug, trace};

use super::events::{GroundSignals, LocomotionEvent, LocomotionIntent};
use super::MoverConfig;

/// Everything the mover remembers between frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoverState {
    /// World pose (feet position)
    pub transform: Transform,
    /// Signed vertical speed (m/s)
    pub vertical_velocity: f32,
    /// Planar velocity (x, z), recomputed from intent every frame
    pub horizontal_velocity: Vec2,
    pub is_grounded: bool,
    pub was_grounded: bool,
    /// Seconds since the jump started
    pub jump_timer: f32,
    /// The jump curve is driving vertical velocity
    pub is_jumping: bool,
    /// `StartLanding` already sent for this descent
    pub is_landing_approach_detected: bool,
    /// Air lean in degrees
    pub tilt_angle: f32,
}

impl Default for MoverState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Output of one mover frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoverStep {
    /// Translation to feed the collision-aware mover
    pub displacement: Vec3,
    /// Lifecycle events for the animator, in the order they happened
    pub events: Vec<LocomotionEvent>,
}

impl MoverState {
    /// A character standing still at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            vertical_velocity: 0.0,
            horizontal_velocity: Vec2::ZERO,
            is_grounded: false,
            was_grounded: false,
            jump_timer: 0.0,
            is_jumping: false,
            is_landing_approach_detected: false,
            tilt_angle: 0.0,
        }
    }

    /// Advance one frame.
    ///
    /// The returned state has the raw displacement already applied to its
    /// position; callers with a collision scene overwrite it afterwards.
    ///
    /// Touchdown is handled before the jump check on purpose, so a jump
    /// pressed on the landing frame starts a new jump.
    pub fn step(
        &self,
        config: &MoverConfig,
        intent: &LocomotionIntent,
        ground: GroundSignals,
        dt: f32,
    ) -> (MoverState, MoverStep) {
        let mut next = *self;
        let mut events = Vec::new();

        next.was_grounded = next.is_grounded;
        next.is_grounded = ground.is_grounded;

        // Touchdown resolves before the jump check so a jump pressed on the
        // landing frame is not cancelled by it
        if !next.was_grounded && next.is_grounded {
            next.is_landing_approach_detected = false;
            next.is_jumping = false;
            events.push(LocomotionEvent::JumpAnimationEnd);
        }

        if !next.is_grounded
            && next.vertical_velocity < 0.0
            && !next.is_landing_approach_detected
            && ground.is_approaching_ground
        {
            next.is_landing_approach_detected = true;
            events.push(LocomotionEvent::StartLanding);
        }

        next.steer(config, intent, dt);

        let mut curve_finished = false;
        if next.is_grounded && intent.jump_pressed {
            next.is_jumping = true;
            next.jump_timer = 0.0;
            next.is_landing_approach_detected = false;
            next.vertical_velocity = config.jump_force * config.jump_curve.evaluate(0.0);
            events.push(LocomotionEvent::StartJump);
        } else if next.is_jumping {
            curve_finished = !next.advance_jump(config, dt);
        }

        if !next.is_jumping && !curve_finished {
            if next.is_grounded {
                next.vertical_velocity = config.ground_stick_velocity;
            } else {
                next.vertical_velocity -= config.gravity * dt;
            }
        }

        next.apply_tilt(config, dt);

        let displacement = Vec3::new(
            next.horizontal_velocity.x,
            next.vertical_velocity,
            next.horizontal_velocity.y,
        ) * dt;
        next.transform.translate(displacement);

        (next, MoverStep { displacement, events })
    }

    /// Planar velocity and facing
    fn steer(&mut self, config: &MoverConfig, intent: &LocomotionIntent, dt: f32) {
        let direction = intent.move_direction;
        if direction.length() <= config.move_input_threshold {
            self.horizontal_velocity = Vec2::ZERO;
            return;
        }

        let speed = config.move_speed(intent.run);
        self.horizontal_velocity = Vec2::new(direction.x, direction.z) * speed;

        let Some(facing) = look_rotation(direction) else {
            return;
        };
        let target = if self.is_grounded {
            facing
        } else {
            // Only turn around Y in the air; the lean belongs to the tilt
            let target_yaw = Transform::from_position_rotation(Vec3::ZERO, facing).yaw();
            yaw_pitch_rotation(target_yaw, self.tilt_angle)
        };
        let t = (config.rotation_speed * dt).clamp(0.0, 1.0);
        self.transform.rotation = self.transform.rotation.slerp(target, t);
    }

    /// Sample the jump curve. Returns false once the curve has run out.
    fn advance_jump(&mut self, config: &MoverConfig, dt: f32) -> bool {
        self.jump_timer += dt;

        if config.jump_duration > 0.0 && self.jump_timer <= config.jump_duration {
            let normalized = self.jump_timer / config.jump_duration;
            self.vertical_velocity = config.jump_force * config.jump_curve.evaluate(normalized);
            true
        } else {
            self.is_jumping = false;
            self.jump_timer = self.jump_timer.min(config.jump_duration.max(0.0));
            false
        }
    }

    fn apply_tilt(&mut self, config: &MoverConfig, dt: f32) {
        let forward = config.jump_forward_tilt_angle;
        let backward = config.jump_backward_tilt_angle;

        let leaning = !self.is_grounded
            && self.horizontal_velocity.length() >= config.min_horizontal_speed_for_tilt;
        let target = match (leaning, self.vertical_velocity > 0.0) {
            (false, _) => 0.0,
            (true, true) => forward,
            (true, false) => backward,
        };

        let low = forward.min(backward).min(0.0);
        let high = forward.max(backward).max(0.0);
        let tilt = lerp_angle(self.tilt_angle, target, config.tilt_speed * dt);
        self.tilt_angle = wrap_degrees(tilt).clamp(low, high);

        let yaw = self.transform.yaw();
        self.transform.rotation = yaw_pitch_rotation(yaw, self.tilt_angle);
    }
}

/// The mover component owned by a character
#[derive(Debug, Clone)]
pub struct Mover {
    pub config: MoverConfig,
    state: MoverState,
}

impl Mover {
    pub fn new(config: MoverConfig) -> Self {
        Self {
            config,
            state: MoverState::default(),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> &MoverState {
        &self.state
    }

    pub fn transform(&self) -> &Transform {
        &self.state.transform
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping
    }

    /// Run one frame and return the displacement plus any lifecycle events
    pub fn step(&mut self, intent: &LocomotionIntent, ground: GroundSignals, dt: f32) -> MoverStep {
        let (next, step) = self.state.step(&self.config, intent, ground, dt);

        for event in &step.events {
            match event {
                LocomotionEvent::StartJump => debug!(
                    "Jump started, vertical velocity {:.2}",
                    next.vertical_velocity
                ),
                LocomotionEvent::StartLanding => debug!(
                    "Landing approach detected at y={:.2}",
                    next.transform.position.y
                ),
                LocomotionEvent::JumpAnimationEnd => debug!("Touched down"),
            }
        }
        if self.state.is_jumping && !next.is_jumping && !next.is_grounded {
            trace!("Jump curve finished after {:.3}s, free-falling", next.jump_timer);
        }

        self.state = next;
        step
    }

    /// Replace the position with the collision-corrected one
    pub fn settle(&mut self, position: Vec3) {
        self.state.transform.position = position;
    }

    /// Move to `position` and drop all motion state
    pub fn reset(&mut self, position: Vec3) {
        self.state = MoverState::at(position);
    }
}
