//! Locomotion tuning
//!
//! Every value has a default so partial TOML files work.

use serde::{Deserialize, Serialize};
use stride_core::{Keyframe, SampledCurve};

/// Configuration problems found when a controller is built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("crouch_position must lie in [0, 1] (got {0})")]
    CrouchOutOfRange(f32),
}

/// Tuning for the kinematic mover
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    /// Ground speed while walking (m/s)
    pub walk_speed: f32,
    /// Ground speed while running (m/s)
    pub run_speed: f32,
    /// Facing slerp rate (fraction per second)
    pub rotation_speed: f32,
    /// Minimum desired-direction magnitude that counts as movement
    pub move_input_threshold: f32,
    /// Scale applied to the jump curve (m/s)
    pub jump_force: f32,
    /// Downward acceleration while airborne (m/s^2)
    pub gravity: f32,
    /// Vertical velocity scale over normalized jump time
    pub jump_curve: SampledCurve,
    /// Seconds the jump curve drives vertical velocity
    pub jump_duration: f32,
    /// Vertical velocity held while standing, keeps the capsule pressed into the ground
    pub ground_stick_velocity: f32,
    /// Lean while ascending (degrees, positive = forward)
    pub jump_forward_tilt_angle: f32,
    /// Lean while descending (degrees)
    pub jump_backward_tilt_angle: f32,
    /// Lean interpolation rate (fraction per second)
    pub tilt_speed: f32,
    /// Horizontal speed needed before the character leans in the air
    pub min_horizontal_speed_for_tilt: f32,
    /// Reach of the grounding probe below the feet
    pub ground_check_distance: f32,
    /// Height above terrain at which the landing animation begins
    pub landing_animation_start_height: f32,
}

impl MoverConfig {
    /// Default jump curve: full force at takeoff tapering to zero
    pub fn default_jump_curve() -> SampledCurve {
        SampledCurve::new(vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(0.5, 0.6),
            Keyframe::new(1.0, 0.0),
        ])
        .unwrap_or_else(|_| SampledCurve::linear(1.0, 0.0))
    }

    /// Speed for the current run state
    pub fn move_speed(&self, running: bool) -> f32 {
        if running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_speed: 4.0,
            rotation_speed: 10.0,
            move_input_threshold: 0.1,
            jump_force: 5.0,
            gravity: 17.0,
            jump_curve: Self::default_jump_curve(),
            jump_duration: 0.5,
            ground_stick_velocity: -0.5,
            jump_forward_tilt_angle: 10.0,
            jump_backward_tilt_angle: -50.0,
            tilt_speed: 0.6,
            min_horizontal_speed_for_tilt: 3.0,
            ground_check_distance: 0.01,
            landing_animation_start_height: 1.0,
        }
    }
}

/// Tuning for the animation parameter driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Blend velocity gained per second while a key is held
    pub acceleration: f32,
    /// Blend velocity lost per second after release
    pub deceleration: f32,
    /// Blend velocity cap while walking
    pub max_walk_velocity: f32,
    /// Blend velocity cap while running
    pub max_run_velocity: f32,
    /// Clamp into the current cap every frame; otherwise ramp down at `deceleration`
    pub hard_cap: bool,
    /// Seconds for takeoff to reach the mid-air pose
    pub jump_blend_duration: f32,
    /// Seconds for landing to blend from mid-air down to the crouch
    pub landing_blend_duration: f32,
    /// Lowest jump progress reached while landing
    pub crouch_position: f32,
}

impl AnimatorConfig {
    /// Blend velocity cap for the current run state
    pub fn max_velocity(&self, running: bool) -> f32 {
        if running {
            self.max_run_velocity
        } else {
            self.max_walk_velocity
        }
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            acceleration: 3.0,
            deceleration: 4.0,
            max_walk_velocity: 0.5,
            max_run_velocity: 2.0,
            hard_cap: true,
            jump_blend_duration: 0.5,
            landing_blend_duration: 1.2,
            crouch_position: 0.5,
        }
    }
}

/// Named tunings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocomotionPreset {
    /// Snappy curve-driven jump
    #[default]
    Default,
    /// Faster run, higher and slower-falling jump
    Floaty,
}

/// Full locomotion configuration for one character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub mover: MoverConfig,
    pub animator: AnimatorConfig,
}

impl LocomotionConfig {
    /// Build the configuration for a named preset
    pub fn preset(preset: LocomotionPreset) -> Self {
        match preset {
            LocomotionPreset::Default => Self::default(),
            LocomotionPreset::Floaty => Self {
                mover: MoverConfig {
                    run_speed: 6.0,
                    jump_force: 8.0,
                    gravity: 15.0,
                    ground_check_distance: 0.2,
                    ..MoverConfig::default()
                },
                animator: AnimatorConfig::default(),
            },
        }
    }

    /// Check that every tunable is usable.
    ///
    /// Zero durations and caps are accepted; the step functions treat them as
    /// instantaneous or skip the update.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.mover;
        let a = &self.animator;

        let non_negative = [
            ("walk_speed", m.walk_speed),
            ("run_speed", m.run_speed),
            ("rotation_speed", m.rotation_speed),
            ("move_input_threshold", m.move_input_threshold),
            ("jump_force", m.jump_force),
            ("gravity", m.gravity),
            ("jump_duration", m.jump_duration),
            ("tilt_speed", m.tilt_speed),
            ("min_horizontal_speed_for_tilt", m.min_horizontal_speed_for_tilt),
            ("ground_check_distance", m.ground_check_distance),
            ("landing_animation_start_height", m.landing_animation_start_height),
            ("acceleration", a.acceleration),
            ("deceleration", a.deceleration),
            ("max_walk_velocity", a.max_walk_velocity),
            ("max_run_velocity", a.max_run_velocity),
            ("jump_blend_duration", a.jump_blend_duration),
            ("landing_blend_duration", a.landing_blend_duration),
        ];
        let signed = [
            ("ground_stick_velocity", m.ground_stick_velocity),
            ("jump_forward_tilt_angle", m.jump_forward_tilt_angle),
            ("jump_backward_tilt_angle", m.jump_backward_tilt_angle),
            ("crouch_position", a.crouch_position),
        ];

        for &(field, value) in non_negative.iter().chain(signed.iter()) {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !(0.0..=1.0).contains(&a.crouch_position) {
            return Err(ConfigError::CrouchOutOfRange(a.crouch_position));
        }
        Ok(())
    }
}
