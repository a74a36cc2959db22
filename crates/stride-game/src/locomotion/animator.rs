//! Animation parameter driver
//!
//! Turns player intent into a smoothed blend-space velocity and follows the
//! mover's jump lifecycle events with the jump-phase state machine. Nothing
//! here reads physics; the only coupling to the mover is through
//! [`LocomotionEvent`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::blend::BlendVelocity;
use super::events::{LocomotionEvent, LocomotionIntent};
use super::jump_phase::JumpPhase;
use super::AnimatorConfig;

/// Parameters published to the animation graph every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameters {
    #[serde(rename = "VelocityZ")]
    pub velocity_z: f32,
    #[serde(rename = "VelocityX")]
    pub velocity_x: f32,
    #[serde(rename = "isJumping")]
    pub is_jumping: bool,
    #[serde(rename = "JumpProgress")]
    pub jump_progress: f32,
}

/// Animator memory between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    pub velocity: BlendVelocity,
    pub phase: JumpPhase,
}

impl AnimatorState {
    pub fn handle(self, event: LocomotionEvent) -> Self {
        Self {
            phase: self.phase.handle(event),
            ..self
        }
    }

    /// Per-frame update: velocity smoothing, then the jump blend
    pub fn step(self, config: &AnimatorConfig, intent: &LocomotionIntent, dt: f32) -> Self {
        Self {
            velocity: self.velocity.step(config, intent, dt),
            phase: self.phase.advance(config, dt),
        }
    }

    pub fn parameters(&self) -> AnimationParameters {
        AnimationParameters {
            velocity_z: self.velocity.z,
            velocity_x: self.velocity.x,
            is_jumping: self.phase.is_jumping(),
            jump_progress: self.phase.progress(),
        }
    }
}

/// The animator component owned by a character
#[derive(Debug, Clone)]
pub struct AnimatorDriver {
    pub config: AnimatorConfig,
    state: AnimatorState,
}

impl AnimatorDriver {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            state: AnimatorState::default(),
        }
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn phase(&self) -> JumpPhase {
        self.state.phase
    }

    pub fn parameters(&self) -> AnimationParameters {
        self.state.parameters()
    }

    /// Apply one lifecycle event from the mover
    pub fn handle(&mut self, event: LocomotionEvent) {
        let before = self.state.phase;
        self.state = self.state.handle(event);
        if before != self.state.phase {
            debug!(
                "{}: jump phase {} -> {}",
                event.name(),
                before.name(),
                self.state.phase.name()
            );
        }
    }

    /// Apply a frame's events in the order they were raised
    pub fn handle_all(&mut self, events: &[LocomotionEvent]) {
        for &event in events {
            self.handle(event);
        }
    }

    /// Advance one frame and return the fresh parameters
    pub fn update(&mut self, intent: &LocomotionIntent, dt: f32) -> AnimationParameters {
        let before = self.state.phase;
        self.state = self.state.step(&self.config, intent, dt);
        if before.name() != self.state.phase.name() {
            debug!("Jump phase {} -> {}", before.name(), self.state.phase.name());
        }
        self.state.parameters()
    }

    /// Back to idle, e.g. after a teleport
    pub fn reset(&mut self) {
        self.state = AnimatorState::default();
    }
}
