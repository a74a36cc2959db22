//! Stride Game - Character locomotion and player control
//!
//! Provides the locomotion core (mover, animator driver, jump phases), input
//! mapping, and the player controller that runs them against physics.

pub mod input;
pub mod locomotion;
pub mod player;

pub use input::{InputAction, InputState};
pub use locomotion::{
    AnimationParameters, AnimatorConfig, AnimatorDriver, AnimatorState, BlendVelocity, ConfigError,
    GroundSignals, JumpPhase, LocomotionConfig, LocomotionEvent, LocomotionIntent, LocomotionPreset,
    Mover, MoverConfig, MoverState, MoverStep,
};
pub use player::{LocomotionFrame, PlayerController};
