//! Character locomotion core
//!
//! The kinematic [`Mover`] and the [`AnimatorDriver`] advance once per fixed
//! step and talk only through [`LocomotionEvent`]s. Neither reads physics;
//! ground state arrives as [`GroundSignals`].

mod animator;
mod blend;
mod config;
mod events;
mod jump_phase;
mod mover;

pub use animator::{AnimationParameters, AnimatorDriver, AnimatorState};
pub use blend::{BlendVelocity, SNAP_TOLERANCE};
pub use config::{AnimatorConfig, ConfigError, LocomotionConfig, LocomotionPreset, MoverConfig};
pub use events::{GroundSignals, LocomotionEvent, LocomotionIntent};
pub use jump_phase::JumpPhase;
pub use mover::{Mover, MoverState, MoverStep};
