//! Action-based input and its mapping to a locomotion intent
//!
//! Raw device polling lives outside this crate; callers press and release
//! actions and read back a [`LocomotionIntent`] once per frame.

use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::locomotion::LocomotionIntent;

/// Game actions that drive locomotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Run modifier (Shift by default)
    Sprint,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press an action; only the first press of a hold counts as "just pressed"
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Replace the held set, deriving presses from what was not held before
    pub fn set_held(&mut self, actions: impl IntoIterator<Item = InputAction>) {
        let next: HashSet<InputAction> = actions.into_iter().collect();
        for action in next.difference(&self.held) {
            self.just_pressed.insert(*action);
        }
        self.held = next;
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Strafe and forward axes in `[-1, 1]`
    pub fn axes(&self) -> (f32, f32) {
        let axis = |positive, negative| {
            let mut value = 0.0;
            if self.is_held(positive) {
                value += 1.0;
            }
            if self.is_held(negative) {
                value -= 1.0;
            }
            value
        };
        (
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBackward),
        )
    }

    /// Resolve this frame's intent relative to a camera yaw (radians)
    pub fn to_intent(&self, camera_yaw: f32) -> LocomotionIntent {
        let (horizontal, vertical) = self.axes();

        // Camera-local: forward looks down -Z
        let mut move_direction = Vec3::new(horizontal, 0.0, -vertical);
        if move_direction.length_squared() > 0.0 {
            move_direction = move_direction.normalize();

            let cos_yaw = camera_yaw.cos();
            let sin_yaw = camera_yaw.sin();
            move_direction = Vec3::new(
                move_direction.x * cos_yaw - move_direction.z * sin_yaw,
                0.0,
                move_direction.x * sin_yaw + move_direction.z * cos_yaw,
            );
        }

        LocomotionIntent {
            // The character turns to face travel, so backward still plays forward
            forward: self.is_held(InputAction::MoveForward) || self.is_held(InputAction::MoveBackward),
            left: self.is_held(InputAction::MoveLeft),
            right: self.is_held(InputAction::MoveRight),
            run: self.is_held(InputAction::Sprint),
            jump_pressed: self.is_just_pressed(InputAction::Jump),
            horizontal_axis: horizontal,
            vertical_axis: vertical,
            move_direction,
        }
    }
}
