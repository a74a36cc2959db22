//! Planar blend-space velocity smoothing

use serde::{Deserialize, Serialize};

use super::events::LocomotionIntent;
use super::AnimatorConfig;

/// Distance from zero or from the cap at which the velocity snaps
pub const SNAP_TOLERANCE: f32 = 0.05;

/// Smoothed blend-space velocity: `z` forward, `x` strafe (negative = left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendVelocity {
    pub z: f32,
    pub x: f32,
}

impl BlendVelocity {
    pub const ZERO: Self = Self { z: 0.0, x: 0.0 };

    /// Advance one frame of explicit Euler with saturation
    pub fn step(self, config: &AnimatorConfig, intent: &LocomotionIntent, dt: f32) -> Self {
        let cap = config.max_velocity(intent.run);
        if !cap.is_finite() || cap <= 0.0 {
            return self;
        }

        let mut next = self;
        next.accelerate(config, intent, cap, dt);
        next.settle(config, intent, cap, dt);

        if config.hard_cap {
            next.z = next.z.clamp(-cap, cap);
            next.x = next.x.clamp(-cap, cap);
        }
        next
    }

    fn accelerate(&mut self, config: &AnimatorConfig, intent: &LocomotionIntent, cap: f32, dt: f32) {
        let gain = config.acceleration * dt;
        let loss = config.deceleration * dt;

        if intent.forward && self.z < cap {
            self.z += gain;
        }
        if intent.left && self.x > -cap {
            self.x -= gain;
        }
        if intent.right && self.x < cap {
            self.x += gain;
        }

        // Decay stops at zero
        if !intent.forward && self.z > 0.0 {
            self.z = (self.z - loss).max(0.0);
        }
        if !intent.left && self.x < 0.0 {
            self.x = (self.x + loss).min(0.0);
        } else if !intent.right && self.x > 0.0 {
            self.x = (self.x - loss).max(0.0);
        }
    }

    /// Dead-zone, ceiling snap, and over-cap handling
    fn settle(&mut self, config: &AnimatorConfig, intent: &LocomotionIntent, cap: f32, dt: f32) {
        let loss = config.deceleration * dt;

        if !intent.forward && (self.z < 0.0 || self.z.abs() < SNAP_TOLERANCE) {
            self.z = 0.0;
        }
        if !intent.left && !intent.right && self.x.abs() < SNAP_TOLERANCE {
            self.x = 0.0;
        }

        if intent.forward {
            if intent.run && self.z > cap {
                self.z = cap;
            } else if self.z > cap {
                if !config.hard_cap {
                    self.z = settle_down_to(self.z - loss, cap);
                }
            } else if self.z > cap - SNAP_TOLERANCE {
                self.z = cap;
            }
        }

        if intent.left {
            if self.x < -cap {
                if !config.hard_cap {
                    self.x = -settle_down_to(-self.x - loss, cap);
                }
            } else if self.x < -cap + SNAP_TOLERANCE {
                self.x = -cap;
            }
        }

        if intent.right {
            if self.x > cap {
                if !config.hard_cap {
                    self.x = settle_down_to(self.x - loss, cap);
                }
            } else if self.x > cap - SNAP_TOLERANCE {
                self.x = cap;
            }
        }
    }
}

/// Snap a value that is being ramped down onto `cap` once it gets close.
/// Never lands below the cap, or acceleration would push it back over.
fn settle_down_to(value: f32, cap: f32) -> f32 {
    if value < cap + SNAP_TOLERANCE {
        cap
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn intent(forward: bool, left: bool, right: bool, run: bool) -> LocomotionIntent {
        LocomotionIntent {
            forward,
            left,
            right,
            run,
            ..LocomotionIntent::idle()
        }
    }

    fn run_frames(
        mut velocity: BlendVelocity,
        config: &AnimatorConfig,
        input: &LocomotionIntent,
        frames: usize,
    ) -> BlendVelocity {
        for _ in 0..frames {
            velocity = velocity.step(config, input, DT);
            let cap = config.max_velocity(input.run);
            assert!(velocity.z.abs() <= cap && velocity.x.abs() <= cap, "{velocity:?} exceeds {cap}");
        }
        velocity
    }

    #[test]
    fn test_forward_run_converges_to_cap() {
        let config = AnimatorConfig::default();
        let seconds = config.max_run_velocity / config.acceleration;
        let frames = (seconds / DT).ceil() as usize + 2;

        let velocity = run_frames(BlendVelocity::ZERO, &config, &intent(true, false, false, true), frames);
        assert_eq!(velocity.z, config.max_run_velocity);
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_walk_converges_to_walk_cap() {
        let config = AnimatorConfig::default();
        let velocity = run_frames(BlendVelocity::ZERO, &config, &intent(true, false, false, false), 60);
        assert_eq!(velocity.z, config.max_walk_velocity);
    }

    #[test]
    fn test_strafe_directions() {
        let config = AnimatorConfig::default();
        let left = run_frames(BlendVelocity::ZERO, &config, &intent(false, true, false, false), 60);
        assert_eq!(left.x, -config.max_walk_velocity);

        let right = run_frames(BlendVelocity::ZERO, &config, &intent(false, false, true, true), 60);
        assert_eq!(right.x, config.max_run_velocity);
    }

    #[test]
    fn test_release_returns_to_exact_zero() {
        let config = AnimatorConfig::default();
        let moving = BlendVelocity { z: 2.0, x: -2.0 };
        let idle = intent(false, false, false, true);

        let rest = run_frames(moving, &config, &idle, 120);
        assert_eq!(rest, BlendVelocity::ZERO);

        // Idempotent at rest
        assert_eq!(rest.step(&config, &idle, DT), BlendVelocity::ZERO);
    }

    #[test]
    fn test_strafe_release_stays_at_zero() {
        let config = AnimatorConfig::default();
        let idle = intent(false, false, false, true);

        for start in [-2.0, 2.0, -0.06, 0.07] {
            let mut velocity = BlendVelocity { z: 0.0, x: start };
            for _ in 0..10_000 {
                velocity = velocity.step(&config, &idle, DT);
            }
            assert_eq!(velocity, BlendVelocity::ZERO, "started at x = {start}");
        }
    }

    #[test]
    fn test_run_release_clamps_to_walk_cap() {
        let config = AnimatorConfig::default();
        let running = BlendVelocity { z: 2.0, x: 0.0 };
        let walking = running.step(&config, &intent(true, false, false, false), DT);
        assert_eq!(walking.z, config.max_walk_velocity);
    }

    #[test]
    fn test_soft_cap_ramps_down() {
        let config = AnimatorConfig {
            hard_cap: false,
            ..AnimatorConfig::default()
        };
        let walk = intent(true, false, false, false);

        let mut velocity = BlendVelocity { z: 2.0, x: 0.0 };
        velocity = velocity.step(&config, &walk, DT);
        assert!(velocity.z > config.max_walk_velocity);
        assert!(velocity.z < 2.0);

        for _ in 0..120 {
            velocity = velocity.step(&config, &walk, DT);
        }
        assert_eq!(velocity.z, config.max_walk_velocity);
    }

    #[test]
    fn test_zero_cap_skips_update() {
        let config = AnimatorConfig {
            max_walk_velocity: 0.0,
            ..AnimatorConfig::default()
        };
        let velocity = BlendVelocity { z: 0.3, x: 0.0 };
        let next = velocity.step(&config, &intent(true, false, false, false), DT);
        assert_eq!(next, velocity);
    }

    #[test]
    fn test_deterministic_replay() {
        let config = AnimatorConfig::default();
        let script = [
            intent(true, false, false, false),
            intent(true, true, false, true),
            intent(false, false, true, false),
            intent(false, false, false, false),
        ];
        let replay = || {
            let mut velocity = BlendVelocity::ZERO;
            for input in script.iter().cycle().take(200) {
                velocity = velocity.step(&config, input, DT);
            }
            velocity
        };
        assert_eq!(replay(), replay());
    }
}
