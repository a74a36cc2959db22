//! Time system for Stride
//!
//! Converts variable frame deltas into whole fixed simulation steps.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed steps handed out so far
    pub fixed_step_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_step_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        // Negative or NaN ceilings collapse to zero
        let ceiling = self.config.max_delta_time.max(0.0);
        self.unscaled_delta_time = raw_delta.max(0.0).min(ceiling);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        // A zero timestep would never drain the accumulator
        if self.config.fixed_timestep <= 0.0 {
            self.fixed_accumulator = 0.0;
            return 0;
        }

        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.fixed_step_count += steps as u64;
        steps
    }

    /// Seconds of simulation covered by the fixed steps handed out so far
    pub fn fixed_time(&self) -> f64 {
        self.fixed_step_count as f64 * self.config.fixed_timestep as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        let mut slow = GameTime::new(TimeConfig {
            time_scale: 0.5,
            ..Default::default()
        });
        slow.update(0.016);
        assert!((slow.delta_time - 0.008).abs() < 1e-7);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.01,
            ..Default::default()
        });

        time.update(0.025);
        assert_eq!(time.fixed_steps(), 2);

        // Leftover 0.005 carries into the next frame
        time.update(0.006);
        assert_eq!(time.fixed_steps(), 1);
        assert_eq!(time.fixed_step_count, 3);
        assert!((time.fixed_time() - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_max_delta_clamps_hitches() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.unscaled_delta_time, time.config.max_delta_time);
    }

    #[test]
    fn test_bad_max_delta_does_not_panic() {
        for max_delta_time in [-1.0, f32::NAN, 0.0] {
            let mut time = GameTime::new(TimeConfig {
                max_delta_time,
                ..Default::default()
            });
            time.update(1.0 / 144.0);
            assert_eq!(time.unscaled_delta_time, 0.0);
            assert_eq!(time.fixed_steps(), 0);
        }

        let mut time = GameTime::default();
        time.update(-0.5);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_zero_timestep_yields_no_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        });
        time.update(0.1);
        assert_eq!(time.fixed_steps(), 0);
    }
}
