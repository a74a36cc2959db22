//! Scripted input scenarios for the headless runner

use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_game::{InputAction, InputState, LocomotionIntent};

/// A static box placed in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    pub half_extents: Vec3,
    pub position: Vec3,
}

/// A stretch of time with constant input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    /// Seconds this segment lasts
    pub duration: f32,
    /// Actions held for the whole segment
    pub held: Vec<InputAction>,
    /// Actions tapped on the segment's first step
    pub pressed: Vec<InputAction>,
    /// Camera yaw in radians
    pub camera_yaw: f32,
}

/// Scene plus input script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub ground_height: f32,
    pub spawn: Vec3,
    pub boxes: Vec<BoxSpec>,
    pub segments: Vec<Segment>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            ground_height: 0.0,
            spawn: Vec3::new(0.0, 0.1, 0.0),
            boxes: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl Scenario {
    /// Read and check a scenario file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Built-in script: settle, walk, run, running jump, land, idle
    pub fn demo() -> Self {
        use InputAction::*;

        let segment = |duration, held: &[InputAction], pressed: &[InputAction]| Segment {
            duration,
            held: held.to_vec(),
            pressed: pressed.to_vec(),
            camera_yaw: 0.0,
        };

        Self {
            name: "demo".to_string(),
            segments: vec![
                segment(0.5, &[], &[]),
                segment(1.0, &[MoveForward], &[]),
                segment(1.0, &[MoveForward, Sprint], &[]),
                segment(1.5, &[MoveForward, Sprint], &[Jump]),
                segment(0.5, &[MoveForward, MoveRight], &[]),
                segment(1.5, &[], &[]),
            ],
            ..Self::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.segments.is_empty(), "scenario '{}' has no segments", self.name);
        for (index, segment) in self.segments.iter().enumerate() {
            anyhow::ensure!(
                segment.duration.is_finite() && segment.duration >= 0.0,
                "segment {} has invalid duration {}",
                index,
                segment.duration
            );
            anyhow::ensure!(
                segment.camera_yaw.is_finite(),
                "segment {} has invalid camera yaw",
                index
            );
        }
        anyhow::ensure!(self.spawn.is_finite(), "spawn point is not finite");
        Ok(())
    }

    /// Total scripted time
    pub fn duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Walk the script one fixed step at a time
    pub fn script(&self, fixed_timestep: f32) -> ScenarioScript<'_> {
        ScenarioScript {
            scenario: self,
            fixed_timestep,
            segment: 0,
            remaining: None,
            input: InputState::new(),
        }
    }
}

/// Yields one intent per fixed step until the scenario runs out
pub struct ScenarioScript<'a> {
    scenario: &'a Scenario,
    fixed_timestep: f32,
    segment: usize,
    /// Steps left in the current segment; `None` until it starts
    remaining: Option<u32>,
    input: InputState,
}

impl ScenarioScript<'_> {
    /// Index of the segment currently playing
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    fn steps_for(&self, duration: f32) -> u32 {
        if self.fixed_timestep <= 0.0 {
            return 0;
        }
        (duration / self.fixed_timestep).round() as u32
    }
}

impl Iterator for ScenarioScript<'_> {
    type Item = LocomotionIntent;

    fn next(&mut self) -> Option<LocomotionIntent> {
        let scenario = self.scenario;
        loop {
            let segment = scenario.segments.get(self.segment)?;

            match self.remaining {
                None => {
                    let steps = self.steps_for(segment.duration);
                    self.remaining = Some(steps);
                    self.input.set_held(segment.held.iter().copied());

                    // A segment with no steps has nowhere to put its taps
                    if steps > 0 {
                        for &action in &segment.pressed {
                            self.input.press(action);
                        }
                    }
                }
                Some(0) => {
                    self.input.clear_frame();
                    self.segment += 1;
                    self.remaining = None;
                }
                Some(left) => {
                    let intent = self.input.to_intent(segment.camera_yaw);

                    // Taps last a single step
                    self.input.clear_frame();
                    for action in &segment.pressed {
                        if !segment.held.contains(action) {
                            self.input.release(*action);
                        }
                    }

                    self.remaining = Some(left - 1);
                    return Some(intent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_demo_is_valid() {
        let demo = Scenario::demo();
        demo.validate().unwrap();
        assert!((demo.duration() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = toml::from_str(
            r#"
            name = "ledge"
            spawn = [0.0, 2.0, 0.0]

            [[boxes]]
            half_extents = [1.0, 0.5, 1.0]
            position = [0.0, 0.5, 3.0]

            [[segments]]
            duration = 1.0
            held = ["MoveForward", "Sprint"]
            pressed = ["Jump"]
            camera_yaw = 0.5
            "#,
        )
        .unwrap();

        scenario.validate().unwrap();
        assert_eq!(scenario.spawn, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(scenario.boxes.len(), 1);
        assert_eq!(scenario.segments[0].held, vec![InputAction::MoveForward, InputAction::Sprint]);
        assert_eq!(scenario.ground_height, 0.0);
    }

    #[test]
    fn test_rejects_bad_segments() {
        let mut scenario = Scenario::demo();
        scenario.segments[1].duration = -1.0;
        assert!(scenario.validate().is_err());

        assert!(Scenario::default().validate().is_err());
    }

    #[test]
    fn test_script_step_counts() {
        let demo = Scenario::demo();
        let steps = demo.script(DT).count();
        assert_eq!(steps, 360);
    }

    #[test]
    fn test_tap_lasts_one_step() {
        let scenario = Scenario {
            segments: vec![Segment {
                duration: 0.5,
                held: vec![InputAction::MoveForward],
                pressed: vec![InputAction::Jump],
                camera_yaw: 0.0,
            }],
            ..Scenario::default()
        };

        let intents: Vec<_> = scenario.script(DT).collect();
        assert_eq!(intents.len(), 30);
        assert!(intents[0].jump_pressed);
        assert!(intents[1..].iter().all(|i| !i.jump_pressed && i.forward));
    }

    #[test]
    fn test_empty_segment_drops_its_taps() {
        let scenario = Scenario {
            segments: vec![
                Segment {
                    duration: 0.0,
                    pressed: vec![InputAction::Jump],
                    ..Segment::default()
                },
                Segment {
                    duration: 0.1,
                    held: vec![InputAction::MoveForward],
                    ..Segment::default()
                },
            ],
            ..Scenario::default()
        };

        let intents: Vec<_> = scenario.script(DT).collect();
        assert_eq!(intents.len(), 6);
        assert!(intents.iter().all(|i| !i.jump_pressed && i.forward));
    }

    #[test]
    fn test_held_jump_presses_once() {
        let scenario = Scenario {
            segments: vec![
                Segment {
                    duration: 0.1,
                    ..Segment::default()
                },
                Segment {
                    duration: 0.2,
                    held: vec![InputAction::Jump],
                    ..Segment::default()
                },
            ],
            ..Scenario::default()
        };

        let pressed = scenario.script(DT).filter(|i| i.jump_pressed).count();
        assert_eq!(pressed, 1);
    }
}
