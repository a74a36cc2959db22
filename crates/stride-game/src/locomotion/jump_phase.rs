//! Jump-phase state machine driving the `JumpProgress` blend parameter

use serde::{Deserialize, Serialize};

use super::events::LocomotionEvent;
use super::AnimatorConfig;

/// Where the jump animation is, independent of physical jump timing.
///
/// Progress lives inside the variants, so `None` always means "not jumping,
/// progress zero".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum JumpPhase {
    #[default]
    None,
    /// Blending from the crouch up to the mid-air pose
    Takeoff { progress: f32 },
    /// Holding the mid-air pose (progress 1.0)
    MidAir,
    /// Blending back down toward the crouch
    Landing { progress: f32 },
}

impl JumpPhase {
    /// Value of the `JumpProgress` blend parameter
    pub fn progress(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Takeoff { progress } | Self::Landing { progress } => progress,
            Self::MidAir => 1.0,
        }
    }

    pub fn is_jumping(self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Takeoff { .. } => "Takeoff",
            Self::MidAir => "MidAir",
            Self::Landing { .. } => "Landing",
        }
    }

    /// Apply a lifecycle event
    pub fn handle(self, event: LocomotionEvent) -> Self {
        match event {
            LocomotionEvent::StartJump => self.start_jump(),
            LocomotionEvent::StartLanding => self.start_landing(),
            LocomotionEvent::JumpAnimationEnd => self.end(),
        }
    }

    /// Begin the takeoff blend; ignored while a jump is already playing
    pub fn start_jump(self) -> Self {
        match self {
            Self::None => Self::Takeoff { progress: 0.0 },
            other => other,
        }
    }

    /// Begin the landing blend from wherever the jump currently is
    pub fn start_landing(self) -> Self {
        match self {
            Self::Takeoff { progress } => Self::Landing { progress },
            Self::MidAir => Self::Landing { progress: 1.0 },
            other => other,
        }
    }

    /// Touchdown: always back to the idle baseline, even mid-blend
    pub fn end(self) -> Self {
        Self::None
    }

    /// Advance the blend by one frame
    pub fn advance(self, config: &AnimatorConfig, dt: f32) -> Self {
        match self {
            Self::None => Self::None,
            Self::Takeoff { progress } => Self::advance_takeoff(progress, config, dt),
            Self::MidAir => Self::MidAir,
            Self::Landing { progress } => Self::advance_landing(progress, config, dt),
        }
    }

    fn advance_takeoff(progress: f32, config: &AnimatorConfig, dt: f32) -> Self {
        // Zero duration: the takeoff blend is instantaneous
        if config.jump_blend_duration <= 0.0 {
            return Self::MidAir;
        }

        let progress = (progress + dt / config.jump_blend_duration).clamp(0.0, 1.0);
        if progress >= 1.0 {
            Self::MidAir
        } else {
            Self::Takeoff { progress }
        }
    }

    fn advance_landing(progress: f32, config: &AnimatorConfig, dt: f32) -> Self {
        let crouch = config.crouch_position.clamp(0.0, 1.0);
        if config.landing_blend_duration <= 0.0 {
            return Self::Landing { progress: crouch };
        }

        let progress = (progress - dt / config.landing_blend_duration).clamp(crouch, 1.0);
        Self::Landing { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exact in binary so blend sums land on 1.0 without rounding
    const DT: f32 = 1.0 / 64.0;

    fn advance_for(mut phase: JumpPhase, config: &AnimatorConfig, seconds: f32) -> JumpPhase {
        let frames = (seconds / DT).round() as usize;
        for _ in 0..frames {
            phase = phase.advance(config, DT);
        }
        phase
    }

    #[test]
    fn test_takeoff_reaches_mid_air_after_blend_duration() {
        let config = AnimatorConfig::default();
        let phase = JumpPhase::None.start_jump();
        assert_eq!(phase, JumpPhase::Takeoff { progress: 0.0 });

        let halfway = advance_for(phase, &config, config.jump_blend_duration / 2.0);
        assert!(matches!(halfway, JumpPhase::Takeoff { .. }));
        assert!((halfway.progress() - 0.5).abs() < 1e-6);

        let phase = advance_for(phase, &config, config.jump_blend_duration);
        assert_eq!(phase, JumpPhase::MidAir);
        assert_eq!(phase.progress(), 1.0);
    }

    #[test]
    fn test_mid_air_holds() {
        let config = AnimatorConfig::default();
        let phase = advance_for(JumpPhase::MidAir, &config, 3.0);
        assert_eq!(phase, JumpPhase::MidAir);
    }

    #[test]
    fn test_start_jump_is_idempotent() {
        let phase = JumpPhase::None.start_jump();
        assert_eq!(phase.start_jump(), phase);

        let landing = JumpPhase::Landing { progress: 0.7 };
        assert_eq!(landing.start_jump(), landing);
    }

    #[test]
    fn test_start_landing_only_while_jumping() {
        assert_eq!(JumpPhase::None.start_landing(), JumpPhase::None);
        assert_eq!(JumpPhase::MidAir.start_landing(), JumpPhase::Landing { progress: 1.0 });

        let landing = JumpPhase::Landing { progress: 0.8 };
        assert_eq!(landing.start_landing(), landing);
    }

    #[test]
    fn test_landing_floors_at_crouch() {
        let config = AnimatorConfig::default();
        let phase = advance_for(JumpPhase::MidAir.start_landing(), &config, 10.0);
        assert_eq!(phase, JumpPhase::Landing { progress: config.crouch_position });
    }

    #[test]
    fn test_end_interrupts_landing_above_crouch() {
        let config = AnimatorConfig::default();
        let phase = advance_for(JumpPhase::MidAir.start_landing(), &config, 0.1);
        assert!(phase.progress() > config.crouch_position);

        let phase = phase.handle(LocomotionEvent::JumpAnimationEnd);
        assert_eq!(phase, JumpPhase::None);
        assert_eq!(phase.progress(), 0.0);
    }

    #[test]
    fn test_zero_durations_are_instant() {
        let config = AnimatorConfig {
            jump_blend_duration: 0.0,
            landing_blend_duration: 0.0,
            ..AnimatorConfig::default()
        };
        let phase = JumpPhase::None.start_jump().advance(&config, DT);
        assert_eq!(phase, JumpPhase::MidAir);

        let phase = phase.start_landing().advance(&config, DT);
        assert_eq!(phase.progress(), config.crouch_position);
    }

    #[test]
    fn test_phase_and_flag_stay_coherent() {
        let config = AnimatorConfig::default();
        let events = [
            LocomotionEvent::StartJump,
            LocomotionEvent::StartLanding,
            LocomotionEvent::JumpAnimationEnd,
        ];

        // Every event sequence of length 4, with a frame advance between events
        for code in 0..3usize.pow(4) {
            let mut phase = JumpPhase::None;
            let mut rest = code;
            for _ in 0..4 {
                phase = phase.handle(events[rest % 3]).advance(&config, DT);
                rest /= 3;

                assert_eq!(phase == JumpPhase::None, !phase.is_jumping());
                if !phase.is_jumping() {
                    assert_eq!(phase.progress(), 0.0);
                }
                assert!((0.0..=1.0).contains(&phase.progress()));
            }
        }
    }
}
