//! Scalar helpers shared by the simulation crates

/// Wrap an angle in degrees into `(-180, 180]`
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Interpolate between two angles in degrees along the shortest arc.
///
/// `t` is clamped to `[0, 1]`, so a large `speed * dt` lands on the target
/// instead of overshooting it.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_angle_takes_short_way() {
        // 170 -> -170 crosses the seam: 20 degrees, not 340
        let halfway = lerp_angle(170.0, -170.0, 0.5);
        assert!((wrap_degrees(halfway) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_angle_clamps_t() {
        assert_eq!(lerp_angle(0.0, 10.0, 3.0), 10.0);
        assert_eq!(lerp_angle(0.0, 10.0, -1.0), 0.0);
    }

    #[test]
    fn test_lerp_angle_negative_target() {
        let value = lerp_angle(0.0, -50.0, 0.5);
        assert!((value + 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(45.0), 45.0);
    }
}
