//! Level and speed progression

use crate::consts::{FOODS_PER_LEVEL, INITIAL_SPEED, MIN_SPEED, SLOW_FACTOR};
use crate::settings::DifficultyCurve;

/// Level for a number of foods eaten (starts at 1)
pub fn level_for(foods_eaten: u32) -> u32 {
    foods_eaten / FOODS_PER_LEVEL + 1
}

/// Base tick interval (ms) for a level
pub fn tick_interval(level: u32, curve: DifficultyCurve) -> f64 {
    let reduction = level.saturating_sub(1) as f64 * curve.step_ms();
    (INITIAL_SPEED - reduction).max(MIN_SPEED)
}

/// Interval actually used by the loop, stretched while slowed
pub fn effective_interval(base_interval: f64, slow_active: bool) -> f64 {
    if slow_active {
        base_interval * SLOW_FACTOR
    } else {
        base_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(4), 1);
        assert_eq!(level_for(5), 2);
        assert_eq!(level_for(14), 3);
    }

    #[test]
    fn test_tick_interval_curves() {
        assert_eq!(tick_interval(1, DifficultyCurve::Normal), INITIAL_SPEED);
        assert_eq!(tick_interval(2, DifficultyCurve::Gentle), 145.0);
        assert_eq!(tick_interval(2, DifficultyCurve::Normal), 142.0);
        assert_eq!(tick_interval(2, DifficultyCurve::Steep), 138.0);
    }

    #[test]
    fn test_tick_interval_floor() {
        assert_eq!(tick_interval(100, DifficultyCurve::Steep), MIN_SPEED);
        assert_eq!(tick_interval(u32::MAX, DifficultyCurve::Gentle), MIN_SPEED);
    }

    #[test]
    fn test_slow_stretches_interval() {
        assert_eq!(effective_interval(100.0, true), 150.0);
        assert_eq!(effective_interval(100.0, false), 100.0);
    }
}
