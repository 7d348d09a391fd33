//! HUD read model
//!
//! Everything the score bar shows, derived from a state snapshot at `now`.

use crate::consts::INITIAL_SPEED;
use crate::sim::{GamePhase, GameState, ItemKind};

/// One active effect badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectBadge {
    pub kind: ItemKind,
    /// Whole seconds left, rounded up
    pub seconds: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub best: u64,
    pub level: u32,
    /// INITIAL_SPEED / effective interval (1.0 at level 1, < 1 while slowed)
    pub speed_multiplier: f64,
    pub combo: u32,
    /// Remaining combo window (1.0 just after eating, 0.0 when lapsed)
    pub combo_fraction: f64,
    pub badges: Vec<EffectBadge>,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, now: f64) -> Self {
        let badges = state
            .effects
            .active(now)
            .into_iter()
            .map(|(kind, remaining)| EffectBadge {
                kind,
                seconds: (remaining / 1000.0).ceil() as u32,
            })
            .collect();

        Self {
            score: state.score,
            best: state.best_score,
            level: state.level,
            speed_multiplier: INITIAL_SPEED / state.effective_interval(now),
            combo: state.combo.streak,
            combo_fraction: state.combo.remaining_fraction(now),
            badges,
            phase: state.phase,
        }
    }

    /// Speed multiplier formatted for display, e.g. "1.2x"
    pub fn speed_label(&self) -> String {
        format!("{:.1}x", self.speed_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_fresh_game_hud() {
        let state = GameState::new(Settings::default(), 3, 250);
        let hud = HudSnapshot::capture(&state, 0.0);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.best, 250);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.speed_label(), "1.0x");
        assert_eq!(hud.combo, 0);
        assert_eq!(hud.combo_fraction, 0.0);
        assert!(hud.badges.is_empty());
    }

    #[test]
    fn test_badges_round_up() {
        let mut state = GameState::new(Settings::default(), 3, 0);
        state.effects.activate(ItemKind::Slow, 0.0);
        state.effects.activate(ItemKind::Ghost, 3000.0);

        let hud = HudSnapshot::capture(&state, 3900.1);
        assert_eq!(
            hud.badges,
            vec![
                EffectBadge {
                    kind: ItemKind::Slow,
                    seconds: 2
                },
                EffectBadge {
                    kind: ItemKind::Ghost,
                    seconds: 5
                },
            ]
        );
        assert!((hud.speed_multiplier - 1.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_combo_bar() {
        let mut state = GameState::new(Settings::default(), 3, 0);
        state.combo.register_food(1000.0);
        let hud = HudSnapshot::capture(&state, 1500.0);
        assert_eq!(hud.combo, 1);
        assert!((hud.combo_fraction - 0.8).abs() < 1e-9);
    }
}
