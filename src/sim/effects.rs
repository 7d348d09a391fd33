//! Timed power-up effects and the food combo streak
//!
//! Nothing here runs on a timer. Every expiry is a stored timestamp compared
//! against the caller's `now`, so expiry is noticed lazily at query time.

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_POINTS_PER_STREAK, COMBO_WINDOW, EFFECT_DURATION};

/// Power-up item kinds (each grants the effect of the same name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Tick interval ×1.5
    Slow,
    /// Pass through own body
    Ghost,
    /// Food score ×2
    Multiplier,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Slow, ItemKind::Ghost, ItemKind::Multiplier];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Slow => "slow",
            ItemKind::Ghost => "ghost",
            ItemKind::Multiplier => "multiplier",
        }
    }
}

/// Expiry timestamps (ms) for each effect. 0 means never activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub slow_until: f64,
    pub ghost_until: f64,
    pub multiplier_until: f64,
}

impl Effects {
    fn expiry(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Slow => self.slow_until,
            ItemKind::Ghost => self.ghost_until,
            ItemKind::Multiplier => self.multiplier_until,
        }
    }

    /// Start (or restart) an effect for the standard duration
    pub fn activate(&mut self, kind: ItemKind, now: f64) {
        let until = now + EFFECT_DURATION;
        match kind {
            ItemKind::Slow => self.slow_until = until,
            ItemKind::Ghost => self.ghost_until = until,
            ItemKind::Multiplier => self.multiplier_until = until,
        }
    }

    pub fn is_active(&self, kind: ItemKind, now: f64) -> bool {
        self.expiry(kind) > now
    }

    /// Milliseconds left on an effect (0 when inactive)
    pub fn remaining(&self, kind: ItemKind, now: f64) -> f64 {
        (self.expiry(kind) - now).max(0.0)
    }

    /// Active effects with their remaining time, in a stable order
    pub fn active(&self, now: f64) -> Vec<(ItemKind, f64)> {
        ItemKind::ALL
            .iter()
            .filter(|kind| self.is_active(**kind, now))
            .map(|kind| (*kind, self.remaining(*kind, now)))
            .collect()
    }
}

/// Consecutive-food streak
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub streak: u32,
    pub expires_at: f64,
}

impl Combo {
    /// Points added to a food pickup for the current streak
    pub fn bonus(&self) -> u64 {
        self.streak as u64 * COMBO_POINTS_PER_STREAK
    }

    /// Extend the streak after eating food
    pub fn register_food(&mut self, now: f64) {
        self.streak += 1;
        self.expires_at = now + COMBO_WINDOW;
    }

    /// Drop the streak if its window has passed. Returns true if it was reset.
    pub fn expire_if_stale(&mut self, now: f64) -> bool {
        if self.streak > 0 && now > self.expires_at {
            self.streak = 0;
            true
        } else {
            false
        }
    }

    /// Fraction of the combo window left (0.0 - 1.0), for the HUD bar
    pub fn remaining_fraction(&self, now: f64) -> f64 {
        if self.streak == 0 {
            return 0.0;
        }
        ((self.expires_at - now) / COMBO_WINDOW).clamp(0.0, 1.0)
    }
}
