//! Hull integrity.

use log::{info, warn};

use bathy_core::components::HullState;
use bathy_core::config::HullConfig;
use bathy_core::events::SimEvent;

/// What a hit did to the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Swallowed by the damage cooldown, or the hull was already lost.
    Ignored,
    Damaged { health: u32 },
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct HullIntegrity {
    state: HullState,
    damage_cooldown_secs: f64,
}

impl HullIntegrity {
    pub fn new(config: &HullConfig) -> Self {
        Self {
            state: HullState {
                health: config.max_health,
                max_health: config.max_health,
                last_damage_at: None,
                destroyed: false,
            },
            damage_cooldown_secs: config.damage_cooldown_secs,
        }
    }

    pub fn state(&self) -> &HullState {
        &self.state
    }

    pub fn health(&self) -> u32 {
        self.state.health
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed
    }

    /// Apply `amount` damage at sim time `now_secs`.
    ///
    /// Hits closer together than the cooldown count once. Destruction is
    /// reported a single time.
    pub fn take_damage(
        &mut self,
        amount: u32,
        now_secs: f64,
        events: &mut Vec<SimEvent>,
    ) -> DamageOutcome {
        if self.state.destroyed || amount == 0 {
            return DamageOutcome::Ignored;
        }
        if let Some(last) = self.state.last_damage_at {
            if now_secs - last < self.damage_cooldown_secs {
                return DamageOutcome::Ignored;
            }
        }

        self.state.last_damage_at = Some(now_secs);
        self.state.health = self.state.health.saturating_sub(amount);
        warn!(
            "hull damaged: {}/{}",
            self.state.health, self.state.max_health
        );
        events.push(SimEvent::HullDamaged {
            health: self.state.health,
            max_health: self.state.max_health,
        });

        if self.state.health == 0 {
            self.state.destroyed = true;
            info!("hull destroyed");
            events.push(SimEvent::HullDestroyed);
            return DamageOutcome::Destroyed;
        }
        DamageOutcome::Damaged {
            health: self.state.health,
        }
    }

    /// Restore up to `amount` health. A destroyed hull stays destroyed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.state.destroyed {
            self.state.health = self
                .state
                .health
                .saturating_add(amount)
                .min(self.state.max_health);
        }
        self.state.health
    }

    /// Full health, no cooldown, not destroyed.
    pub fn reset(&mut self) {
        self.state.health = self.state.max_health;
        self.state.last_damage_at = None;
        self.state.destroyed = false;
    }
}
