//! Actor health and the damage notification fan-out.

use geneforge_core::constants::{HEALTH_BAR_CRITICAL, HEALTH_BAR_WOUNDED, MIN_REVIVE_HP};
use geneforge_core::enums::HealthBand;

/// Hit points of a damageable actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    current: f64,
    maximum: f64,
    alive: bool,
    has_been_hit: bool,
}

/// Outcome of one `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageReport {
    /// Non-positive or non-finite amount, or the actor was already dead.
    Rejected,
    Applied {
        amount: f64,
        critical: bool,
        /// First accepted hit on this actor.
        first_hit: bool,
        remaining: f64,
        /// This hit took the actor to zero.
        died: bool,
    },
}

impl DamageReport {
    pub fn is_applied(&self) -> bool {
        matches!(self, DamageReport::Applied { .. })
    }

    pub fn died(&self) -> bool {
        matches!(self, DamageReport::Applied { died: true, .. })
    }
}

/// Anything that can take damage.
pub trait DamageReceiver {
    fn apply_damage(&mut self, amount: f64, is_critical: bool) -> DamageReport;
    fn current_hp(&self) -> f64;
    fn max_hp(&self) -> f64;
}

impl Health {
    /// Full health. A non-positive maximum is raised to the minimal revive amount.
    pub fn new(maximum: f64) -> Self {
        let maximum = if maximum > 0.0 { maximum } else { MIN_REVIVE_HP };
        Self {
            current: maximum,
            maximum,
            alive: true,
            has_been_hit: false,
        }
    }

    pub fn apply_damage(&mut self, amount: f64, is_critical: bool) -> DamageReport {
        if !amount.is_finite() || amount <= 0.0 || !self.alive {
            return DamageReport::Rejected;
        }

        let first_hit = !self.has_been_hit;
        self.has_been_hit = true;
        self.current = (self.current - amount).max(0.0);

        let died = self.current <= 0.0;
        if died {
            self.alive = false;
        }

        DamageReport::Applied {
            amount,
            critical: is_critical,
            first_hit,
            remaining: self.current,
            died,
        }
    }

    /// Bring a dead actor back with `fraction` of max HP (at least a sliver).
    pub fn revive(&mut self, fraction: f64) {
        let restored = self.maximum * fraction.clamp(0.0, 1.0);
        self.current = restored.max(MIN_REVIVE_HP.min(self.maximum));
        self.alive = true;
    }

    /// Restore HP to a living actor, capped at max.
    pub fn heal(&mut self, amount: f64) {
        if !self.alive || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.maximum);
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_been_hit(&self) -> bool {
        self.has_been_hit
    }

    pub fn fraction(&self) -> f64 {
        self.current / self.maximum
    }

    /// Health bar color band for the current fraction.
    pub fn band(&self) -> HealthBand {
        let fraction = self.fraction();
        if fraction <= HEALTH_BAR_CRITICAL {
            HealthBand::Critical
        } else if fraction <= HEALTH_BAR_WOUNDED {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        }
    }
}

impl DamageReceiver for Health {
    fn apply_damage(&mut self, amount: f64, is_critical: bool) -> DamageReport {
        Health::apply_damage(self, amount, is_critical)
    }

    fn current_hp(&self) -> f64 {
        self.current
    }

    fn max_hp(&self) -> f64 {
        self.maximum
    }
}

/// Subscriber to an actor's damage notifications, registered at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageListener {
    /// Suspends the actor's AI for its damage-pause duration.
    AiPause,
    /// Spawns a floating damage number.
    DamageText,
    /// Shows the health bar on first hit.
    HealthBarReveal,
}

/// What a listener is told about an accepted hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageNotice {
    FirstHit,
    Damaged { amount: f64, critical: bool },
}

/// Ordered listener list owned by a damageable entity.
#[derive(Debug, Clone, Default)]
pub struct DamageListeners(Vec<DamageListener>);

impl DamageListeners {
    pub fn new(listeners: impl IntoIterator<Item = DamageListener>) -> Self {
        Self(listeners.into_iter().collect())
    }

    pub fn register(&mut self, listener: DamageListener) {
        self.0.push(listener);
    }

    pub fn contains(&self, listener: DamageListener) -> bool {
        self.0.contains(&listener)
    }

    /// Notices for an accepted hit: every listener gets `FirstHit` (on the
    /// first hit only), then every listener gets `Damaged`, in registration order.
    pub fn dispatch(&self, report: &DamageReport) -> Vec<(DamageListener, DamageNotice)> {
        let DamageReport::Applied {
            amount,
            critical,
            first_hit,
            ..
        } = *report
        else {
            return Vec::new();
        };

        let mut notices = Vec::with_capacity(self.0.len() * 2);
        if first_hit {
            notices.extend(self.0.iter().map(|l| (*l, DamageNotice::FirstHit)));
        }
        notices.extend(
            self.0
                .iter()
                .map(|l| (*l, DamageNotice::Damaged { amount, critical })),
        );
        notices
    }
}
