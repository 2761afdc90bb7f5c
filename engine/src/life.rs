use serde::{Deserialize, Serialize};

use crate::error::SurgeError;

/// Current and maximum hit points as read from the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPool {
    pub value: i32,
    pub max: i32,
}

impl HealthPool {
    pub fn new(value: i32, max: i32) -> Self {
        Self { value, max }
    }

    /// Hit points that healing can still restore.
    pub fn headroom(&self) -> i32 {
        self.max.saturating_sub(self.value).max(0)
    }

    /// Rejects pools that already break `0 <= value <= max`.
    pub fn validate(&self) -> Result<(), SurgeError> {
        if self.value < 0 {
            return Err(SurgeError::InvalidInput(format!(
                "hit points below zero ({})",
                self.value
            )));
        }
        if self.max < self.value {
            return Err(SurgeError::InvalidInput(format!(
                "hit points {} exceed max {}",
                self.value, self.max
            )));
        }
        Ok(())
    }
}

/// Healing clamped to headroom; never negative and never past max.
/// Returns the hit points actually restored.
pub fn heal(name: &str, health: &mut HealthPool, amount: i64, mut log: impl FnMut(String)) -> i32 {
    let applied = amount.clamp(0, health.headroom() as i64) as i32;
    let before = health.value;
    health.value += applied;
    log(format!(
        "[HEAL][{}] +{} HP ({} → {} / {})",
        name, applied, before, health.value, health.max
    ));
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_caps_at_max() {
        let mut h = HealthPool::new(10, 20);
        let mut seen = vec![];
        let applied = heal("Hero", &mut h, 18, |s| seen.push(s));
        assert_eq!(applied, 10);
        assert_eq!(h.value, 20);
        assert_eq!(seen, vec!["[HEAL][Hero] +10 HP (10 → 20 / 20)".to_string()]);
    }

    #[test]
    fn negative_healing_is_ignored() {
        let mut h = HealthPool::new(5, 20);
        assert_eq!(heal("Hero", &mut h, -4, |_| {}), 0);
        assert_eq!(h.value, 5);
    }

    #[test]
    fn validate_catches_broken_pools() {
        assert!(HealthPool::new(0, 10).validate().is_ok());
        assert!(HealthPool::new(10, 10).validate().is_ok());
        assert!(HealthPool::new(11, 10).validate().is_err());
        assert!(HealthPool::new(-1, 10).validate().is_err());
        assert_eq!(HealthPool::new(3, 10).headroom(), 7);
        assert_eq!(HealthPool::new(10, 10).headroom(), 0);
    }
}
