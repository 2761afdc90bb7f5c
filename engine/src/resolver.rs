use serde::{Deserialize, Serialize};

use crate::error::SurgeError;
use crate::hit_dice::{surge_formula, DieDescriptor, ResourcePool};
use crate::life::{heal, HealthPool};

/// What the player asked for in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendRequest {
    /// Dice to spend. Values below 1 are treated as 1; values above the
    /// pool's remaining dice are quietly reduced to what is left.
    pub count: i32,
    /// Added once per die spent (normally the CON modifier).
    pub modifier_per_die: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealingResult {
    pub spend_count: u32,
    pub die: DieDescriptor,
    pub rolls: Vec<u32>,
    pub dice_total: i64,
    pub bonus_total: i64,
    pub raw_healing: i64,
    pub applied_healing: i32,
    pub before: i32,
    pub after: i32,
    pub max: i32,
    pub pool_used_after: u32,
}

impl HealingResult {
    pub fn formula(&self) -> String {
        surge_formula(self.spend_count, self.die, self.bonus_total)
    }
}

/// Spend hit dice from `pool` and work out the healing.
///
/// Nothing is mutated: the new hit point value and the pool's new `used`
/// count come back in the result for the caller to write. `roll` is asked
/// for one die of the given face count per die spent; preconditions are
/// checked before it is ever called.
pub fn resolve(
    pool: &ResourcePool,
    die: DieDescriptor,
    request: SpendRequest,
    health: &HealthPool,
    mut roll: impl FnMut(u32) -> u32,
    mut log: impl FnMut(String),
) -> Result<HealingResult, SurgeError> {
    let available = pool.available();
    if available == 0 {
        return Err(SurgeError::NoResourceAvailable);
    }
    if die.faces < 1 {
        return Err(SurgeError::InvalidInput(format!(
            "hit die must have at least one face, got {}",
            die
        )));
    }
    health.validate()?;

    let wanted = request.count.max(1) as u32;
    let spend_count = wanted.min(available);
    if spend_count < wanted {
        log(format!(
            "[SURGE][{}] asked for {} dice, only {} left",
            pool.name, wanted, available
        ));
    }

    let rolls: Vec<u32> = (0..spend_count).map(|_| roll(die.faces)).collect();
    let dice_total = rolls
        .iter()
        .fold(0i64, |acc, &r| acc.saturating_add(r as i64));
    let bonus_total = (spend_count as i64).saturating_mul(request.modifier_per_die as i64);
    let raw_healing = dice_total.saturating_add(bonus_total);

    let mut healed = *health;
    let applied_healing = heal(&pool.name, &mut healed, raw_healing, &mut log);

    log(format!(
        "[SURGE][{}] {} → dice={:?} ({}) {:+} = {} raw, {} applied",
        pool.name,
        surge_formula(spend_count, die, bonus_total),
        rolls,
        dice_total,
        bonus_total,
        raw_healing,
        applied_healing
    ));

    Ok(HealingResult {
        spend_count,
        die,
        rolls,
        dice_total,
        bonus_total,
        raw_healing,
        applied_healing,
        before: health.value,
        after: healed.value,
        max: health.max,
        pool_used_after: pool.used + spend_count,
    })
}
