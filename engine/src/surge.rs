use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chat::ChatCard;
use crate::error::SurgeError;
use crate::ports::{ActorPort, ChatSink, Notifier, PoolChoice, SpendDialog};
use crate::resolver::{resolve, HealingResult, SpendRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "result")]
pub enum SurgeOutcome {
    Healed(HealingResult),
    Cancelled,
}

/// Spend hit dice on the selected actor.
///
/// Runs in order: validate the selection, ask the player, roll, write hit
/// points, write hit dice used, post to chat. Every failure before the first
/// write is reported through `notifier` and leaves the actor untouched. The
/// two writes are not transactional; if marking the dice fails, the healing
/// stays applied and the error is returned.
pub fn healing_surge<A: ActorPort>(
    selection: Option<&mut A>,
    dialog: &mut dyn SpendDialog,
    notifier: &mut dyn Notifier,
    chat: &mut dyn ChatSink,
    roll: impl FnMut(u32) -> u32,
) -> Result<SurgeOutcome, SurgeError> {
    let Some(actor) = selection else {
        notifier.warn("Select a token first.");
        return Err(SurgeError::NoSelection);
    };
    let name = actor.actor_name();

    let pools = report(notifier, actor.resource_pools())?;
    if pools.is_empty() {
        notifier.error("This actor has no class items.");
        return Err(SurgeError::MissingData(format!("{} has no class items", name)));
    }

    let choices: Vec<PoolChoice> = pools
        .iter()
        .filter(|p| p.available() > 0)
        .map(PoolChoice::from)
        .collect();
    if choices.is_empty() {
        notifier.warn("No Hit Dice remaining to spend.");
        return Err(SurgeError::NoResourceAvailable);
    }

    let con_mod = actor.constitution_mod();
    let Some(choice) = dialog.prompt(&choices, con_mod) else {
        debug!(actor = %name, "surge dialog dismissed");
        return Ok(SurgeOutcome::Cancelled);
    };

    let Some(pool) = pools.iter().find(|p| p.id == choice.pool_id) else {
        notifier.error("Class not found.");
        return Err(SurgeError::MissingData(format!(
            "class '{}' not found on {}",
            choice.pool_id, name
        )));
    };

    let health = match actor.health() {
        Ok(h) => h,
        Err(e) => {
            notifier.error("Actor has no HP data.");
            return Err(e);
        }
    };

    let request = SpendRequest { count: choice.count, modifier_per_die: con_mod };
    let result = report(
        notifier,
        resolve(pool, pool.die, request, &health, roll, |line| debug!("{}", line)),
    )?;

    report(notifier, actor.apply_health(result.after))?;
    if let Err(e) = actor.mark_resource_spent(&pool.id, result.spend_count) {
        warn!(
            actor = %name,
            pool = %pool.id,
            healed = result.applied_healing,
            "hit points written but hit dice not marked spent: {}",
            e
        );
        notifier.error(&format!("Healing applied but Hit Dice were not marked spent: {}", e));
        return Err(e);
    }

    info!(
        actor = %name,
        pool = %pool.name,
        spent = result.spend_count,
        healed = result.applied_healing,
        hp = result.after,
        "healing surge"
    );
    chat.post(ChatCard::for_surge(&name, &result));
    Ok(SurgeOutcome::Healed(result))
}

fn report<T>(notifier: &mut dyn Notifier, res: Result<T, SurgeError>) -> Result<T, SurgeError> {
    if let Err(e) = &res {
        match e {
            SurgeError::NoResourceAvailable => notifier.warn(&e.to_string()),
            _ => notifier.error(&e.to_string()),
        }
    }
    res
}
