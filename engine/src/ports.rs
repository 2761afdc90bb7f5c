//! The surge's only view of the host: reading and writing the actor,
//! asking the player, and telling them what happened.

use serde::{Deserialize, Serialize};

use crate::chat::ChatCard;
use crate::error::SurgeError;
use crate::hit_dice::{DieDescriptor, ResourcePool};
use crate::life::HealthPool;

/// Read/write access to one actor's hit dice and hit points.
pub trait ActorPort {
    fn actor_name(&self) -> String;

    /// Every class pool on the actor, exhausted ones included.
    fn resource_pools(&self) -> Result<Vec<ResourcePool>, SurgeError>;

    fn health(&self) -> Result<HealthPool, SurgeError>;

    /// Flat bonus added per hit die. Defaults to 0 when the actor has none.
    fn constitution_mod(&self) -> i32;

    /// Write the new current hit point value. Nothing else on the actor changes.
    fn apply_health(&mut self, value: i32) -> Result<(), SurgeError>;

    /// Add `count` to the pool's used counter.
    fn mark_resource_spent(&mut self, pool_id: &str, count: u32) -> Result<(), SurgeError>;
}

/// A pool the player may pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolChoice {
    pub id: String,
    pub label: String,
    pub available: u32,
    pub die: DieDescriptor,
}

impl From<&ResourcePool> for PoolChoice {
    fn from(pool: &ResourcePool) -> Self {
        Self {
            id: pool.id.clone(),
            label: pool.label(),
            available: pool.available(),
            die: pool.die,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendChoice {
    pub pool_id: String,
    pub count: i32,
}

pub trait SpendDialog {
    /// `None` means the player dismissed the dialog.
    fn prompt(&mut self, choices: &[PoolChoice], con_mod: i32) -> Option<SpendChoice>;
}

pub trait Notifier {
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

pub trait ChatSink {
    fn post(&mut self, card: ChatCard);
}

/// Answers the dialog without asking: a fixed pool (or the first offered)
/// and a fixed count. `cancel` makes it behave like a dismissed dialog.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    pub pool_id: Option<String>,
    pub count: i32,
    pub cancel: bool,
}

impl PresetDialog {
    pub fn new(pool_id: Option<String>, count: i32) -> Self {
        Self { pool_id, count, cancel: false }
    }

    pub fn cancelled() -> Self {
        Self { cancel: true, ..Self::default() }
    }
}

impl SpendDialog for PresetDialog {
    fn prompt(&mut self, choices: &[PoolChoice], _con_mod: i32) -> Option<SpendChoice> {
        if self.cancel {
            return None;
        }
        let pool_id = match &self.pool_id {
            Some(id) => id.clone(),
            None => choices.first()?.id.clone(),
        };
        Some(SpendChoice { pool_id, count: self.count })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Keeps notifications in memory, for hosts that report them afterwards.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl Notifier for NoticeLog {
    fn warn(&mut self, message: &str) {
        self.notices.push(Notice { level: NoticeLevel::Warn, message: message.to_string() });
    }

    fn error(&mut self, message: &str) {
        self.notices.push(Notice { level: NoticeLevel::Error, message: message.to_string() });
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    pub cards: Vec<ChatCard>,
}

impl ChatSink for ChatLog {
    fn post(&mut self, card: ChatCard) {
        self.cards.push(card);
    }
}
