//! In-memory actor document in the host's shape.
//!
//! Only the fields a surge reads or writes are typed. Everything else on
//! the actor, its system data and its items is carried through untouched in
//! `extra`, so writing a document back never drops host fields.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ability_mod;
use crate::error::SurgeError;
use crate::hit_dice::{DieDescriptor, ResourcePool, DEFAULT_HIT_DIE};
use crate::life::HealthPool;
use crate::ports::ActorPort;

pub const CLASS_ITEM_TYPE: &str = "class";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDocument {
    pub name: String,
    #[serde(default)]
    pub system: ActorSystem,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSystem {
    #[serde(default)]
    pub abilities: IndexMap<String, AbilityEntry>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    #[serde(rename = "mod", default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<i32>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<HitPoints>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitPoints {
    pub value: i32,
    pub max: i32,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub system: ItemSystem,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSystem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_dice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_dice_used: Option<u32>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    /// Picks YAML for `.yaml`/`.yml` paths, JSON otherwise.
    pub fn from_path(path: &str) -> Self {
        let lowered = path.to_lowercase();
        if lowered.ends_with(".yaml") || lowered.ends_with(".yml") {
            DocFormat::Yaml
        } else {
            DocFormat::Json
        }
    }
}

impl ActorDocument {
    pub fn parse(text: &str, format: DocFormat) -> Result<Self> {
        match format {
            DocFormat::Json => serde_json::from_str(text).context("failed to parse actor JSON"),
            DocFormat::Yaml => serde_yaml::from_str(text).context("failed to parse actor YAML"),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize actor")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize actor")
    }

    pub fn class_items(&self) -> impl Iterator<Item = &ItemDocument> {
        self.items.iter().filter(|i| i.kind == CLASS_ITEM_TYPE)
    }

    fn class_item_mut(&mut self, id: &str) -> Option<&mut ItemDocument> {
        self.items
            .iter_mut()
            .find(|i| i.kind == CLASS_ITEM_TYPE && i.id == id)
    }
}

impl ItemDocument {
    pub fn as_pool(&self) -> Result<ResourcePool, SurgeError> {
        let die = match self.system.hit_dice.as_deref() {
            Some(raw) => raw.parse::<DieDescriptor>()?,
            None => DEFAULT_HIT_DIE,
        };
        Ok(ResourcePool {
            id: self.id.clone(),
            name: self.name.clone(),
            total: self.system.levels.unwrap_or(1),
            used: self.system.hit_dice_used.unwrap_or(0),
            die,
        })
    }
}

impl ActorPort for ActorDocument {
    fn actor_name(&self) -> String {
        self.name.clone()
    }

    fn resource_pools(&self) -> Result<Vec<ResourcePool>, SurgeError> {
        let pools = self
            .class_items()
            .filter_map(|item| match item.as_pool() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(item = %item.name, "skipping class with unreadable hit die: {}", e);
                    None
                }
            })
            .collect();
        Ok(pools)
    }

    fn health(&self) -> Result<HealthPool, SurgeError> {
        self.system
            .attributes
            .hp
            .as_ref()
            .map(|hp| HealthPool::new(hp.value, hp.max))
            .ok_or_else(|| SurgeError::MissingData(format!("{} has no hit point data", self.name)))
    }

    fn constitution_mod(&self) -> i32 {
        self.system
            .abilities
            .get("con")
            .and_then(|con| con.modifier.or(con.value.map(ability_mod)))
            .unwrap_or(0)
    }

    fn apply_health(&mut self, value: i32) -> Result<(), SurgeError> {
        let name = self.name.clone();
        let hp = self
            .system
            .attributes
            .hp
            .as_mut()
            .ok_or_else(|| SurgeError::MissingData(format!("{} has no hit point data", name)))?;
        if value < 0 || value > hp.max {
            return Err(SurgeError::StoreWrite(format!(
                "hit points {} outside 0..={}",
                value, hp.max
            )));
        }
        debug!(actor = %name, from = hp.value, to = value, "system.attributes.hp.value");
        hp.value = value;
        Ok(())
    }

    fn mark_resource_spent(&mut self, pool_id: &str, count: u32) -> Result<(), SurgeError> {
        let item = self
            .class_item_mut(pool_id)
            .ok_or_else(|| SurgeError::MissingData(format!("class '{}' not found", pool_id)))?;
        let total = item.system.levels.unwrap_or(1);
        let used = item.system.hit_dice_used.unwrap_or(0);
        let next = used.saturating_add(count);
        if next > total {
            return Err(SurgeError::StoreWrite(format!(
                "{} would use {} of {} hit dice",
                item.name, next, total
            )));
        }
        debug!(item = %item.name, from = used, to = next, "system.hitDiceUsed");
        item.system.hit_dice_used = Some(next);
        Ok(())
    }
}
