use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::ChatCard;
use crate::content::builtin_actors;
use crate::document::{ActorDocument, DocFormat};
use crate::ports::{ChatLog, Notice, NoticeLog, PresetDialog};
use crate::surge::{healing_surge, SurgeOutcome};
use crate::Dice;

fn default_count() -> i32 {
    1
}

/// A whole surge described up front, for hosts that cannot answer a dialog
/// interactively. At most one of `actor`, `actor_id` and `actor_path` is
/// used, in that order; with none of them the surge has no selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SurgeConfig {
    #[serde(default)]
    pub actor: Option<ActorDocument>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub actor_path: Option<String>,
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default = "default_count")]
    pub count: i32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub cancel: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SurgeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SurgeOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub notices: Vec<Notice>,
    pub chat: Vec<ChatCard>,
    /// The actor after the surge, writes included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorDocument>,
}

pub fn run_surge(cfg: SurgeConfig) -> Result<SurgeReport> {
    let mut actor = load_actor(&cfg)?;
    let mut dialog = if cfg.cancel {
        PresetDialog::cancelled()
    } else {
        PresetDialog::new(cfg.class_id.clone(), cfg.count)
    };
    let mut notices = NoticeLog::default();
    let mut chat = ChatLog::default();
    let mut dice = Dice::from_seed(cfg.seed);

    let res = healing_surge(
        actor.as_mut(),
        &mut dialog,
        &mut notices,
        &mut chat,
        |faces| dice.die(faces),
    );

    let (outcome, error) = match res {
        Ok(outcome) => (Some(outcome), None),
        Err(e) => (None, Some(e.to_string())),
    };
    Ok(SurgeReport {
        outcome,
        error,
        notices: notices.notices,
        chat: chat.cards,
        actor,
    })
}

pub fn load_actor(cfg: &SurgeConfig) -> Result<Option<ActorDocument>> {
    if let Some(actor) = &cfg.actor {
        return Ok(Some(actor.clone()));
    }
    if let Some(id) = &cfg.actor_id {
        return builtin_actor(id).map(Some);
    }
    if let Some(path) = &cfg.actor_path {
        return load_actor_file(path).map(Some);
    }
    Ok(None)
}

pub fn builtin_actor(id: &str) -> Result<ActorDocument> {
    let text = builtin_actors()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("built-in actor '{}' not found", id))?;
    ActorDocument::parse(text, DocFormat::Json)
        .with_context(|| format!("built-in actor '{}' is malformed", id))
}

fn load_actor_file(path: &str) -> Result<ActorDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read actor file: {}", path))?;
    ActorDocument::parse(&text, DocFormat::from_path(path))
        .with_context(|| format!("failed to load actor file: {}", path))
}
