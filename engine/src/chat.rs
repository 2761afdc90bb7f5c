use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::HealingResult;

/// The summary posted to chat after a surge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCard {
    pub speaker: String,
    pub formula: String,
    pub rolls: Vec<u32>,
    pub lines: Vec<String>,
}

impl ChatCard {
    pub fn for_surge(speaker: &str, result: &HealingResult) -> Self {
        let formula = result.formula();
        let dice = result
            .rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let lines = vec![
            format!(
                "{} uses a Healing Surge ({}× {} + {}× CON).",
                speaker, result.spend_count, result.die, result.spend_count
            ),
            format!("Roll: {} [{}]", formula, dice),
            format!(
                "Healing: {} → Applied: {}",
                result.raw_healing, result.applied_healing
            ),
            format!("HP: {} → {} / {}", result.before, result.after, result.max),
        ];
        Self {
            speaker: speaker.to_string(),
            formula,
            rolls: result.rolls.clone(),
            lines,
        }
    }
}

impl fmt::Display for ChatCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.speaker)?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
