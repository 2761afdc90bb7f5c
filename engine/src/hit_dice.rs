use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurgeError;

/// Largest die a hit die string may name.
pub const MAX_FACES: u32 = i32::MAX as u32;

/// Hit die used when a class item does not record one.
pub const DEFAULT_HIT_DIE: DieDescriptor = DieDescriptor { faces: 8 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieDescriptor {
    pub faces: u32,
}

impl DieDescriptor {
    pub const fn new(faces: u32) -> Self {
        Self { faces }
    }
}

impl fmt::Display for DieDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces)
    }
}

/// Accepts `d8`, `D8`, `1d8` or a bare `8`.
impl FromStr for DieDescriptor {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let faces = match lowered.split_once('d') {
            Some(("", faces)) | Some(("1", faces)) => faces,
            Some(_) => {
                return Err(SurgeError::InvalidInput(format!(
                    "hit die must be a single die, got '{}'",
                    s
                )))
            }
            None => lowered.as_str(),
        };
        let faces: u32 = faces
            .parse()
            .map_err(|_| SurgeError::InvalidInput(format!("unreadable hit die '{}'", s)))?;
        if faces == 0 || faces > MAX_FACES {
            return Err(SurgeError::InvalidInput(format!(
                "hit die faces must be 1..={}, got {}",
                MAX_FACES, faces
            )));
        }
        Ok(Self { faces })
    }
}

/// One class's hit dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub id: String,
    pub name: String,
    /// Class levels; one hit die per level.
    pub total: u32,
    pub used: u32,
    pub die: DieDescriptor,
}

impl ResourcePool {
    pub fn available(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }

    /// `"Fighter (3/4 × d10)"`
    pub fn label(&self) -> String {
        format!(
            "{} ({}/{} × {})",
            self.name,
            self.available(),
            self.total,
            self.die
        )
    }
}

/// Formula shown to the player, e.g. `3d8 + 6` or `2d8 - 2`.
pub fn surge_formula(count: u32, die: DieDescriptor, bonus_total: i64) -> String {
    if bonus_total < 0 {
        format!("{}{} - {}", count, die, bonus_total.abs())
    } else {
        format!("{}{} + {}", count, die, bonus_total)
    }
}
