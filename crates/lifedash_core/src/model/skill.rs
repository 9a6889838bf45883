//! Skill tree node model.

use crate::model::domain::Domain;
use serde::{Deserialize, Serialize};

/// XP requirement added per level reached: `new_level * SKILL_XP_STEP`.
pub const SKILL_XP_STEP: u64 = 200;

/// One node in the per-domain skill tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Stable slug, e.g. `budgeting`.
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub level: u32,
    pub max_level: u32,
    pub unlocked: bool,
    /// Ids of skills that need `level > 0` before this one unlocks.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// XP banked toward the next level.
    pub xp: u64,
    pub xp_required: u64,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl Skill {
    /// Locked level-0 skill with the given first-level requirement.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        domain: Domain,
        max_level: u32,
        xp_required: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain,
            level: 0,
            max_level,
            unlocked: false,
            prerequisites: Vec::new(),
            description: String::new(),
            xp: 0,
            xp_required,
            benefits: Vec::new(),
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    pub fn can_level_up(&self) -> bool {
        self.unlocked && !self.is_maxed() && self.xp >= self.xp_required
    }

    /// Progress bar fill, rounded and clamped to `0..=100`.
    pub fn xp_percent(&self) -> u8 {
        if self.xp_required == 0 || self.xp >= self.xp_required {
            return 100;
        }
        // xp < xp_required here, so the quotient is at most 100.
        let scaled = (u128::from(self.xp) * 200 + u128::from(self.xp_required))
            / (2 * u128::from(self.xp_required));
        u8::try_from(scaled).unwrap_or(100)
    }
}
