//! Skill tree use-case service.
//!
//! # Responsibility
//! - Gate skill unlocks on prerequisites.
//! - Bank XP into unlocked skills and apply level-ups.
//! - Provide totals for the skill tree overview cards.
//!
//! # Invariants
//! - Skill ids are unique and every prerequisite names a known skill.
//! - A skill unlocks only when every prerequisite has `level > 0`.
//! - Level-up consumes `xp_required` XP and raises the next requirement by
//!   `new_level * SKILL_XP_STEP`.

use crate::model::domain::Domain;
use crate::model::skill::{Skill, SKILL_XP_STEP};
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SkillTreeResult<T> = Result<T, SkillTreeError>;

/// Errors from skill tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillTreeError {
    NotFound(String),
    DuplicateId(String),
    /// A prerequisite refers to a skill that is not in the tree.
    UnknownPrerequisite { skill_id: String, prerequisite: String },
    AlreadyUnlocked(String),
    PrerequisitesNotMet(String),
    /// Skill must be unlocked first.
    Locked(String),
    MaxLevelReached(String),
    InsufficientXp { skill_id: String, xp: u64, required: u64 },
    NonPositiveXp(String),
}

impl Display for SkillTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "skill not found: {id}"),
            Self::DuplicateId(id) => write!(f, "skill id is duplicated: {id}"),
            Self::UnknownPrerequisite {
                skill_id,
                prerequisite,
            } => write!(f, "skill {skill_id} requires unknown skill {prerequisite}"),
            Self::AlreadyUnlocked(id) => write!(f, "skill already unlocked: {id}"),
            Self::PrerequisitesNotMet(id) => write!(f, "skill prerequisites not met: {id}"),
            Self::Locked(id) => write!(f, "skill is locked: {id}"),
            Self::MaxLevelReached(id) => write!(f, "skill is at max level: {id}"),
            Self::InsufficientXp {
                skill_id,
                xp,
                required,
            } => write!(f, "skill {skill_id} has {xp} xp, needs {required}"),
            Self::NonPositiveXp(id) => write!(f, "xp added to {id} must be positive"),
        }
    }
}

impl Error for SkillTreeError {}

/// Result of a successful level-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLevelUp {
    pub skill_id: String,
    pub new_level: u32,
    pub carried_xp: u64,
    pub next_xp_required: u64,
}

/// Session-owned skill tree.
#[derive(Debug, Clone, Default)]
pub struct SkillTreeService {
    skills: Vec<Skill>,
}

impl SkillTreeService {
    /// Builds a tree after checking id uniqueness and prerequisite links.
    pub fn new(skills: Vec<Skill>) -> SkillTreeResult<Self> {
        let mut seen = HashSet::new();
        for skill in &skills {
            if !seen.insert(skill.id.as_str()) {
                return Err(SkillTreeError::DuplicateId(skill.id.clone()));
            }
        }
        for skill in &skills {
            if let Some(missing) = skill
                .prerequisites
                .iter()
                .find(|prerequisite| !seen.contains(prerequisite.as_str()))
            {
                return Err(SkillTreeError::UnknownPrerequisite {
                    skill_id: skill.id.clone(),
                    prerequisite: missing.clone(),
                });
            }
        }
        Ok(Self { skills })
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    /// Skills of one domain in tree order.
    pub fn by_domain(&self, domain: Domain) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|skill| skill.domain == domain)
            .collect()
    }

    /// Locked, with every prerequisite started (`level > 0`).
    pub fn can_unlock(&self, id: &str) -> SkillTreeResult<bool> {
        let skill = self.require(id)?;
        Ok(!skill.unlocked && self.prerequisites_met(skill))
    }

    pub fn unlock(&mut self, id: &str) -> SkillTreeResult<()> {
        let skill = self.require(id)?;
        if skill.unlocked {
            return Err(SkillTreeError::AlreadyUnlocked(id.to_string()));
        }
        if !self.prerequisites_met(skill) {
            return Err(SkillTreeError::PrerequisitesNotMet(id.to_string()));
        }
        self.require_mut(id)?.unlocked = true;
        info!("event=skill_unlocked module=skill_tree status=ok skill={id}");
        Ok(())
    }

    /// Banks `amount` XP into an unlocked skill; returns the new balance.
    pub fn add_xp(&mut self, id: &str, amount: u64) -> SkillTreeResult<u64> {
        if amount == 0 {
            return Err(SkillTreeError::NonPositiveXp(id.to_string()));
        }
        let skill = self.require_mut(id)?;
        if !skill.unlocked {
            return Err(SkillTreeError::Locked(id.to_string()));
        }
        skill.xp = skill.xp.saturating_add(amount);
        debug!(
            "event=skill_xp module=skill_tree status=ok skill={} amount={} xp={}",
            id, amount, skill.xp
        );
        Ok(skill.xp)
    }

    pub fn level_up(&mut self, id: &str) -> SkillTreeResult<SkillLevelUp> {
        let skill = self.require_mut(id)?;
        if !skill.unlocked {
            return Err(SkillTreeError::Locked(id.to_string()));
        }
        if skill.is_maxed() {
            return Err(SkillTreeError::MaxLevelReached(id.to_string()));
        }
        if skill.xp < skill.xp_required {
            return Err(SkillTreeError::InsufficientXp {
                skill_id: id.to_string(),
                xp: skill.xp,
                required: skill.xp_required,
            });
        }

        let new_level = skill.level + 1;
        skill.xp -= skill.xp_required;
        skill.xp_required = skill
            .xp_required
            .saturating_add(u64::from(new_level) * SKILL_XP_STEP);
        skill.level = new_level;

        info!("event=skill_level_up module=skill_tree status=ok skill={id} level={new_level}");
        Ok(SkillLevelUp {
            skill_id: id.to_string(),
            new_level,
            carried_xp: skill.xp,
            next_xp_required: skill.xp_required,
        })
    }

    pub fn total_level(&self) -> u64 {
        self.skills.iter().map(|skill| u64::from(skill.level)).sum()
    }

    pub fn total_xp(&self) -> u64 {
        self.skills
            .iter()
            .fold(0u64, |total, skill| total.saturating_add(skill.xp))
    }

    pub fn unlocked_count(&self) -> usize {
        self.skills.iter().filter(|skill| skill.unlocked).count()
    }

    fn prerequisites_met(&self, skill: &Skill) -> bool {
        skill.prerequisites.iter().all(|prerequisite| {
            self.get(prerequisite)
                .map(|required| required.level > 0)
                .unwrap_or(false)
        })
    }

    fn require(&self, id: &str) -> SkillTreeResult<&Skill> {
        self.get(id)
            .ok_or_else(|| SkillTreeError::NotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &str) -> SkillTreeResult<&mut Skill> {
        self.skills
            .iter_mut()
            .find(|skill| skill.id == id)
            .ok_or_else(|| SkillTreeError::NotFound(id.to_string()))
    }
}
