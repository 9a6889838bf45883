//! Life domain and time-block classification enums.
//!
//! # Responsibility
//! - Define the closed sets used as partition keys across the dashboard.
//! - Parse raw form/UI strings into typed values at the boundary.
//!
//! # Invariants
//! - Wire ids are stable lowercase strings and never renamed.
//! - Parsing trims input but is otherwise case-sensitive, like wire ids.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the six fixed life-tracking categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Financial,
    Work,
    Brain,
    Physique,
    Mind,
    Soul,
}

impl Domain {
    /// All domains in canonical dashboard order.
    pub const ALL: [Domain; 6] = [
        Domain::Financial,
        Domain::Work,
        Domain::Brain,
        Domain::Physique,
        Domain::Mind,
        Domain::Soul,
    ];

    /// Stable string id used by wire payloads and form values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Work => "work",
            Self::Brain => "brain",
            Self::Physique => "physique",
            Self::Mind => "mind",
            Self::Soul => "soul",
        }
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Financial => "Financial",
            Self::Work => "Work",
            Self::Brain => "Brain",
            Self::Physique => "Physique",
            Self::Mind => "Mind",
            Self::Soul => "Soul",
        }
    }

    /// Accent color used for charts and XP bars.
    pub fn color(self) -> &'static str {
        match self {
            Self::Financial => "#2e7d32",
            Self::Work => "#1565c0",
            Self::Brain => "#6a1b9a",
            Self::Physique => "#d84315",
            Self::Mind => "#00838f",
            Self::Soul => "#f9a825",
        }
    }

    /// Position in [`Domain::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a scheduled time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Goal,
    Project,
    Habit,
    Event,
}

impl BlockType {
    pub const ALL: [BlockType; 4] = [
        BlockType::Goal,
        BlockType::Project,
        BlockType::Habit,
        BlockType::Event,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Project => "project",
            Self::Habit => "habit",
            Self::Event => "event",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Goal => "Goal",
            Self::Project => "Project",
            Self::Habit => "Habit",
            Self::Event => "Event",
        }
    }
}

impl Display for BlockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a scheduled time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Badge color for priority breakdowns.
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#dc2626",
            Self::Medium => "#ea580c",
            Self::Low => "#16a34a",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing classification strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// Input was blank after trim.
    Empty(&'static str),
    UnknownDomain(String),
    UnknownBlockType(String),
    UnknownPriority(String),
}

impl Display for ClassificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(field) => write!(f, "{field} must not be empty"),
            Self::UnknownDomain(value) => write!(
                f,
                "unknown domain `{value}`; expected financial|work|brain|physique|mind|soul"
            ),
            Self::UnknownBlockType(value) => write!(
                f,
                "unknown block type `{value}`; expected goal|project|habit|event"
            ),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected low|medium|high")
            }
        }
    }
}

impl Error for ClassificationError {}

/// Parses a domain id such as `"financial"`.
pub fn parse_domain(value: &str) -> Result<Domain, ClassificationError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ClassificationError::Empty("domain"));
    }
    Domain::ALL
        .into_iter()
        .find(|domain| domain.as_str() == normalized)
        .ok_or_else(|| ClassificationError::UnknownDomain(normalized.to_string()))
}

/// Parses a block type id such as `"habit"`.
pub fn parse_block_type(value: &str) -> Result<BlockType, ClassificationError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ClassificationError::Empty("type"));
    }
    BlockType::ALL
        .into_iter()
        .find(|kind| kind.as_str() == normalized)
        .ok_or_else(|| ClassificationError::UnknownBlockType(normalized.to_string()))
}

/// Parses a priority id such as `"high"`.
pub fn parse_priority(value: &str) -> Result<Priority, ClassificationError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ClassificationError::Empty("priority"));
    }
    Priority::ALL
        .into_iter()
        .find(|priority| priority.as_str() == normalized)
        .ok_or_else(|| ClassificationError::UnknownPriority(normalized.to_string()))
}
