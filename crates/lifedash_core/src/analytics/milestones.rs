//! Target-date countdowns for learning goals and career milestones.

use crate::analytics::time_block::days_until;
use serde::{Deserialize, Serialize};

/// What a target date reads like relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "days", rename_all = "snake_case")]
pub enum TargetCountdown {
    Remaining(i64),
    DueToday,
    Overdue(i64),
}

/// Buckets `days_until(target_ms, as_of_ms)`; overdue days are positive.
pub fn target_countdown(target_ms: i64, as_of_ms: i64) -> TargetCountdown {
    match days_until(target_ms, as_of_ms) {
        days if days > 0 => TargetCountdown::Remaining(days),
        0 => TargetCountdown::DueToday,
        days => TargetCountdown::Overdue(days.saturating_neg()),
    }
}

/// Dated goal that can be ticked off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    /// Unix epoch milliseconds; `None` for open-ended goals.
    #[serde(default)]
    pub target_ms: Option<i64>,
    #[serde(default)]
    pub completed: bool,
}

impl Milestone {
    pub fn new(title: impl Into<String>, target_ms: Option<i64>) -> Self {
        Self {
            title: title.into(),
            target_ms,
            completed: false,
        }
    }

    /// Countdown shown under an open milestone; completed or undated ones
    /// show none.
    pub fn countdown(&self, as_of_ms: i64) -> Option<TargetCountdown> {
        if self.completed {
            return None;
        }
        self.target_ms
            .map(|target_ms| target_countdown(target_ms, as_of_ms))
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Share of milestones ticked off, rounded to a whole percent; 0 when empty.
pub fn milestone_completion(milestones: &[Milestone]) -> u8 {
    let total = milestones.len();
    if total == 0 {
        return 0;
    }
    let done = milestones.iter().filter(|milestone| milestone.completed).count();
    let percent = (done * 200 + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}
