//! XP notification values and listener seam.
//!
//! The ledger never talks to a toast system directly; it hands these values
//! to whatever listener the caller provides.

use crate::model::domain::Domain;
use serde::{Deserialize, Serialize};

/// User-visible event produced by an XP award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum XpNotification {
    XpGained {
        domain: Domain,
        amount: u64,
        reason: String,
    },
    LevelUp {
        domain: Domain,
        level: u64,
    },
}

impl XpNotification {
    pub fn title(&self) -> String {
        match self {
            Self::XpGained { amount, .. } => format!("+{amount} XP"),
            Self::LevelUp { .. } => "Level Up!".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::XpGained { domain, reason, .. } => format!("{reason} in {}", domain.label()),
            Self::LevelUp { domain, level } => {
                format!("{} reached level {level}!", domain.label())
            }
        }
    }
}

/// Receives notifications emitted by [`crate::XpLedger::award_xp_with`].
pub trait XpListener {
    fn notify(&mut self, notification: &XpNotification);
}

/// Listener that keeps every notification in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XpNotificationLog {
    entries: Vec<XpNotification>,
}

impl XpNotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[XpNotification] {
        &self.entries
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&mut self) -> Vec<XpNotification> {
        std::mem::take(&mut self.entries)
    }
}

impl XpListener for XpNotificationLog {
    fn notify(&mut self, notification: &XpNotification) {
        self.entries.push(notification.clone());
    }
}
