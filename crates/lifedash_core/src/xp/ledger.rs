//! Per-domain experience ledger.
//!
//! # Responsibility
//! - Hold XP totals for every life domain within one session.
//! - Derive level and in-level progress from raw totals.
//!
//! # Invariants
//! - Totals only increase; there is no decrement path.
//! - Level is never stored, always `total / XP_PER_LEVEL`.
//! - Totals saturate at `u64::MAX` instead of wrapping.

use crate::model::domain::Domain;
use crate::xp::notification::{XpListener, XpNotification};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Flat leveling threshold; every level costs the same.
pub const XP_PER_LEVEL: u64 = 100;

/// Level reached with `total` XP.
pub fn level_for(total: u64) -> u64 {
    total / XP_PER_LEVEL
}

/// XP accumulated toward the next level, in `0..XP_PER_LEVEL`.
pub fn progress_for(total: u64) -> u64 {
    total % XP_PER_LEVEL
}

/// Errors from XP ledger mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpError {
    /// Awards must be strictly positive.
    NonPositiveAmount(Domain),
}

impl Display for XpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(domain) => {
                write!(f, "xp award for `{domain}` must be a positive amount")
            }
        }
    }
}

impl Error for XpError {}

/// Outcome of one successful award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub domain: Domain,
    pub amount: u64,
    /// Free-form user action text, shown in notifications only.
    pub reason: String,
    pub previous_total: u64,
    pub new_total: u64,
    pub previous_level: u64,
    pub new_level: u64,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }

    /// Notifications to surface for this award, gain first.
    pub fn notifications(&self) -> Vec<XpNotification> {
        let mut notifications = vec![XpNotification::XpGained {
            domain: self.domain,
            amount: self.amount,
            reason: self.reason.clone(),
        }];
        if self.leveled_up() {
            notifications.push(XpNotification::LevelUp {
                domain: self.domain,
                level: self.new_level,
            });
        }
        notifications
    }
}

/// Read model for one domain's XP bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainXp {
    pub domain: Domain,
    pub total: u64,
    pub level: u64,
    pub progress: u64,
}

/// Session-owned XP totals for all six domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpLedger {
    totals: [u64; Domain::ALL.len()],
}

impl XpLedger {
    /// Creates a ledger with every domain at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` XP to `domain`.
    ///
    /// # Errors
    /// - `NonPositiveAmount` when `amount == 0`.
    pub fn award_xp(
        &mut self,
        domain: Domain,
        amount: u64,
        reason: impl Into<String>,
    ) -> Result<XpAward, XpError> {
        if amount == 0 {
            return Err(XpError::NonPositiveAmount(domain));
        }

        let slot = &mut self.totals[domain.index()];
        let previous_total = *slot;
        let new_total = previous_total.saturating_add(amount);
        *slot = new_total;

        let award = XpAward {
            domain,
            amount,
            reason: reason.into(),
            previous_total,
            new_total,
            previous_level: level_for(previous_total),
            new_level: level_for(new_total),
        };

        debug!(
            "event=xp_awarded module=xp status=ok domain={} amount={} total={}",
            domain, amount, new_total
        );
        if award.leveled_up() {
            info!(
                "event=level_up module=xp status=ok domain={} level={}",
                domain, award.new_level
            );
        }

        Ok(award)
    }

    /// Same as [`XpLedger::award_xp`], then forwards the award's
    /// notifications to `listener` in order.
    pub fn award_xp_with<L: XpListener + ?Sized>(
        &mut self,
        listener: &mut L,
        domain: Domain,
        amount: u64,
        reason: impl Into<String>,
    ) -> Result<XpAward, XpError> {
        let award = self.award_xp(domain, amount, reason)?;
        for notification in award.notifications() {
            listener.notify(&notification);
        }
        Ok(award)
    }

    pub fn total_xp(&self, domain: Domain) -> u64 {
        self.totals[domain.index()]
    }

    pub fn level(&self, domain: Domain) -> u64 {
        level_for(self.total_xp(domain))
    }

    pub fn xp_progress(&self, domain: Domain) -> u64 {
        progress_for(self.total_xp(domain))
    }

    /// Sum of levels across all domains.
    pub fn overall_level(&self) -> u64 {
        Domain::ALL
            .into_iter()
            .map(|domain| self.level(domain))
            .fold(0u64, u64::saturating_add)
    }

    /// XP bar rows for every domain in canonical order.
    pub fn snapshot(&self) -> Vec<DomainXp> {
        Domain::ALL
            .into_iter()
            .map(|domain| DomainXp {
                domain,
                total: self.total_xp(domain),
                level: self.level(domain),
                progress: self.xp_progress(domain),
            })
            .collect()
    }
}
