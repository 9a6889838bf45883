//! Dashboard session facade.
//!
//! # Responsibility
//! - Bundle the state one dashboard session owns: XP ledger, planner,
//!   skill tree and pending notifications.
//! - Give UI/FFI layers one object to hold instead of loose parts.
//!
//! # Invariants
//! - Created empty at session start, dropped at session end.
//! - Notifications queue in award order until drained.

use crate::analytics::time_block::AnalyticsSummary;
use crate::config::DashboardConfig;
use crate::model::domain::Domain;
use crate::service::planner_service::PlannerService;
use crate::service::skill_tree_service::SkillTreeService;
use crate::xp::ledger::{DomainXp, XpAward, XpError, XpLedger};
use crate::xp::notification::{XpNotification, XpNotificationLog};

/// State owned by one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct DashboardService {
    ledger: XpLedger,
    planner: PlannerService,
    skills: SkillTreeService,
    notifications: XpNotificationLog,
}

impl DashboardService {
    /// Session with an empty skill tree.
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_skill_tree(config, SkillTreeService::default())
    }

    pub fn with_skill_tree(config: &DashboardConfig, skills: SkillTreeService) -> Self {
        Self {
            ledger: XpLedger::new(),
            planner: PlannerService::new(config.analytics),
            skills,
            notifications: XpNotificationLog::new(),
        }
    }

    /// Awards XP and queues the resulting notifications.
    pub fn award_xp(
        &mut self,
        domain: Domain,
        amount: u64,
        reason: impl Into<String>,
    ) -> Result<XpAward, XpError> {
        self.ledger
            .award_xp_with(&mut self.notifications, domain, amount, reason)
    }

    pub fn ledger(&self) -> &XpLedger {
        &self.ledger
    }

    pub fn domain_xp(&self) -> Vec<DomainXp> {
        self.ledger.snapshot()
    }

    pub fn planner(&self) -> &PlannerService {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut PlannerService {
        &mut self.planner
    }

    pub fn skill_tree(&self) -> &SkillTreeService {
        &self.skills
    }

    pub fn skill_tree_mut(&mut self) -> &mut SkillTreeService {
        &mut self.skills
    }

    /// Swaps in a freshly loaded tree; XP and planner state are untouched.
    pub fn replace_skill_tree(&mut self, skills: SkillTreeService) {
        self.skills = skills;
    }

    /// Returns queued notifications and clears the queue.
    pub fn drain_notifications(&mut self) -> Vec<XpNotification> {
        self.notifications.drain()
    }

    pub fn summary(&self, as_of_ms: i64) -> AnalyticsSummary {
        self.planner.summary(as_of_ms)
    }
}
