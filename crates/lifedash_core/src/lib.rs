//! Core domain logic for the life dashboard.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod xp;

pub use analytics::finance::{
    budget_overview, expense_totals, same_utc_month, Budget, BudgetOverview, BudgetStatus,
    Expense, ExpenseTotals, FinanceError, FinanceResult, BUDGET_OVER_PERCENT,
    BUDGET_WARNING_PERCENT,
};
pub use analytics::milestones::{milestone_completion, target_countdown, Milestone, TargetCountdown};
pub use analytics::time_block::{
    blocks_for_instant, blocks_in_quarter, days_until, deadline_urgency, distribution_by,
    domain_distribution, domain_progress, priority_distribution, progress_stats,
    quarter_bounds_ms, summarize, type_distribution, upcoming_deadline_views,
    upcoming_deadlines, AnalyticsError, AnalyticsSummary, DeadlineUrgency, DomainProgress,
    ProgressStats, UpcomingDeadline, DAY_MS,
};
pub use analytics::wellbeing::{
    average_mood, average_satisfaction, parse_tags, satisfaction_level, Mood, MoodEntry,
    SatisfactionArea, SatisfactionLevel, WellbeingError, WellbeingResult, MAX_SATISFACTION_SCORE,
};
pub use config::{AnalyticsConfig, ConfigError, DashboardConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_with_config, logging_status, LoggingError,
    LoggingResult,
};
pub use model::domain::{
    parse_block_type, parse_domain, parse_priority, BlockType, ClassificationError, Domain,
    Priority,
};
pub use model::skill::{Skill, SKILL_XP_STEP};
pub use model::time_block::{TimeBlock, TimeBlockDraft, TimeBlockId, TimeBlockValidationError};
pub use service::dashboard_service::DashboardService;
pub use service::planner_service::{PlannerError, PlannerResult, PlannerService};
pub use service::skill_tree_service::{
    SkillLevelUp, SkillTreeError, SkillTreeResult, SkillTreeService,
};
pub use xp::ledger::{level_for, progress_for, DomainXp, XpAward, XpError, XpLedger, XP_PER_LEVEL};
pub use xp::notification::{XpListener, XpNotification, XpNotificationLog};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
