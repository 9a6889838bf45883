//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard use-cases to Dart via FRB.
//! - Flatten core enums and errors into string-typed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Enum values cross the boundary as their stable lowercase ids.
//! - Session state lives in an opaque `DashboardSession`, never in globals.
//!
//! # See also
//! - `lifedash_core::logging`

use lifedash_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, level_for,
    parse_domain, parse_priority, ping as ping_inner, progress_for, summarize, AnalyticsConfig,
    AnalyticsSummary, DashboardConfig, DashboardService, DeadlineUrgency, Skill,
    SkillTreeService, TimeBlock, TimeBlockDraft, XpNotification,
};
use log::warn;
use uuid::Uuid;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Level reached with `total_xp` on the flat 100-XP curve.
#[flutter_rust_bridge::frb(sync)]
pub fn xp_level_for(total_xp: u64) -> u64 {
    level_for(total_xp)
}

/// Time block as entered in the planner form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBlockInput {
    /// Existing id for edits; `None` creates a new id.
    pub block_id: Option<String>,
    pub title: String,
    pub domain: String,
    /// `goal|project|habit|event`.
    pub kind: String,
    pub priority: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub progress: i64,
    pub description: Option<String>,
    pub estimated_hours: Option<String>,
}

/// Toast-ready XP notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub title: String,
    pub description: String,
    pub level_up: bool,
}

/// Response envelope for XP awards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAwardResponse {
    pub ok: bool,
    pub message: String,
    pub level: u64,
    pub xp_progress: u64,
    pub notifications: Vec<NotificationItem>,
}

/// One XP bar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainXpItem {
    pub domain: String,
    pub label: String,
    pub color: String,
    pub total: u64,
    pub level: u64,
    pub xp_progress: u64,
}

/// Generic action envelope for planner edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockActionResponse {
    pub ok: bool,
    pub block_id: Option<String>,
    pub message: String,
}

impl BlockActionResponse {
    fn success(message: impl Into<String>, block_id: String) -> Self {
        Self {
            ok: true,
            block_id: Some(block_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            block_id: None,
            message: message.into(),
        }
    }
}

/// Skill node as shipped by the host's skill catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillInput {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub max_level: u32,
    pub xp_required: u64,
    pub prerequisites: Vec<String>,
    pub description: String,
    pub benefits: Vec<String>,
}

/// One skill card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillItem {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub level: u32,
    pub max_level: u32,
    pub unlocked: bool,
    pub can_unlock: bool,
    pub can_level_up: bool,
    pub xp: u64,
    pub xp_required: u64,
    pub xp_percent: u8,
}

/// Action envelope for skill tree edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillActionResponse {
    pub ok: bool,
    pub message: String,
    pub skill_id: String,
    pub level: u32,
    pub xp: u64,
}

/// One chart bar / pie slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountItem {
    pub key: String,
    pub label: String,
    pub count: u32,
}

/// One upcoming deadline row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineItem {
    pub block_id: String,
    pub title: String,
    pub domain: String,
    pub progress: u8,
    pub days_until: i64,
    /// `today|urgent|soon|later`.
    pub urgency: String,
}

/// Analytics view envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResponse {
    pub ok: bool,
    pub message: String,
    pub total_blocks: u32,
    pub completed_blocks: u32,
    pub avg_progress: u8,
    pub total_estimated_hours: f64,
    pub domain_counts: Vec<CountItem>,
    pub type_counts: Vec<CountItem>,
    pub priority_counts: Vec<CountItem>,
    pub upcoming: Vec<DeadlineItem>,
}

/// Computes analytics for a caller-held block list.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Any invalid block fails the whole call with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn analytics_summary(blocks: Vec<TimeBlockInput>, as_of_ms: i64) -> AnalyticsResponse {
    let parsed = blocks
        .into_iter()
        .map(parse_block_input)
        .collect::<Result<Vec<_>, _>>();
    match parsed {
        Ok(records) => to_analytics_response(
            &summarize(&records, as_of_ms, &AnalyticsConfig::default()),
        ),
        Err(err) => AnalyticsResponse::failure(format!("analytics_summary failed: {err}")),
    }
}

/// Opaque per-session dashboard state held by the UI.
#[flutter_rust_bridge::frb(opaque)]
pub struct DashboardSession {
    inner: DashboardService,
}

impl DashboardSession {
    /// Creates an empty session with default analytics settings.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new() -> Self {
        Self {
            inner: DashboardService::new(&DashboardConfig::default()),
        }
    }

    /// Awards XP to one domain.
    ///
    /// # FFI contract
    /// - Unknown domains and zero amounts return `ok=false`; state is unchanged.
    #[flutter_rust_bridge::frb(sync)]
    pub fn award_xp(&mut self, domain: String, amount: u64, reason: String) -> XpAwardResponse {
        let domain = match parse_domain(&domain) {
            Ok(domain) => domain,
            Err(err) => return XpAwardResponse::failure(format!("award_xp failed: {err}")),
        };
        match self.inner.award_xp(domain, amount, reason) {
            Ok(award) => XpAwardResponse {
                ok: true,
                message: format!("+{} XP", award.amount),
                level: award.new_level,
                xp_progress: progress_for(award.new_total),
                notifications: self
                    .inner
                    .drain_notifications()
                    .iter()
                    .map(to_notification_item)
                    .collect(),
            },
            Err(err) => XpAwardResponse::failure(format!("award_xp failed: {err}")),
        }
    }

    /// XP bar rows for every domain.
    #[flutter_rust_bridge::frb(sync)]
    pub fn domain_xp(&self) -> Vec<DomainXpItem> {
        self.inner
            .domain_xp()
            .into_iter()
            .map(|row| DomainXpItem {
                domain: row.domain.as_str().to_string(),
                label: row.domain.label().to_string(),
                color: row.domain.color().to_string(),
                total: row.total,
                level: row.level,
                xp_progress: row.progress,
            })
            .collect()
    }

    /// Adds a block, or replaces it when `block_id` names a stored block.
    #[flutter_rust_bridge::frb(sync)]
    pub fn save_time_block(&mut self, input: TimeBlockInput) -> BlockActionResponse {
        let block = match parse_block_input(input) {
            Ok(block) => block,
            Err(err) => return BlockActionResponse::failure(format!("save failed: {err}")),
        };
        let block_id = block.id.to_string();
        let planner = self.inner.planner_mut();
        let result = if planner.get_block(block.id).is_some() {
            planner.replace_block(block).map(|()| "Time block updated.")
        } else {
            planner.add_block(block).map(|_| "Time block added.")
        };
        match result {
            Ok(message) => BlockActionResponse::success(message, block_id),
            Err(err) => BlockActionResponse::failure(format!("save failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn update_time_block_progress(
        &mut self,
        block_id: String,
        progress: u8,
    ) -> BlockActionResponse {
        let id = match parse_block_id(&block_id) {
            Ok(id) => id,
            Err(message) => return BlockActionResponse::failure(message),
        };
        match self.inner.planner_mut().update_progress(id, progress) {
            Ok(()) => BlockActionResponse::success("Progress updated.", block_id),
            Err(err) => BlockActionResponse::failure(format!("update failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn update_time_block_priority(
        &mut self,
        block_id: String,
        priority: String,
    ) -> BlockActionResponse {
        let id = match parse_block_id(&block_id) {
            Ok(id) => id,
            Err(message) => return BlockActionResponse::failure(message),
        };
        let priority = match parse_priority(&priority) {
            Ok(priority) => priority,
            Err(err) => return BlockActionResponse::failure(format!("update failed: {err}")),
        };
        match self.inner.planner_mut().update_priority(id, priority) {
            Ok(()) => BlockActionResponse::success("Priority updated.", block_id),
            Err(err) => BlockActionResponse::failure(format!("update failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn remove_time_block(&mut self, block_id: String) -> BlockActionResponse {
        let id = match parse_block_id(&block_id) {
            Ok(id) => id,
            Err(message) => return BlockActionResponse::failure(message),
        };
        match self.inner.planner_mut().remove_block(id) {
            Ok(_) => BlockActionResponse::success("Time block removed.", block_id),
            Err(err) => BlockActionResponse::failure(format!("remove failed: {err}")),
        }
    }

    /// Replaces the session's skill tree.
    ///
    /// # FFI contract
    /// - Unknown domains, duplicate ids or dangling prerequisites reject the
    ///   whole catalog; the previous tree stays in place.
    #[flutter_rust_bridge::frb(sync)]
    pub fn load_skills(&mut self, skills: Vec<SkillInput>) -> SkillActionResponse {
        let tree = skills
            .into_iter()
            .map(parse_skill_input)
            .collect::<Result<Vec<_>, _>>()
            .and_then(|skills| SkillTreeService::new(skills).map_err(|err| err.to_string()));
        match tree {
            Ok(tree) => {
                let count = tree.skills().len();
                self.inner.replace_skill_tree(tree);
                SkillActionResponse::success(format!("{count} skill(s) loaded."), "", 0, 0)
            }
            Err(err) => SkillActionResponse::failure(format!("load_skills failed: {err}"), ""),
        }
    }

    /// Skill cards in tree order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn skills(&self) -> Vec<SkillItem> {
        let tree = self.inner.skill_tree();
        tree.skills()
            .iter()
            .map(|skill| SkillItem {
                id: skill.id.clone(),
                name: skill.name.clone(),
                domain: skill.domain.as_str().to_string(),
                level: skill.level,
                max_level: skill.max_level,
                unlocked: skill.unlocked,
                can_unlock: tree.can_unlock(&skill.id).unwrap_or(false),
                can_level_up: skill.can_level_up(),
                xp: skill.xp,
                xp_required: skill.xp_required,
                xp_percent: skill.xp_percent(),
            })
            .collect()
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn unlock_skill(&mut self, skill_id: String) -> SkillActionResponse {
        let tree = self.inner.skill_tree_mut();
        match tree.unlock(&skill_id) {
            Ok(()) => {
                let (level, xp) = tree
                    .get(&skill_id)
                    .map_or((0, 0), |skill| (skill.level, skill.xp));
                SkillActionResponse::success("Skill unlocked.", &skill_id, level, xp)
            }
            Err(err) => SkillActionResponse::failure(format!("unlock failed: {err}"), &skill_id),
        }
    }

    /// Banks XP into an unlocked skill; zero amounts are rejected.
    #[flutter_rust_bridge::frb(sync)]
    pub fn add_skill_xp(&mut self, skill_id: String, amount: u64) -> SkillActionResponse {
        let tree = self.inner.skill_tree_mut();
        match tree.add_xp(&skill_id, amount) {
            Ok(xp) => {
                let level = tree.get(&skill_id).map_or(0, |skill| skill.level);
                SkillActionResponse::success(format!("+{amount} XP"), &skill_id, level, xp)
            }
            Err(err) => SkillActionResponse::failure(format!("add_xp failed: {err}"), &skill_id),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn level_up_skill(&mut self, skill_id: String) -> SkillActionResponse {
        match self.inner.skill_tree_mut().level_up(&skill_id) {
            Ok(level_up) => SkillActionResponse::success(
                format!("Reached level {}.", level_up.new_level),
                &skill_id,
                level_up.new_level,
                level_up.carried_xp,
            ),
            Err(err) => {
                SkillActionResponse::failure(format!("level_up failed: {err}"), &skill_id)
            }
        }
    }

    /// Analytics over the session's planner as seen at `as_of_ms`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn summary(&self, as_of_ms: i64) -> AnalyticsResponse {
        to_analytics_response(&self.inner.summary(as_of_ms))
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl XpAwardResponse {
    fn failure(message: String) -> Self {
        warn!("event=ffi_award_rejected module=ffi status=error");
        Self {
            ok: false,
            message,
            level: 0,
            xp_progress: 0,
            notifications: Vec::new(),
        }
    }
}

impl SkillActionResponse {
    fn success(message: impl Into<String>, skill_id: &str, level: u32, xp: u64) -> Self {
        Self {
            ok: true,
            message: message.into(),
            skill_id: skill_id.to_string(),
            level,
            xp,
        }
    }

    fn failure(message: String, skill_id: &str) -> Self {
        warn!("event=ffi_skill_rejected module=ffi status=error");
        Self {
            ok: false,
            message,
            skill_id: skill_id.to_string(),
            level: 0,
            xp: 0,
        }
    }
}

impl AnalyticsResponse {
    fn failure(message: String) -> Self {
        Self {
            ok: false,
            message,
            total_blocks: 0,
            completed_blocks: 0,
            avg_progress: 0,
            total_estimated_hours: 0.0,
            domain_counts: Vec::new(),
            type_counts: Vec::new(),
            priority_counts: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

fn parse_block_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid block_id `{raw}`: {err}"))
}

fn parse_block_input(input: TimeBlockInput) -> Result<TimeBlock, String> {
    let id = match input.block_id.as_deref() {
        Some(raw) => Some(parse_block_id(raw)?),
        None => None,
    };
    let draft = TimeBlockDraft {
        title: input.title,
        domain: input.domain,
        kind: input.kind,
        priority: input.priority,
        start_ms: input.start_ms,
        end_ms: input.end_ms,
        progress: input.progress,
        description: input.description,
        estimated_hours: input.estimated_hours,
    };
    let parsed = match id {
        Some(id) => draft.into_block_with_id(id),
        None => draft.into_block(),
    };
    parsed.map_err(|err| err.to_string())
}

fn parse_skill_input(input: SkillInput) -> Result<Skill, String> {
    let domain = parse_domain(&input.domain).map_err(|err| err.to_string())?;
    let mut skill = Skill::new(input.id, input.name, domain, input.max_level, input.xp_required)
        .with_prerequisites(input.prerequisites);
    skill.description = input.description;
    skill.benefits = input.benefits;
    Ok(skill)
}

fn to_notification_item(notification: &XpNotification) -> NotificationItem {
    NotificationItem {
        title: notification.title(),
        description: notification.description(),
        level_up: matches!(notification, XpNotification::LevelUp { .. }),
    }
}

fn count_items<K: Copy>(
    counts: &[(K, usize)],
    key: impl Fn(K) -> &'static str,
    label: impl Fn(K) -> &'static str,
) -> Vec<CountItem> {
    counts
        .iter()
        .map(|&(value, count)| CountItem {
            key: key(value).to_string(),
            label: label(value).to_string(),
            count: saturating_u32(count),
        })
        .collect()
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn urgency_label(urgency: DeadlineUrgency) -> &'static str {
    match urgency {
        DeadlineUrgency::Today => "today",
        DeadlineUrgency::Urgent => "urgent",
        DeadlineUrgency::Soon => "soon",
        DeadlineUrgency::Later => "later",
    }
}

fn to_analytics_response(summary: &AnalyticsSummary) -> AnalyticsResponse {
    AnalyticsResponse {
        ok: true,
        message: format!("{} block(s).", summary.stats.total_blocks),
        total_blocks: saturating_u32(summary.stats.total_blocks),
        completed_blocks: saturating_u32(summary.stats.completed_blocks),
        avg_progress: summary.stats.avg_progress,
        total_estimated_hours: summary.stats.total_estimated_hours,
        domain_counts: count_items(
            &summary.domain_distribution,
            |domain| domain.as_str(),
            |domain| domain.label(),
        ),
        type_counts: count_items(
            &summary.type_distribution,
            |kind| kind.as_str(),
            |kind| kind.label(),
        ),
        priority_counts: count_items(
            &summary.priority_distribution,
            |priority| priority.as_str(),
            |priority| priority.label(),
        ),
        upcoming: summary
            .upcoming
            .iter()
            .map(|row| DeadlineItem {
                block_id: row.block.id.to_string(),
                title: row.block.title.clone(),
                domain: row.block.domain.as_str().to_string(),
                progress: row.block.progress,
                days_until: row.days_until,
                urgency: urgency_label(row.urgency).to_string(),
            })
            .collect(),
    }
}
