//! Derived views over a snapshot of time blocks.
//!
//! # Responsibility
//! - Group blocks by domain, type or priority.
//! - Compute progress statistics and upcoming deadline lists.
//! - Slice blocks by calendar day and quarter for the planner views.
//!
//! # Invariants
//! - Every function here is pure; input slices are never mutated.
//! - Distribution output keeps first-occurrence order of keys.
//! - `days_until` uses ceiling division by whole days.

use crate::config::AnalyticsConfig;
use crate::model::domain::{BlockType, Domain, Priority};
use crate::model::time_block::TimeBlock;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Errors from calendar-window queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsError {
    InvalidQuarter(u32),
    YearOutOfRange(i32),
}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuarter(value) => write!(f, "quarter ({value}) must be within 1..=4"),
            Self::YearOutOfRange(value) => write!(f, "year ({value}) is out of calendar range"),
        }
    }
}

impl Error for AnalyticsError {}

/// Headline numbers for the analytics cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_blocks: usize,
    /// Blocks at exactly 100 percent.
    pub completed_blocks: usize,
    /// Rounded mean progress; 0 for an empty snapshot.
    pub avg_progress: u8,
    /// Absent estimates count as zero.
    pub total_estimated_hours: f64,
}

/// Badge bucket for an upcoming deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineUrgency {
    Today,
    /// Due within a week.
    Urgent,
    /// Due within two weeks.
    Soon,
    Later,
}

/// Buckets a non-negative day count.
pub fn deadline_urgency(days_until: i64) -> DeadlineUrgency {
    match days_until {
        i64::MIN..=0 => DeadlineUrgency::Today,
        1..=7 => DeadlineUrgency::Urgent,
        8..=14 => DeadlineUrgency::Soon,
        _ => DeadlineUrgency::Later,
    }
}

/// One row of the upcoming deadlines card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingDeadline {
    pub block: TimeBlock,
    pub days_until: i64,
    pub urgency: DeadlineUrgency,
}

/// Average progress for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainProgress {
    pub domain: Domain,
    pub block_count: usize,
    pub avg_progress: u8,
}

/// Everything the analytics view renders, computed in one pass per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub stats: ProgressStats,
    pub domain_distribution: Vec<(Domain, usize)>,
    pub type_distribution: Vec<(BlockType, usize)>,
    pub priority_distribution: Vec<(Priority, usize)>,
    pub domain_progress: Vec<DomainProgress>,
    pub upcoming: Vec<UpcomingDeadline>,
}

/// Counts blocks per extracted key, in first-occurrence order.
pub fn distribution_by<K, F>(records: &[TimeBlock], key_fn: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Copy,
    F: Fn(&TimeBlock) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for record in records {
        let key = key_fn(record);
        match positions.get(&key) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

pub fn domain_distribution(records: &[TimeBlock]) -> Vec<(Domain, usize)> {
    distribution_by(records, |block| block.domain)
}

pub fn type_distribution(records: &[TimeBlock]) -> Vec<(BlockType, usize)> {
    distribution_by(records, |block| block.kind)
}

pub fn priority_distribution(records: &[TimeBlock]) -> Vec<(Priority, usize)> {
    distribution_by(records, |block| block.priority)
}

pub fn progress_stats(records: &[TimeBlock]) -> ProgressStats {
    ProgressStats {
        total_blocks: records.len(),
        completed_blocks: records.iter().filter(|block| block.is_complete()).count(),
        avg_progress: rounded_mean_progress(records.iter()),
        total_estimated_hours: records
            .iter()
            .map(|block| block.estimated_hours.unwrap_or(0.0))
            .sum(),
    }
}

// Round-half-up on a non-negative mean, in integers: floor(sum/n + 1/2).
fn rounded_mean_progress<'a>(records: impl Iterator<Item = &'a TimeBlock>) -> u8 {
    let (sum, count) = records.fold((0u64, 0u64), |(sum, count), block| {
        (sum + u64::from(block.progress), count + 1)
    });
    if count == 0 {
        return 0;
    }
    let rounded = (2 * sum + count) / (2 * count);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

/// Whole days from `as_of_ms` until `end_ms`, rounded up.
///
/// Anything later today (up to 24h ahead) counts as 1; a deadline up to a
/// day in the past rounds up to 0.
pub fn days_until(end_ms: i64, as_of_ms: i64) -> i64 {
    let delta = end_ms.saturating_sub(as_of_ms);
    let days = delta.div_euclid(DAY_MS);
    if delta.rem_euclid(DAY_MS) == 0 {
        days
    } else {
        days + 1
    }
}

/// Incomplete blocks due within `window_days`, soonest first, at most `limit`.
pub fn upcoming_deadlines(
    records: &[TimeBlock],
    as_of_ms: i64,
    window_days: i64,
    limit: usize,
) -> Vec<&TimeBlock> {
    let mut upcoming: Vec<&TimeBlock> = records
        .iter()
        .filter(|block| {
            let days = days_until(block.end_ms, as_of_ms);
            (0..=window_days).contains(&days) && !block.is_complete()
        })
        .collect();
    upcoming.sort_by_key(|block| block.end_ms);
    upcoming.truncate(limit);
    upcoming
}

/// [`upcoming_deadlines`] with day counts and urgency buckets attached.
pub fn upcoming_deadline_views(
    records: &[TimeBlock],
    as_of_ms: i64,
    window_days: i64,
    limit: usize,
) -> Vec<UpcomingDeadline> {
    upcoming_deadlines(records, as_of_ms, window_days, limit)
        .into_iter()
        .map(|block| {
            let days = days_until(block.end_ms, as_of_ms);
            UpcomingDeadline {
                block: block.clone(),
                days_until: days,
                urgency: deadline_urgency(days),
            }
        })
        .collect()
}

/// Block count and rounded average progress for every domain.
pub fn domain_progress(records: &[TimeBlock]) -> Vec<DomainProgress> {
    Domain::ALL
        .into_iter()
        .map(|domain| {
            let in_domain = records.iter().filter(|block| block.domain == domain);
            DomainProgress {
                domain,
                block_count: in_domain.clone().count(),
                avg_progress: rounded_mean_progress(in_domain),
            }
        })
        .collect()
}

/// Blocks whose inclusive range covers `instant_ms`.
pub fn blocks_for_instant(records: &[TimeBlock], instant_ms: i64) -> Vec<&TimeBlock> {
    records
        .iter()
        .filter(|block| block.contains_instant(instant_ms))
        .collect()
}

/// Blocks overlapping the given UTC calendar quarter.
///
/// # Errors
/// - `InvalidQuarter` unless `quarter` is 1..=4.
/// - `YearOutOfRange` when chrono cannot represent the quarter bounds.
pub fn blocks_in_quarter(
    records: &[TimeBlock],
    year: i32,
    quarter: u32,
) -> Result<Vec<&TimeBlock>, AnalyticsError> {
    let (start_ms, end_ms) = quarter_bounds_ms(year, quarter)?;
    Ok(records
        .iter()
        .filter(|block| block.overlaps(start_ms, end_ms))
        .collect())
}

/// Inclusive `[first ms, last ms]` of a UTC quarter.
pub fn quarter_bounds_ms(year: i32, quarter: u32) -> Result<(i64, i64), AnalyticsError> {
    if !(1..=4).contains(&quarter) {
        return Err(AnalyticsError::InvalidQuarter(quarter));
    }
    let start = month_start_ms(year, (quarter - 1) * 3 + 1)?;
    let next_start = if quarter == 4 {
        let next_year = year
            .checked_add(1)
            .ok_or(AnalyticsError::YearOutOfRange(year))?;
        month_start_ms(next_year, 1)?
    } else {
        month_start_ms(year, quarter * 3 + 1)?
    };
    Ok((start, next_start - 1))
}

fn month_start_ms(year: i32, month: u32) -> Result<i64, AnalyticsError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date_time| date_time.and_utc().timestamp_millis())
        .ok_or(AnalyticsError::YearOutOfRange(year))
}

/// Builds the full analytics view for one render.
pub fn summarize(
    records: &[TimeBlock],
    as_of_ms: i64,
    config: &AnalyticsConfig,
) -> AnalyticsSummary {
    AnalyticsSummary {
        stats: progress_stats(records),
        domain_distribution: domain_distribution(records),
        type_distribution: type_distribution(records),
        priority_distribution: priority_distribution(records),
        domain_progress: domain_progress(records),
        upcoming: upcoming_deadline_views(
            records,
            as_of_ms,
            i64::from(config.window_days),
            config.deadline_limit,
        ),
    }
}
