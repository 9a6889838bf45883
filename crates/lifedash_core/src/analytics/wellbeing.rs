//! Mood and life satisfaction aggregates for the mind and soul widgets.
//!
//! # Responsibility
//! - Model mood check-ins (1..=5) and satisfaction scores (1..=10).
//! - Average mood over a rolling window and rate overall satisfaction.
//!
//! # Invariants
//! - Scores outside their scale are rejected at construction.
//! - Averages of an empty selection are 0, never NaN.

use crate::analytics::time_block::DAY_MS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound of a satisfaction score.
pub const MAX_SATISFACTION_SCORE: u8 = 10;

pub type WellbeingResult<T> = Result<T, WellbeingError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellbeingError {
    MoodOutOfRange(u8),
    ScoreOutOfRange(u8),
    BlankAreaName,
}

impl Display for WellbeingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoodOutOfRange(value) => write!(f, "mood ({value}) must be within 1..=5"),
            Self::ScoreOutOfRange(value) => {
                write!(f, "satisfaction score ({value}) must be within 1..=10")
            }
            Self::BlankAreaName => write!(f, "life area name must not be blank"),
        }
    }
}

impl Error for WellbeingError {}

/// Five-step mood scale, serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
    VeryBad = 1,
    Bad = 2,
    Okay = 3,
    Good = 4,
    Excellent = 5,
}

impl Mood {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryBad => "Very Bad",
            Self::Bad => "Bad",
            Self::Okay => "Okay",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl TryFrom<u8> for Mood {
    type Error = WellbeingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryBad),
            2 => Ok(Self::Bad),
            3 => Ok(Self::Okay),
            4 => Ok(Self::Good),
            5 => Ok(Self::Excellent),
            other => Err(WellbeingError::MoodOutOfRange(other)),
        }
    }
}

impl From<Mood> for u8 {
    fn from(value: Mood) -> Self {
        value.value()
    }
}

/// One mood check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unix epoch milliseconds.
    pub recorded_ms: i64,
}

impl MoodEntry {
    pub fn new(mood: Mood, recorded_ms: i64) -> Self {
        Self {
            mood,
            note: None,
            tags: Vec::new(),
            recorded_ms,
        }
    }

    /// Sets tags from comma-separated input; blank items are dropped.
    pub fn with_tags(mut self, raw: &str) -> Self {
        self.tags = parse_tags(raw);
        self
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Mean mood of entries recorded less than `window_days` before `as_of_ms`.
///
/// Entries stamped after `as_of_ms` count as recent. Returns 0 when nothing
/// falls in the window.
pub fn average_mood(entries: &[MoodEntry], as_of_ms: i64, window_days: u32) -> f64 {
    let window_ms = i64::from(window_days).saturating_mul(DAY_MS);
    let recent: Vec<u8> = entries
        .iter()
        .filter(|entry| as_of_ms.saturating_sub(entry.recorded_ms) < window_ms)
        .map(|entry| entry.mood.value())
        .collect();
    mean(&recent)
}

/// One rated area of life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionArea {
    pub name: String,
    pub score: u8,
}

impl SatisfactionArea {
    pub fn new(name: impl Into<String>, score: u8) -> WellbeingResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(WellbeingError::BlankAreaName);
        }
        check_score(score)?;
        Ok(Self { name, score })
    }

    pub fn set_score(&mut self, score: u8) -> WellbeingResult<()> {
        check_score(score)?;
        self.score = score;
        Ok(())
    }

    pub fn level(&self) -> SatisfactionLevel {
        satisfaction_level(f64::from(self.score))
    }
}

fn check_score(score: u8) -> WellbeingResult<()> {
    if !(1..=MAX_SATISFACTION_SCORE).contains(&score) {
        return Err(WellbeingError::ScoreOutOfRange(score));
    }
    Ok(())
}

/// Rating band for a score or an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionLevel {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl SatisfactionLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

pub fn satisfaction_level(score: f64) -> SatisfactionLevel {
    if score >= 8.0 {
        SatisfactionLevel::Excellent
    } else if score >= 6.0 {
        SatisfactionLevel::Good
    } else if score >= 4.0 {
        SatisfactionLevel::Fair
    } else {
        SatisfactionLevel::NeedsAttention
    }
}

/// Mean score across areas; 0 when there are none.
pub fn average_satisfaction(areas: &[SatisfactionArea]) -> f64 {
    let scores: Vec<u8> = areas.iter().map(|area| area.score).collect();
    mean(&scores)
}

fn mean(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|&value| u64::from(value)).sum();
    sum as f64 / values.len() as f64
}
