//! Time block domain model.
//!
//! # Responsibility
//! - Define the scheduled goal/project/habit/event record used by the
//!   planner and analytics views.
//! - Convert raw form input into validated records.
//!
//! # Invariants
//! - `id` is stable and never reused for another block.
//! - `progress` is a percentage in `0..=100`.
//! - `estimated_hours`, when set, is finite and non-negative.
//! - `start_ms <= end_ms` is assumed but not enforced.
//!
//! # See also
//! - `crate::analytics::time_block`

use crate::model::domain::{
    parse_block_type, parse_domain, parse_priority, BlockType, ClassificationError, Domain,
    Priority,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one time block.
pub type TimeBlockId = Uuid;

/// Upper bound for `progress`.
pub const MAX_PROGRESS: u8 = 100;

/// Validation errors for time block invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBlockValidationError {
    NilId,
    BlankTitle,
    ProgressOutOfRange(i64),
    InvalidEstimatedHours(f64),
    UnparsableEstimatedHours(String),
    Classification(ClassificationError),
}

impl Display for TimeBlockValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "time block id must not be nil"),
            Self::BlankTitle => write!(f, "time block title must not be blank"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "progress ({value}) must be within 0..=100")
            }
            Self::InvalidEstimatedHours(value) => {
                write!(f, "estimated_hours ({value}) must be finite and >= 0")
            }
            Self::UnparsableEstimatedHours(value) => {
                write!(f, "estimated_hours `{value}` is not a number")
            }
            Self::Classification(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TimeBlockValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Classification(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClassificationError> for TimeBlockValidationError {
    fn from(value: ClassificationError) -> Self {
        Self::Classification(value)
    }
}

/// Scheduled record with a date range and completion progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeBlockWire")]
pub struct TimeBlock {
    pub id: TimeBlockId,
    pub title: String,
    pub domain: Domain,
    /// Unix epoch milliseconds.
    pub start_ms: i64,
    /// Unix epoch milliseconds. Expected to be >= `start_ms`.
    pub end_ms: i64,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Completion percentage, `0..=100`.
    pub progress: u8,
    pub description: Option<String>,
    pub priority: Priority,
    pub estimated_hours: Option<f64>,
}

impl TimeBlock {
    /// Creates a new block with a generated id, zero progress and medium
    /// priority.
    pub fn new(
        title: impl Into<String>,
        domain: Domain,
        kind: BlockType,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            domain,
            start_ms,
            end_ms,
            kind,
            progress: 0,
            description: None,
            priority: Priority::Medium,
            estimated_hours: None,
        }
    }

    /// Checks record invariants.
    ///
    /// # Errors
    /// - `NilId` for a nil id.
    /// - `BlankTitle` when the title is empty after trim.
    /// - `ProgressOutOfRange` when progress exceeds 100.
    /// - `InvalidEstimatedHours` for negative, NaN or infinite hours.
    pub fn validate(&self) -> Result<(), TimeBlockValidationError> {
        if self.id.is_nil() {
            return Err(TimeBlockValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TimeBlockValidationError::BlankTitle);
        }
        if self.progress > MAX_PROGRESS {
            return Err(TimeBlockValidationError::ProgressOutOfRange(i64::from(
                self.progress,
            )));
        }
        if let Some(hours) = self.estimated_hours {
            validate_hours(hours)?;
        }
        Ok(())
    }

    /// Sets completion progress.
    pub fn set_progress(&mut self, progress: u8) -> Result<(), TimeBlockValidationError> {
        if progress > MAX_PROGRESS {
            return Err(TimeBlockValidationError::ProgressOutOfRange(i64::from(
                progress,
            )));
        }
        self.progress = progress;
        Ok(())
    }

    /// Exactly 100 percent; nothing else counts as complete.
    pub fn is_complete(&self) -> bool {
        self.progress == MAX_PROGRESS
    }

    /// Whether `instant_ms` falls inside the inclusive block range.
    pub fn contains_instant(&self, instant_ms: i64) -> bool {
        self.start_ms <= instant_ms && instant_ms <= self.end_ms
    }

    /// Whether the block range intersects the inclusive window.
    pub fn overlaps(&self, window_start_ms: i64, window_end_ms: i64) -> bool {
        self.start_ms <= window_end_ms && self.end_ms >= window_start_ms
    }
}

fn validate_hours(hours: f64) -> Result<(), TimeBlockValidationError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(TimeBlockValidationError::InvalidEstimatedHours(hours));
    }
    Ok(())
}

#[derive(Deserialize)]
struct TimeBlockWire {
    id: TimeBlockId,
    title: String,
    domain: Domain,
    start_ms: i64,
    end_ms: i64,
    #[serde(rename = "type")]
    kind: BlockType,
    progress: i64,
    #[serde(default)]
    description: Option<String>,
    priority: Priority,
    #[serde(default)]
    estimated_hours: Option<f64>,
}

impl TryFrom<TimeBlockWire> for TimeBlock {
    type Error = TimeBlockValidationError;

    fn try_from(wire: TimeBlockWire) -> Result<Self, Self::Error> {
        let progress = progress_from_i64(wire.progress)?;
        let block = Self {
            id: wire.id,
            title: wire.title,
            domain: wire.domain,
            start_ms: wire.start_ms,
            end_ms: wire.end_ms,
            kind: wire.kind,
            progress,
            description: wire.description,
            priority: wire.priority,
            estimated_hours: wire.estimated_hours,
        };
        block.validate()?;
        Ok(block)
    }
}

fn progress_from_i64(value: i64) -> Result<u8, TimeBlockValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|progress| *progress <= MAX_PROGRESS)
        .ok_or(TimeBlockValidationError::ProgressOutOfRange(value))
}

/// Raw, string-typed form input for creating or editing a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlockDraft {
    pub title: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub start_ms: i64,
    pub end_ms: i64,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub description: Option<String>,
    /// Whole hours as typed; blank means "not estimated".
    #[serde(default)]
    pub estimated_hours: Option<String>,
}

impl TimeBlockDraft {
    /// Parses this draft into a validated block with a fresh id.
    pub fn into_block(self) -> Result<TimeBlock, TimeBlockValidationError> {
        self.into_block_with_id(Uuid::new_v4())
    }

    /// Parses this draft keeping a caller-provided id (edit flow).
    pub fn into_block_with_id(
        self,
        id: TimeBlockId,
    ) -> Result<TimeBlock, TimeBlockValidationError> {
        if self.title.trim().is_empty() {
            return Err(TimeBlockValidationError::BlankTitle);
        }
        let domain = parse_domain(&self.domain)?;
        let kind = parse_block_type(&self.kind)?;
        let priority = parse_priority(&self.priority)?;
        let progress = progress_from_i64(self.progress)?;
        let estimated_hours = parse_whole_hours(self.estimated_hours.as_deref())?;
        let description = self
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let block = TimeBlock {
            id,
            title: self.title.trim().to_string(),
            domain,
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            kind,
            progress,
            description,
            priority,
            estimated_hours,
        };
        block.validate()?;
        Ok(block)
    }
}

/// Leading signed integer of the input, ignoring any trailing text
/// (`"12.9"` and `"12h"` both give 12).
fn parse_whole_hours(raw: Option<&str>) -> Result<Option<f64>, TimeBlockValidationError> {
    let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return Err(TimeBlockValidationError::UnparsableEstimatedHours(
            trimmed.to_string(),
        ));
    }
    // Digit runs too long for u64 still parse as f64, like JS numbers.
    let magnitude = digits.parse::<f64>().map_err(|_| {
        TimeBlockValidationError::UnparsableEstimatedHours(trimmed.to_string())
    })?;
    let hours = if negative && magnitude > 0.0 { -magnitude } else { magnitude };
    validate_hours(hours)?;
    Ok(Some(hours))
}

#[cfg(test)]
mod tests {
    use super::{parse_whole_hours, TimeBlockDraft, TimeBlockValidationError};

    #[test]
    fn whole_hours_keeps_leading_integer_and_skips_blank() {
        assert_eq!(parse_whole_hours(Some("12.9")).expect("numeric"), Some(12.0));
        assert_eq!(parse_whole_hours(Some(" 12abc ")).expect("digits prefix"), Some(12.0));
        assert_eq!(parse_whole_hours(Some("1e3")).expect("exponent ignored"), Some(1.0));
        assert_eq!(parse_whole_hours(Some("+8")).expect("explicit sign"), Some(8.0));
        assert_eq!(parse_whole_hours(Some("-0")).expect("negative zero"), Some(0.0));
        assert_eq!(parse_whole_hours(Some("   ")).expect("blank"), None);
        assert_eq!(parse_whole_hours(None).expect("absent"), None);
    }

    #[test]
    fn whole_hours_rejects_garbage_and_negative() {
        for raw in ["lots", ".5", "-", "h12"] {
            assert!(
                matches!(
                    parse_whole_hours(Some(raw)),
                    Err(TimeBlockValidationError::UnparsableEstimatedHours(_))
                ),
                "{raw} should be unparsable"
            );
        }
        assert!(matches!(
            parse_whole_hours(Some("-3")),
            Err(TimeBlockValidationError::InvalidEstimatedHours(_))
        ));
    }

    #[test]
    fn draft_rejects_progress_above_hundred() {
        let draft = TimeBlockDraft {
            title: "Marathon".to_string(),
            domain: "physique".to_string(),
            kind: "goal".to_string(),
            priority: "high".to_string(),
            progress: 101,
            ..TimeBlockDraft::default()
        };
        assert_eq!(
            draft.into_block().expect_err("progress too high"),
            TimeBlockValidationError::ProgressOutOfRange(101)
        );
    }
}
