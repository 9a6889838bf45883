//! Time block planner use-case service.
//!
//! # Responsibility
//! - Own the session's ordered list of time blocks.
//! - Provide add/edit/remove entry points with model validation.
//! - Feed the current snapshot to analytics.
//!
//! # Invariants
//! - Stored blocks always pass `TimeBlock::validate()`.
//! - Block ids are unique within one planner.
//! - Insertion order is preserved; edits never reorder.

use crate::analytics::time_block::{summarize, AnalyticsSummary};
use crate::config::AnalyticsConfig;
use crate::model::domain::Priority;
use crate::model::time_block::{
    TimeBlock, TimeBlockDraft, TimeBlockId, TimeBlockValidationError,
};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors from planner operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// No block with this id in the planner.
    NotFound(TimeBlockId),
    /// A block with this id is already stored.
    DuplicateId(TimeBlockId),
    /// Input failed model validation.
    Validation(TimeBlockValidationError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "time block not found: {id}"),
            Self::DuplicateId(id) => write!(f, "time block already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TimeBlockValidationError> for PlannerError {
    fn from(value: TimeBlockValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Session-owned year planner.
#[derive(Debug, Clone, Default)]
pub struct PlannerService {
    blocks: Vec<TimeBlock>,
    config: AnalyticsConfig,
}

impl PlannerService {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            blocks: Vec::new(),
            config,
        }
    }

    /// Seeds a planner from existing blocks, validating each one.
    pub fn with_blocks(
        config: AnalyticsConfig,
        blocks: impl IntoIterator<Item = TimeBlock>,
    ) -> PlannerResult<Self> {
        let mut planner = Self::new(config);
        for block in blocks {
            planner.add_block(block)?;
        }
        Ok(planner)
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Appends a validated block and returns its id.
    pub fn add_block(&mut self, block: TimeBlock) -> PlannerResult<TimeBlockId> {
        block.validate()?;
        if self.position(block.id).is_some() {
            return Err(PlannerError::DuplicateId(block.id));
        }
        let id = block.id;
        debug!(
            "event=block_added module=planner status=ok id={} domain={} type={}",
            id, block.domain, block.kind
        );
        self.blocks.push(block);
        Ok(id)
    }

    /// Parses raw form input and appends the resulting block.
    pub fn add_draft(&mut self, draft: TimeBlockDraft) -> PlannerResult<TimeBlockId> {
        let block = draft.into_block().map_err(|err| {
            warn!("event=block_rejected module=planner status=error reason={err}");
            err
        })?;
        self.add_block(block)
    }

    /// Replaces a stored block wholesale, keeping its position.
    pub fn replace_block(&mut self, block: TimeBlock) -> PlannerResult<()> {
        block.validate()?;
        let position = self
            .position(block.id)
            .ok_or(PlannerError::NotFound(block.id))?;
        self.blocks[position] = block;
        Ok(())
    }

    pub fn update_progress(&mut self, id: TimeBlockId, progress: u8) -> PlannerResult<()> {
        let block = self.block_mut(id)?;
        block.set_progress(progress)?;
        debug!(
            "event=block_progress module=planner status=ok id={} progress={}",
            id, progress
        );
        Ok(())
    }

    pub fn update_priority(&mut self, id: TimeBlockId, priority: Priority) -> PlannerResult<()> {
        self.block_mut(id)?.priority = priority;
        Ok(())
    }

    /// Removes and returns a block.
    pub fn remove_block(&mut self, id: TimeBlockId) -> PlannerResult<TimeBlock> {
        let position = self.position(id).ok_or(PlannerError::NotFound(id))?;
        debug!("event=block_removed module=planner status=ok id={id}");
        Ok(self.blocks.remove(position))
    }

    pub fn get_block(&self, id: TimeBlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Blocks in insertion order.
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Analytics over the current snapshot as seen at `as_of_ms`.
    pub fn summary(&self, as_of_ms: i64) -> AnalyticsSummary {
        summarize(&self.blocks, as_of_ms, &self.config)
    }

    fn position(&self, id: TimeBlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    fn block_mut(&mut self, id: TimeBlockId) -> PlannerResult<&mut TimeBlock> {
        self.blocks
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(PlannerError::NotFound(id))
    }
}
