//! Construction plans - pending build orders and their progress

use serde::{Deserialize, Serialize};

use crate::city::building::StructureKind;
use crate::core::types::DwarfId;

/// Result of one step of construction work
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContributionResult {
    /// Work contributed, plan still pending
    InProgress { progress: f64 },
    /// Work contributed, the plan is finished and its structure can be built
    Completed,
}

/// Outcome of toggling a plan on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanToggle {
    /// No plan existed; a new one was placed
    Placed,
    /// A plan of the same kind existed and was removed
    Removed,
    /// A plan of another kind existed and was replaced with a fresh one
    Replaced { previous: StructureKind },
}

/// A pending construction order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub kind: StructureKind,
    /// Completed work steps
    pub work_done: u32,
    /// Work steps needed to finish
    pub work_required: u32,
    /// Dwarf building this plan during the current tick
    pub assignee: Option<DwarfId>,
}

impl Plan {
    pub fn new(kind: StructureKind, work_required: u32) -> Self {
        Self {
            kind,
            work_done: 0,
            work_required: work_required.max(1),
            assignee: None,
        }
    }

    /// Fraction complete, in [0, 1)
    pub fn progress(&self) -> f64 {
        self.work_done as f64 / self.work_required as f64
    }

    pub fn is_available(&self) -> bool {
        self.assignee.is_none()
    }
}

/// Apply one step of work to a plan
pub fn apply_construction_work(plan: &mut Plan) -> ContributionResult {
    plan.work_done = (plan.work_done + 1).min(plan.work_required);
    if plan.work_done >= plan.work_required {
        ContributionResult::Completed
    } else {
        ContributionResult::InProgress {
            progress: plan.progress(),
        }
    }
}
