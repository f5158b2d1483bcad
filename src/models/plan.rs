//! Plan (solution) model.
//!
//! A plan is the result of one optimization run: vessel-demand
//! assignments, the demands that could not be served (with a reason each),
//! and the plan's score. Plans are immutable once built; a caller either
//! commits a plan as a whole or discards it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::TimeWindow;
use crate::evaluator::PlanScore;

/// A vessel-demand assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned vessel ID.
    pub vessel_id: String,
    /// Served demand ID.
    pub demand_id: String,
    /// Committed cargo (t).
    pub tonnage_t: i64,
    /// Time the vessel is committed (the demand's loading window).
    pub window: TimeWindow,
    /// Vessel deadweight (denormalized so plans can be scored standalone).
    pub vessel_capacity_t: i64,
}

/// Why a demand was left unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignableReason {
    /// No vessel passes the compatibility filter.
    NoCompatibleVessel,
    /// Compatible vessels exist but all are committed to overlapping windows.
    WindowConflict,
}

/// A demand the run could not serve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unassignable {
    /// Demand ID.
    pub demand_id: String,
    /// Required cargo (t).
    pub tonnage_t: i64,
    /// Reason.
    pub reason: UnassignableReason,
}

/// A constraint violation found in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (vessel or demand).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of plan violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Committed tonnage above vessel deadweight.
    CapacityExceeded,
    /// Vessel committed to two overlapping windows.
    VesselDoubleBooked,
    /// Demand served more than once.
    DuplicateDemand,
}

/// The outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    assignments: Vec<Assignment>,
    unassignable: Vec<Unassignable>,
    score: PlanScore,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        vessel_id: impl Into<String>,
        demand_id: impl Into<String>,
        tonnage_t: i64,
        window: TimeWindow,
        vessel_capacity_t: i64,
    ) -> Self {
        Self {
            vessel_id: vessel_id.into(),
            demand_id: demand_id.into(),
            tonnage_t,
            window,
            vessel_capacity_t,
        }
    }

    /// Unused deadweight on this voyage (t).
    #[inline]
    pub fn idle_capacity_t(&self) -> i64 {
        self.vessel_capacity_t - self.tonnage_t
    }

    /// Whether both assignments hold the same vessel at overlapping times.
    #[inline]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.vessel_id == other.vessel_id && self.window.overlaps(&other.window)
    }
}

impl UnassignableReason {
    /// Snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCompatibleVessel => "no_compatible_vessel",
            Self::WindowConflict => "window_conflict",
        }
    }
}

impl fmt::Display for UnassignableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Unassignable {
    /// Creates a new unassignable record.
    pub fn new(demand_id: impl Into<String>, tonnage_t: i64, reason: UnassignableReason) -> Self {
        Self {
            demand_id: demand_id.into(),
            tonnage_t,
            reason,
        }
    }
}

impl Violation {
    /// Creates a capacity exceeded violation.
    pub fn capacity_exceeded(vessel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityExceeded,
            entity_id: vessel_id.into(),
            message: message.into(),
        }
    }

    /// Creates a double booking violation.
    pub fn double_booked(vessel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::VesselDoubleBooked,
            entity_id: vessel_id.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate demand violation.
    pub fn duplicate_demand(demand_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DuplicateDemand,
            entity_id: demand_id.into(),
            message: message.into(),
        }
    }
}

impl Plan {
    /// Builds a plan from its parts and scores it.
    ///
    /// Assignments are ordered by window start, then vessel ID, then demand
    /// ID; unassignable demands by demand ID.
    pub fn from_parts(mut assignments: Vec<Assignment>, mut unassignable: Vec<Unassignable>) -> Self {
        assignments.sort_by(|a, b| {
            a.window
                .start_ms
                .cmp(&b.window.start_ms)
                .then_with(|| a.vessel_id.cmp(&b.vessel_id))
                .then_with(|| a.demand_id.cmp(&b.demand_id))
        });
        unassignable.sort_by(|a, b| a.demand_id.cmp(&b.demand_id));
        let score = PlanScore::calculate(&assignments, &unassignable);
        Self {
            assignments,
            unassignable,
            score,
        }
    }

    /// An empty plan (no demands at all).
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Assignments in plan order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Demands that could not be served.
    pub fn unassignable(&self) -> &[Unassignable] {
        &self.unassignable
    }

    /// Score computed when the plan was built.
    pub fn score(&self) -> &PlanScore {
        &self.score
    }

    /// Finds the assignment serving a demand.
    pub fn assignment_for_demand(&self, demand_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.demand_id == demand_id)
    }

    /// Returns all assignments of a vessel.
    pub fn assignments_for_vessel(&self, vessel_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.vessel_id == vessel_id)
            .collect()
    }

    /// Finds the unassignable record of a demand.
    pub fn unassignable_demand(&self, demand_id: &str) -> Option<&Unassignable> {
        self.unassignable.iter().find(|u| u.demand_id == demand_id)
    }

    /// IDs of vessels used by the plan, sorted.
    pub fn vessel_ids(&self) -> BTreeSet<&str> {
        self.assignments.iter().map(|a| a.vessel_id.as_str()).collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every demand of the run was served.
    pub fn is_fully_covered(&self) -> bool {
        self.unassignable.is_empty()
    }
}
