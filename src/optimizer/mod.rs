//! Fleet allocation optimizer.
//!
//! Assigns demands to vessels of a fleet snapshot, maximizing assigned
//! tonnage and then minimizing idle deadweight.
//!
//! # Algorithm
//!
//! 1. Validate the input (see [`validation`](crate::validation)).
//! 2. Compute candidate vessels per demand with the compatibility
//!    [`filter`](crate::filter).
//! 3. Greedy construction in [`DemandOrdering`] order.
//! 4. Local improvement (swap, exchange, relocate), capped at
//!    `iteration_multiplier * demands` iterations.
//!
//! # Determinism
//! Same snapshot and same demands give the same plan: every ordering
//! step ends in an ID tie-break, and neighbors are scanned in a fixed
//! order.
//!
//! # Cancellation
//! [`FleetOptimizer::optimize_with_cancel`] polls an `AtomicBool` between
//! greedy commits and between improvement iterations; a set flag aborts
//! the run with [`AllocationError::Cancelled`] and no partial plan.

mod config;
mod greedy;
mod improve;
mod state;

pub use config::{Objective, OptimizerConfig, OrderingStrategy};

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::AllocationError;
use crate::models::{Demand, DemandSet, Plan, Vessel};
use crate::ordering::DemandOrdering;
use crate::validation::validate_input;
use state::Problem;

/// Input container for one optimization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Fleet snapshot.
    pub vessels: Vec<Vessel>,
    /// Demands to allocate.
    pub demands: Vec<Demand>,
}

impl AllocationRequest {
    /// Creates a request.
    pub fn new(vessels: Vec<Vessel>, demands: Vec<Demand>) -> Self {
        Self { vessels, demands }
    }

    /// Creates a request from an admitted demand set.
    pub fn from_demand_set(vessels: Vec<Vessel>, demands: &DemandSet) -> Self {
        Self::new(vessels, demands.as_slice().to_vec())
    }
}

/// Greedy-plus-local-search fleet optimizer.
///
/// Holds no run state; one instance can serve concurrent runs.
///
/// # Example
///
/// ```
/// use u_fleet::models::{Demand, TimeWindow, UnassignableReason, Vessel};
/// use u_fleet::optimizer::FleetOptimizer;
///
/// let fleet = vec![
///     Vessel::capesize("V1", 180_000, TimeWindow::new(0, 1_000)),
///     Vessel::panamax("V2", 80_000, TimeWindow::new(0, 1_000)),
/// ];
/// let demands = vec![
///     Demand::new("D1", 150_000, TimeWindow::new(100, 200)),
///     Demand::new("D2", 200_000, TimeWindow::new(100, 200)),
/// ];
///
/// let plan = FleetOptimizer::new().optimize(&fleet, &demands).unwrap();
/// assert_eq!(plan.assignment_for_demand("D1").unwrap().vessel_id, "V1");
/// assert_eq!(
///     plan.unassignable_demand("D2").unwrap().reason,
///     UnassignableReason::NoCompatibleVessel
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FleetOptimizer {
    config: OptimizerConfig,
    ordering: Option<DemandOrdering>,
}

impl FleetOptimizer {
    /// Creates an optimizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a custom demand processing order for the greedy pass,
    /// overriding the configured [`OrderingStrategy`].
    pub fn with_ordering(mut self, ordering: DemandOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Produces a plan for `demands` over the fleet snapshot `vessels`.
    pub fn optimize(&self, vessels: &[Vessel], demands: &[Demand]) -> Result<Plan, AllocationError> {
        self.run(vessels, demands, None)
    }

    /// Like [`optimize`](Self::optimize), aborting once `cancel` is set.
    pub fn optimize_with_cancel(
        &self,
        vessels: &[Vessel],
        demands: &[Demand],
        cancel: &AtomicBool,
    ) -> Result<Plan, AllocationError> {
        self.run(vessels, demands, Some(cancel))
    }

    /// Produces a plan from a request.
    pub fn optimize_request(&self, request: &AllocationRequest) -> Result<Plan, AllocationError> {
        self.run(&request.vessels, &request.demands, None)
    }

    #[instrument(level = "info", skip_all, fields(vessels = vessels.len(), demands = demands.len()))]
    fn run(
        &self,
        vessels: &[Vessel],
        demands: &[Demand],
        cancel: Option<&AtomicBool>,
    ) -> Result<Plan, AllocationError> {
        validate_input(vessels, demands).map_err(AllocationError::InvalidInput)?;
        if vessels.is_empty() {
            return Err(AllocationError::EmptyFleet);
        }
        if demands.is_empty() {
            debug!("no demands to allocate");
            return Ok(Plan::empty());
        }

        let problem = Problem::new(vessels, demands);
        let order = match &self.ordering {
            Some(ordering) => greedy::processing_order(&problem, ordering),
            None => greedy::processing_order(&problem, &self.config.ordering.build()),
        };

        let state = greedy::construct(&problem, &order, cancel)?;
        debug!(
            assigned_t = state.assigned_tonnage_t(),
            idle_t = state.idle_capacity_t(),
            "greedy pass done"
        );

        let state = if self.config.improve {
            let (state, moves) = improve::improve(
                &problem,
                state,
                &order,
                &self.config.objective,
                self.config.iteration_cap(demands.len()),
                cancel,
            )?;
            debug!(moves, "local improvement done");
            state
        } else {
            state
        };

        let plan = state.into_plan(&problem);
        let score = plan.score();
        info!(
            assigned = score.assigned_count,
            unassignable = score.unassignable_count,
            assigned_t = score.assigned_tonnage_t,
            utilization = score.utilization,
            "allocation complete"
        );
        Ok(plan)
    }
}
