//! Greedy construction pass.
//!
//! # Algorithm
//!
//! 1. Order demands with the configured [`DemandOrdering`] (largest tonnage
//!    first by default; candidate counts are available to scarcity rules).
//! 2. For each demand, commit the first candidate vessel whose committed
//!    windows do not overlap the demand's loading window.
//! 3. Demands with no free candidate stay unassigned.
//!
//! # Complexity
//! O(n * c * b) where n=demands, c=candidates/demand, b=bookings/vessel.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::state::{AllocationState, Problem};
use crate::error::AllocationError;
use crate::ordering::{DemandOrdering, OrderingContext};

/// Processing order of the demands, as indices.
pub(crate) fn processing_order(problem: &Problem<'_>, ordering: &DemandOrdering) -> Vec<usize> {
    let context = OrderingContext::from_counts(
        problem
            .demands
            .iter()
            .zip(&problem.candidates)
            .map(|(demand, candidates)| (demand.id.as_str(), candidates.len())),
    );
    ordering.sort_indices(problem.demands, &context)
}

/// Builds the initial allocation.
///
/// `cancel` is polled between commits.
pub(crate) fn construct(
    problem: &Problem<'_>,
    order: &[usize],
    cancel: Option<&AtomicBool>,
) -> Result<AllocationState, AllocationError> {
    let mut state = AllocationState::new(problem);

    for &d in order {
        if is_cancelled(cancel) {
            warn!("cancelled during greedy pass");
            return Err(AllocationError::Cancelled);
        }
        match state.first_free_candidate(problem, d) {
            Some(v) => {
                debug!(
                    demand = %problem.demands[d].id,
                    vessel = %problem.vessels[v].id,
                    "demand committed"
                );
                state.commit(problem, d, v);
            }
            None => {
                debug!(demand = %problem.demands[d].id, "no free candidate");
            }
        }
    }

    Ok(state)
}

#[inline]
pub(crate) fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}
