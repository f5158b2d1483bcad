//! Local improvement over a complete allocation.
//!
//! # Neighborhood
//!
//! | Move | Effect |
//! |------|--------|
//! | Swap | Two committed demands on different vessels trade vessels |
//! | Exchange | A committed demand is ejected for an unassigned one |
//! | Relocate | A committed demand moves to another free candidate |
//!
//! After every move, unassigned demands are re-inserted greedily in
//! processing order, so a move that frees a window can pull in extra
//! tonnage.
//!
//! Each iteration applies the best strictly improving neighbor (first
//! found on ties). The search stops at a local optimum or at the
//! iteration cap, whichever comes first.

use std::cmp::Ordering;
use std::sync::atomic::AtomicBool;

use tracing::{debug, warn};

use super::greedy::is_cancelled;
use super::state::{AllocationState, Problem};
use super::Objective;
use crate::error::AllocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Swap,
    Exchange,
    Relocate,
}

impl MoveKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Exchange => "exchange",
            Self::Relocate => "relocate",
        }
    }
}

/// Runs local improvement from `state`.
///
/// Returns the improved state and the number of moves applied. `cancel`
/// is polled between iterations.
pub(crate) fn improve(
    problem: &Problem<'_>,
    mut state: AllocationState,
    order: &[usize],
    objective: &Objective,
    max_iterations: usize,
    cancel: Option<&AtomicBool>,
) -> Result<(AllocationState, usize), AllocationError> {
    let mut applied = 0;

    for iteration in 0..max_iterations {
        if is_cancelled(cancel) {
            warn!(iteration, "cancelled during local improvement");
            return Err(AllocationError::Cancelled);
        }
        let Some((kind, next)) = best_neighbor(problem, &state, order, objective) else {
            break;
        };
        debug!(
            iteration,
            kind = kind.as_str(),
            assigned_t = next.assigned_tonnage_t(),
            idle_t = next.idle_capacity_t(),
            "improving move applied"
        );
        state = next;
        applied += 1;
    }

    Ok((state, applied))
}

fn best_neighbor(
    problem: &Problem<'_>,
    state: &AllocationState,
    order: &[usize],
    objective: &Objective,
) -> Option<(MoveKind, AllocationState)> {
    let committed: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&d| state.vessel_of(d).is_some())
        .collect();
    let open: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&d| state.vessel_of(d).is_none() && !problem.candidates[d].is_empty())
        .collect();

    let mut best: Option<(MoveKind, AllocationState)> = None;
    let mut consider = |kind: MoveKind, candidate: AllocationState| {
        let incumbent = best.as_ref().map_or(state, |(_, s)| s);
        if candidate.compare(incumbent, objective) == Ordering::Greater {
            best = Some((kind, candidate));
        }
    };

    // Swap
    for (i, &a) in committed.iter().enumerate() {
        for &b in &committed[i + 1..] {
            let (Some(va), Some(vb)) = (state.vessel_of(a), state.vessel_of(b)) else {
                continue;
            };
            if va == vb || !problem.is_candidate(a, vb) || !problem.is_candidate(b, va) {
                continue;
            }
            let mut next = state.clone();
            next.release(problem, a);
            next.release(problem, b);
            if !next.is_free(problem, vb, a) {
                continue;
            }
            next.commit(problem, a, vb);
            if !next.is_free(problem, va, b) {
                continue;
            }
            next.commit(problem, b, va);
            next.fill(problem, order);
            consider(MoveKind::Swap, next);
        }
    }

    // Exchange
    for &a in &committed {
        let Some(va) = state.vessel_of(a) else {
            continue;
        };
        for &u in &open {
            if !problem.is_candidate(u, va) {
                continue;
            }
            let mut next = state.clone();
            next.release(problem, a);
            if !next.is_free(problem, va, u) {
                continue;
            }
            next.commit(problem, u, va);
            next.fill(problem, order);
            consider(MoveKind::Exchange, next);
        }
    }

    // Relocate
    for &a in &committed {
        let Some(va) = state.vessel_of(a) else {
            continue;
        };
        for &v in &problem.candidates[a] {
            if v == va || !state.is_free(problem, v, a) {
                continue;
            }
            let mut next = state.clone();
            next.release(problem, a);
            next.commit(problem, a, v);
            next.fill(problem, order);
            consider(MoveKind::Relocate, next);
        }
    }

    best
}
