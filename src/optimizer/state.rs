//! Working allocation state shared by the greedy and improvement passes.

use std::cmp::Ordering;

use super::Objective;
use crate::filter::candidate_indices;
use crate::models::{Assignment, Demand, Plan, Unassignable, UnassignableReason, Vessel};

/// Immutable run input: snapshot, demands, and precomputed candidate lists.
pub(crate) struct Problem<'a> {
    pub vessels: &'a [Vessel],
    pub demands: &'a [Demand],
    /// Candidate vessel indices per demand index, best fit first.
    pub candidates: Vec<Vec<usize>>,
}

impl<'a> Problem<'a> {
    pub fn new(vessels: &'a [Vessel], demands: &'a [Demand]) -> Self {
        let candidates = demands
            .iter()
            .map(|d| candidate_indices(d, vessels))
            .collect();
        Self {
            vessels,
            demands,
            candidates,
        }
    }

    /// Whether vessel `v` is a candidate for demand `d`.
    #[inline]
    pub fn is_candidate(&self, d: usize, v: usize) -> bool {
        self.candidates[d].contains(&v)
    }
}

/// A partial allocation: which vessel serves which demand.
///
/// Never holds two overlapping loading windows on one vessel, nor a
/// non-candidate pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AllocationState {
    /// Vessel index per demand index.
    assigned: Vec<Option<usize>>,
    /// Committed demand indices per vessel index.
    bookings: Vec<Vec<usize>>,
    assigned_tonnage_t: i64,
    idle_capacity_t: i64,
}

impl AllocationState {
    pub fn new(problem: &Problem<'_>) -> Self {
        Self {
            assigned: vec![None; problem.demands.len()],
            bookings: vec![Vec::new(); problem.vessels.len()],
            assigned_tonnage_t: 0,
            idle_capacity_t: 0,
        }
    }

    #[inline]
    pub fn vessel_of(&self, d: usize) -> Option<usize> {
        self.assigned[d]
    }

    pub fn assigned_tonnage_t(&self) -> i64 {
        self.assigned_tonnage_t
    }

    pub fn idle_capacity_t(&self) -> i64 {
        self.idle_capacity_t
    }

    /// Whether vessel `v` has no committed window overlapping demand `d`'s.
    pub fn is_free(&self, problem: &Problem<'_>, v: usize, d: usize) -> bool {
        let window = &problem.demands[d].loading_window;
        self.bookings[v]
            .iter()
            .all(|&other| other == d || !problem.demands[other].loading_window.overlaps(window))
    }

    /// First candidate of `d` that is free, in best-fit order.
    pub fn first_free_candidate(&self, problem: &Problem<'_>, d: usize) -> Option<usize> {
        problem.candidates[d]
            .iter()
            .copied()
            .find(|&v| self.is_free(problem, v, d))
    }

    /// Commits demand `d` to vessel `v`.
    ///
    /// The caller has checked candidacy and freedom.
    pub fn commit(&mut self, problem: &Problem<'_>, d: usize, v: usize) {
        debug_assert!(self.assigned[d].is_none());
        self.assigned[d] = Some(v);
        self.bookings[v].push(d);
        let tonnage_t = problem.demands[d].tonnage_t;
        self.assigned_tonnage_t += tonnage_t;
        self.idle_capacity_t += problem.vessels[v].capacity_t - tonnage_t;
    }

    /// Releases demand `d`, returning the vessel it held.
    pub fn release(&mut self, problem: &Problem<'_>, d: usize) -> Option<usize> {
        let v = self.assigned[d].take()?;
        self.bookings[v].retain(|&other| other != d);
        let tonnage_t = problem.demands[d].tonnage_t;
        self.assigned_tonnage_t -= tonnage_t;
        self.idle_capacity_t -= problem.vessels[v].capacity_t - tonnage_t;
        Some(v)
    }

    /// Commits every unassigned demand, in `order`, to its first free
    /// candidate. Returns the number of commits.
    pub fn fill(&mut self, problem: &Problem<'_>, order: &[usize]) -> usize {
        let mut placed = 0;
        for &d in order {
            if self.assigned[d].is_some() {
                continue;
            }
            if let Some(v) = self.first_free_candidate(problem, d) {
                self.commit(problem, d, v);
                placed += 1;
            }
        }
        placed
    }

    /// Compares two states under `objective`; `Greater` means `self` is better.
    pub fn compare(&self, other: &Self, objective: &Objective) -> Ordering {
        objective.compare_totals(
            self.assigned_tonnage_t,
            self.idle_capacity_t,
            other.assigned_tonnage_t,
            other.idle_capacity_t,
        )
    }

    /// Builds the final plan.
    ///
    /// A demand left unassigned is `NoCompatibleVessel` when the snapshot
    /// holds no candidate for it, `WindowConflict` otherwise.
    pub fn into_plan(self, problem: &Problem<'_>) -> Plan {
        let mut assignments = Vec::new();
        let mut unassignable = Vec::new();

        for (d, demand) in problem.demands.iter().enumerate() {
            match self.assigned[d] {
                Some(v) => {
                    let vessel = &problem.vessels[v];
                    assignments.push(Assignment::new(
                        &vessel.id,
                        &demand.id,
                        demand.tonnage_t,
                        demand.loading_window,
                        vessel.capacity_t,
                    ));
                }
                None => {
                    let reason = if problem.candidates[d].is_empty() {
                        UnassignableReason::NoCompatibleVessel
                    } else {
                        UnassignableReason::WindowConflict
                    };
                    unassignable.push(Unassignable::new(&demand.id, demand.tonnage_t, reason));
                }
            }
        }

        Plan::from_parts(assignments, unassignable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn horizon() -> TimeWindow {
        TimeWindow::new(0, 1000)
    }

    #[test]
    fn test_commit_and_release() {
        let vessels = vec![Vessel::panamax("V1", 80_000, horizon())];
        let demands = vec![
            Demand::new("D1", 50_000, TimeWindow::new(0, 100)),
            Demand::new("D2", 60_000, TimeWindow::new(50, 150)),
            Demand::new("D3", 70_000, TimeWindow::new(100, 200)),
        ];
        let problem = Problem::new(&vessels, &demands);
        let mut state = AllocationState::new(&problem);

        state.commit(&problem, 0, 0);
        assert_eq!(state.assigned_tonnage_t(), 50_000);
        assert_eq!(state.idle_capacity_t(), 30_000);
        assert!(!state.is_free(&problem, 0, 1));
        // Half-open: [0,100) and [100,200) do not overlap.
        assert!(state.is_free(&problem, 0, 2));

        assert_eq!(state.release(&problem, 0), Some(0));
        assert_eq!(state.release(&problem, 0), None);
        assert_eq!(state.assigned_tonnage_t(), 0);
        assert_eq!(state.idle_capacity_t(), 0);
        assert!(state.is_free(&problem, 0, 1));
    }

    #[test]
    fn test_fill_follows_order() {
        let vessels = vec![Vessel::panamax("V1", 80_000, horizon())];
        let demands = vec![
            Demand::new("D1", 50_000, TimeWindow::new(0, 100)),
            Demand::new("D2", 60_000, TimeWindow::new(50, 150)),
        ];
        let problem = Problem::new(&vessels, &demands);
        let mut state = AllocationState::new(&problem);

        assert_eq!(state.fill(&problem, &[1, 0]), 1);
        assert_eq!(state.vessel_of(1), Some(0));
        assert_eq!(state.vessel_of(0), None);
    }

    #[test]
    fn test_into_plan_reasons() {
        let vessels = vec![Vessel::panamax("V1", 80_000, horizon())];
        let demands = vec![
            Demand::new("D1", 50_000, TimeWindow::new(0, 100)),
            Demand::new("D2", 60_000, TimeWindow::new(50, 150)),
            Demand::new("D3", 90_000, TimeWindow::new(0, 100)),
        ];
        let problem = Problem::new(&vessels, &demands);
        let mut state = AllocationState::new(&problem);
        state.fill(&problem, &[0, 1, 2]);

        let plan = state.into_plan(&problem);
        assert_eq!(plan.assignment_for_demand("D1").unwrap().vessel_id, "V1");
        assert_eq!(
            plan.unassignable_demand("D2").unwrap().reason,
            UnassignableReason::WindowConflict
        );
        assert_eq!(
            plan.unassignable_demand("D3").unwrap().reason,
            UnassignableReason::NoCompatibleVessel
        );
    }
}
