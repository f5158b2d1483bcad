//! Plan quality metrics.
//!
//! Computes allocation performance indicators from a plan. Everything
//! here is side-effect free: evaluating the same plan twice yields the
//! same score.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assigned tonnage | Σ committed tonnage |
//! | Demand tonnage | assigned + Σ unassignable tonnage |
//! | Utilization | assigned / Σ vessel deadweight over assignments |
//! | Idle capacity | Σ (deadweight − tonnage) over assignments |
//! | Coverage | assigned / demand tonnage |
//! | Violations | capacity, double booking, duplicate demand |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Plan, Unassignable, Vessel, Violation};

/// Plan performance indicators.
///
/// All tonnages are in metric tonnes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanScore {
    /// Total committed tonnage.
    pub assigned_tonnage_t: i64,
    /// Total tonnage requested by the run's demands.
    pub demand_tonnage_t: i64,
    /// Committed tonnage over deadweight of the voyages used (0.0..1.0).
    /// Zero when nothing is assigned.
    pub utilization: f64,
    /// Deadweight left empty on the voyages used.
    pub idle_capacity_t: i64,
    /// Number of assignments.
    pub assigned_count: usize,
    /// Number of demands left unassigned.
    pub unassignable_count: usize,
    /// Fraction of demand tonnage assigned (1.0 for an empty run).
    pub coverage: f64,
    /// Number of constraint violations.
    pub violation_count: usize,
}

impl PlanScore {
    /// Computes the score of a set of assignments and unassignable demands.
    pub fn calculate(assignments: &[Assignment], unassignable: &[Unassignable]) -> Self {
        // Tonnage is unbounded on input; totals are accumulated wide and
        // saturated into the i64 fields.
        let assigned: i128 = assignments.iter().map(|a| a.tonnage_t as i128).sum();
        let voyage_capacity: i128 = assignments.iter().map(|a| a.vessel_capacity_t as i128).sum();
        let unassigned: i128 = unassignable.iter().map(|u| u.tonnage_t as i128).sum();
        let demand = assigned + unassigned;

        let utilization = if voyage_capacity <= 0 {
            0.0
        } else {
            assigned as f64 / voyage_capacity as f64
        };

        let coverage = if demand <= 0 {
            1.0
        } else {
            assigned as f64 / demand as f64
        };

        Self {
            assigned_tonnage_t: saturate(assigned),
            demand_tonnage_t: saturate(demand),
            utilization,
            idle_capacity_t: saturate(voyage_capacity - assigned),
            assigned_count: assignments.len(),
            unassignable_count: unassignable.len(),
            coverage,
            violation_count: find_violations(assignments).len(),
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, min_utilization: f64) -> bool {
        self.violation_count == 0
            && self.coverage >= min_coverage
            && self.utilization >= min_utilization
    }
}

#[inline]
fn saturate(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Scores a plan.
pub fn evaluate(plan: &Plan) -> PlanScore {
    PlanScore::calculate(plan.assignments(), plan.unassignable())
}

/// Constraint violations in a plan.
pub fn violations(plan: &Plan) -> Vec<Violation> {
    find_violations(plan.assignments())
}

/// Checks tonnage against deadweight, vessel double booking, and demands
/// served twice.
pub(crate) fn find_violations(assignments: &[Assignment]) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut by_vessel: BTreeMap<&str, Vec<&Assignment>> = BTreeMap::new();
    let mut by_demand: BTreeMap<&str, usize> = BTreeMap::new();

    for a in assignments {
        if a.tonnage_t > a.vessel_capacity_t {
            out.push(Violation::capacity_exceeded(
                &a.vessel_id,
                format!(
                    "Demand '{}' commits {} t on vessel '{}' of {} t",
                    a.demand_id, a.tonnage_t, a.vessel_id, a.vessel_capacity_t
                ),
            ));
        }
        by_vessel.entry(&a.vessel_id).or_default().push(a);
        *by_demand.entry(&a.demand_id).or_insert(0) += 1;
    }

    for (vessel_id, voyages) in &by_vessel {
        for (i, a) in voyages.iter().enumerate() {
            for b in &voyages[i + 1..] {
                if a.window.overlaps(&b.window) {
                    out.push(Violation::double_booked(
                        *vessel_id,
                        format!(
                            "Vessel '{}' holds '{}' and '{}' at overlapping times",
                            vessel_id, a.demand_id, b.demand_id
                        ),
                    ));
                }
            }
        }
    }

    for (demand_id, count) in by_demand {
        if count > 1 {
            out.push(Violation::duplicate_demand(
                demand_id,
                format!("Demand '{demand_id}' is served {count} times"),
            ));
        }
    }

    out
}

/// Per-vessel usage of a plan over a fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselUsage {
    /// Vessel ID.
    pub vessel_id: String,
    /// Number of assignments.
    pub voyages: usize,
    /// Committed tonnage.
    pub tonnage_t: i64,
    /// Committed tonnage over deadweight offered by its voyages.
    pub utilization: f64,
    /// Time committed to loading windows (ms).
    pub busy_ms: i64,
    /// Availability time not committed (ms).
    pub idle_ms: i64,
}

/// Fleet-level usage report for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    /// Plan score.
    pub score: PlanScore,
    /// Usage per vessel of the snapshot, ordered by vessel ID.
    pub vessels: Vec<VesselUsage>,
    /// Vessels with at least one assignment.
    pub used_vessel_count: usize,
    /// Available vessels with no assignment.
    pub idle_vessel_count: usize,
    /// Σ idle time over available or used vessels (ms).
    pub total_idle_ms: i64,
    /// Match quality per assignment, in plan order.
    pub matches: Vec<AllocationMatch>,
    /// Mean match score over assignments (0 with no assignment).
    pub optimization_score: f64,
}

/// Match quality of one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationMatch {
    /// Demand ID.
    pub demand_id: String,
    /// Vessel ID.
    pub vessel_id: String,
    /// Score in `[0, 100]`.
    pub match_score: f64,
}

/// Match score of lifting `tonnage_t` on a vessel of `capacity_t`.
///
/// | Deadweight / tonnage | Score |
/// |----------------------|-------|
/// | below 1 | 100 × ratio |
/// | 1 to 2 | 100 |
/// | above 2 | 80 |
pub fn match_score(tonnage_t: i64, capacity_t: i64) -> f64 {
    if tonnage_t <= 0 {
        return 100.0;
    }
    let ratio = capacity_t as f64 / tonnage_t as f64;
    if ratio < 1.0 {
        (100.0 * ratio).max(0.0)
    } else if ratio > 2.0 {
        80.0
    } else {
        100.0
    }
}

impl FleetReport {
    /// Builds the usage report of `plan` against the snapshot it was
    /// produced from.
    ///
    /// Vessels that are neither available nor used by the plan are left
    /// out of the per-vessel list.
    pub fn build(plan: &Plan, vessels: &[Vessel]) -> Self {
        let mut sorted: Vec<&Vessel> = vessels.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let mut usages = Vec::new();
        for vessel in sorted {
            let voyages = plan.assignments_for_vessel(&vessel.id);
            if voyages.is_empty() && !vessel.is_available() {
                continue;
            }
            let tonnage_t: i64 = voyages.iter().map(|a| a.tonnage_t).sum();
            let offered_t: i64 = voyages.iter().map(|a| a.vessel_capacity_t).sum();
            let busy_ms = voyages
                .iter()
                .fold(0i64, |acc, a| acc.saturating_add(a.window.duration_ms()));
            let utilization = if offered_t <= 0 {
                0.0
            } else {
                tonnage_t as f64 / offered_t as f64
            };
            usages.push(VesselUsage {
                vessel_id: vessel.id.clone(),
                voyages: voyages.len(),
                tonnage_t,
                utilization,
                busy_ms,
                idle_ms: vessel.availability.duration_ms().saturating_sub(busy_ms).max(0),
            });
        }

        let matches: Vec<AllocationMatch> = plan
            .assignments()
            .iter()
            .map(|a| AllocationMatch {
                demand_id: a.demand_id.clone(),
                vessel_id: a.vessel_id.clone(),
                match_score: match_score(a.tonnage_t, a.vessel_capacity_t),
            })
            .collect();
        let optimization_score = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(|m| m.match_score).sum::<f64>() / matches.len() as f64
        };

        let used_vessel_count = usages.iter().filter(|u| u.voyages > 0).count();
        Self {
            score: evaluate(plan),
            idle_vessel_count: usages.len() - used_vessel_count,
            used_vessel_count,
            total_idle_ms: usages
                .iter()
                .fold(0i64, |acc, u| acc.saturating_add(u.idle_ms)),
            vessels: usages,
            matches,
            optimization_score,
        }
    }

    /// Usage of one vessel.
    pub fn vessel(&self, vessel_id: &str) -> Option<&VesselUsage> {
        self.vessels.iter().find(|u| u.vessel_id == vessel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeWindow, UnassignableReason, VesselStatus, ViolationType};

    fn sample_plan() -> Plan {
        Plan::from_parts(
            vec![
                Assignment::new("V1", "D1", 150_000, TimeWindow::new(100, 200), 180_000),
                Assignment::new("V2", "D2", 60_000, TimeWindow::new(100, 200), 80_000),
            ],
            vec![Unassignable::new(
                "D3",
                200_000,
                UnassignableReason::NoCompatibleVessel,
            )],
        )
    }

    #[test]
    fn test_score_basic() {
        let score = evaluate(&sample_plan());
        assert_eq!(score.assigned_tonnage_t, 210_000);
        assert_eq!(score.demand_tonnage_t, 410_000);
        assert_eq!(score.idle_capacity_t, 50_000);
        assert_eq!(score.assigned_count, 2);
        assert_eq!(score.unassignable_count, 1);
        assert_eq!(score.violation_count, 0);
        // 210000 / 260000
        assert!((score.utilization - 210.0 / 260.0).abs() < 1e-10);
        assert!((score.coverage - 210.0 / 410.0).abs() < 1e-10);
    }

    #[test]
    fn test_score_matches_stored() {
        let plan = sample_plan();
        assert_eq!(&evaluate(&plan), plan.score());
    }

    #[test]
    fn test_evaluate_idempotent() {
        let plan = sample_plan();
        assert_eq!(evaluate(&plan), evaluate(&plan));
    }

    #[test]
    fn test_empty_plan_score() {
        let score = evaluate(&Plan::empty());
        assert_eq!(score.assigned_tonnage_t, 0);
        assert_eq!(score.demand_tonnage_t, 0);
        assert_eq!(score.utilization, 0.0);
        assert_eq!(score.coverage, 1.0);
        assert_eq!(score.unassignable_count, 0);
        assert!(score.meets_thresholds(1.0, 0.0));
    }

    #[test]
    fn test_nothing_assigned() {
        let plan = Plan::from_parts(
            Vec::new(),
            vec![Unassignable::new("D1", 500, UnassignableReason::WindowConflict)],
        );
        let score = evaluate(&plan);
        assert_eq!(score.utilization, 0.0);
        assert_eq!(score.coverage, 0.0);
        assert!(!score.meets_thresholds(0.5, 0.0));
    }

    #[test]
    fn test_capacity_violation() {
        let plan = Plan::from_parts(
            vec![Assignment::new("V1", "D1", 90_000, TimeWindow::new(0, 10), 80_000)],
            Vec::new(),
        );
        let found = violations(&plan);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].violation_type, ViolationType::CapacityExceeded);
        assert_eq!(plan.score().violation_count, 1);
        assert!(!plan.score().meets_thresholds(0.0, 0.0));
    }

    #[test]
    fn test_double_booking_violation() {
        let plan = Plan::from_parts(
            vec![
                Assignment::new("V1", "D1", 10, TimeWindow::new(0, 100), 80),
                Assignment::new("V1", "D2", 10, TimeWindow::new(99, 150), 80),
                Assignment::new("V1", "D3", 10, TimeWindow::new(150, 200), 80),
            ],
            Vec::new(),
        );
        let found = violations(&plan);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].violation_type, ViolationType::VesselDoubleBooked);
        assert_eq!(found[0].entity_id, "V1");
    }

    #[test]
    fn test_duplicate_demand_violation() {
        let plan = Plan::from_parts(
            vec![
                Assignment::new("V1", "D1", 10, TimeWindow::new(0, 100), 80),
                Assignment::new("V2", "D1", 10, TimeWindow::new(0, 100), 80),
            ],
            Vec::new(),
        );
        let found = violations(&plan);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].violation_type, ViolationType::DuplicateDemand);
    }

    #[test]
    fn test_fleet_report() {
        let vessels = vec![
            Vessel::panamax("V2", 80_000, TimeWindow::new(0, 1000)),
            Vessel::capesize("V1", 180_000, TimeWindow::new(0, 1000)),
            Vessel::capesize("V3", 180_000, TimeWindow::new(0, 1000)),
            Vessel::capesize("V4", 180_000, TimeWindow::new(0, 1000))
                .with_status(VesselStatus::Maintenance),
        ];
        let report = FleetReport::build(&sample_plan(), &vessels);

        let ids: Vec<_> = report.vessels.iter().map(|u| u.vessel_id.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V2", "V3"]);
        assert_eq!(report.used_vessel_count, 2);
        assert_eq!(report.idle_vessel_count, 1);

        let v1 = report.vessel("V1").unwrap();
        assert_eq!(v1.voyages, 1);
        assert_eq!(v1.busy_ms, 100);
        assert_eq!(v1.idle_ms, 900);
        assert!((v1.utilization - 150.0 / 180.0).abs() < 1e-10);

        let v3 = report.vessel("V3").unwrap();
        assert_eq!(v3.voyages, 0);
        assert_eq!(v3.utilization, 0.0);
        assert_eq!(v3.idle_ms, 1000);
        assert_eq!(report.total_idle_ms, 900 + 900 + 1000);
        assert!(report.vessel("V4").is_none());

        // V1: 180/150 = 1.2, V2: 80/60 = 1.33
        assert_eq!(report.matches.len(), 2);
        assert!(report.matches.iter().all(|m| m.match_score == 100.0));
        assert_eq!(report.optimization_score, 100.0);
    }

    #[test]
    fn test_match_score() {
        assert_eq!(match_score(100, 150), 100.0);
        assert_eq!(match_score(100, 200), 100.0);
        assert_eq!(match_score(100, 201), 80.0);
        assert!((match_score(100, 50) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_optimization_score_is_mean() {
        let plan = Plan::from_parts(
            vec![
                Assignment::new("V1", "D1", 10_000, TimeWindow::new(0, 10), 180_000),
                Assignment::new("V2", "D2", 60_000, TimeWindow::new(0, 10), 80_000),
            ],
            Vec::new(),
        );
        let vessels = vec![
            Vessel::capesize("V1", 180_000, TimeWindow::new(0, 100)),
            Vessel::panamax("V2", 80_000, TimeWindow::new(0, 100)),
        ];
        let report = FleetReport::build(&plan, &vessels);
        assert!((report.optimization_score - 90.0).abs() < 1e-12);
        assert_eq!(FleetReport::build(&Plan::empty(), &vessels).optimization_score, 0.0);
    }

    #[test]
    fn test_huge_unassignable_tonnage_saturates() {
        let huge = i64::MAX / 2 + 1;
        let plan = Plan::from_parts(
            Vec::new(),
            vec![
                Unassignable::new("D1", huge, UnassignableReason::NoCompatibleVessel),
                Unassignable::new("D2", huge, UnassignableReason::NoCompatibleVessel),
            ],
        );
        let score = evaluate(&plan);
        assert_eq!(score.demand_tonnage_t, i64::MAX);
        assert_eq!(score.assigned_tonnage_t, 0);
        assert_eq!(score.coverage, 0.0);
    }

    #[test]
    fn test_report_with_unbounded_availability() {
        let vessels = vec![Vessel::panamax("V1", 80_000, TimeWindow::new(i64::MIN, i64::MAX))];
        let plan = Plan::from_parts(
            vec![Assignment::new("V1", "D1", 10, TimeWindow::new(0, 10), 80_000)],
            Vec::new(),
        );
        let report = FleetReport::build(&plan, &vessels);
        let v1 = report.vessel("V1").unwrap();
        assert_eq!(v1.busy_ms, 10);
        assert_eq!(v1.idle_ms, i64::MAX - 10);
        assert_eq!(report.total_idle_ms, i64::MAX - 10);
    }
}
