//! Optimizer configuration.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::evaluator::PlanScore;
use crate::ordering::DemandOrdering;

/// Tunable knobs of a [`FleetOptimizer`](super::FleetOptimizer) run.
///
/// Deserializes with defaults for missing fields, so a service can load
/// it from a partial JSON or TOML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Local-improvement iteration cap, as a multiple of the demand count.
    pub iteration_multiplier: usize,
    /// How candidate solutions are compared.
    pub objective: Objective,
    /// Demand processing order of the greedy pass.
    pub ordering: OrderingStrategy,
    /// Whether to run local improvement after the greedy pass.
    pub improve: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            iteration_multiplier: 3,
            objective: Objective::Lexicographic,
            ordering: OrderingStrategy::LargestFirst,
            improve: true,
        }
    }
}

impl OptimizerConfig {
    /// Sets the iteration multiplier.
    pub fn with_iteration_multiplier(mut self, multiplier: usize) -> Self {
        self.iteration_multiplier = multiplier;
        self
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the demand processing order.
    pub fn with_ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Disables local improvement (greedy pass only).
    pub fn greedy_only(mut self) -> Self {
        self.improve = false;
        self
    }

    /// Iteration cap for a run over `demand_count` demands.
    pub fn iteration_cap(&self, demand_count: usize) -> usize {
        self.iteration_multiplier.saturating_mul(demand_count)
    }
}

/// Named demand orderings selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    /// See [`DemandOrdering::largest_first`].
    #[default]
    LargestFirst,
    /// See [`DemandOrdering::scarcest_first`].
    ScarcestFirst,
    /// See [`DemandOrdering::earliest_first`].
    EarliestFirst,
}

impl OrderingStrategy {
    /// Builds the ordering.
    pub fn build(&self) -> DemandOrdering {
        match self {
            Self::LargestFirst => DemandOrdering::largest_first(),
            Self::ScarcestFirst => DemandOrdering::scarcest_first(),
            Self::EarliestFirst => DemandOrdering::earliest_first(),
        }
    }
}

/// Fleet-efficiency objective.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Maximize assigned tonnage; among equal tonnage, minimize idle
    /// capacity.
    #[default]
    Lexicographic,
    /// Maximize `tonnage_weight * assigned - idle_weight * idle`.
    Weighted {
        /// Weight of assigned tonnage.
        tonnage_weight: f64,
        /// Weight of idle capacity.
        idle_weight: f64,
    },
}

impl Objective {
    const EPSILON: f64 = 1e-9;

    /// Orders two solutions by their totals; `Greater` means `a` is better.
    pub fn compare_totals(
        &self,
        a_assigned_t: i64,
        a_idle_t: i64,
        b_assigned_t: i64,
        b_idle_t: i64,
    ) -> Ordering {
        match *self {
            Self::Lexicographic => a_assigned_t
                .cmp(&b_assigned_t)
                .then_with(|| b_idle_t.cmp(&a_idle_t)),
            Self::Weighted {
                tonnage_weight,
                idle_weight,
            } => {
                let a = tonnage_weight * a_assigned_t as f64 - idle_weight * a_idle_t as f64;
                let b = tonnage_weight * b_assigned_t as f64 - idle_weight * b_idle_t as f64;
                if (a - b).abs() <= Self::EPSILON {
                    Ordering::Equal
                } else {
                    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
                }
            }
        }
    }

    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn improves(&self, candidate: &PlanScore, incumbent: &PlanScore) -> bool {
        self.compare_totals(
            candidate.assigned_tonnage_t,
            candidate.idle_capacity_t,
            incumbent.assigned_tonnage_t,
            incumbent.idle_capacity_t,
        ) == Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, TimeWindow};

    fn score(tonnage_t: i64, capacity_t: i64) -> PlanScore {
        PlanScore::calculate(
            &[Assignment::new("V1", "D1", tonnage_t, TimeWindow::new(0, 10), capacity_t)],
            &[],
        )
    }

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.iteration_multiplier, 3);
        assert_eq!(config.objective, Objective::Lexicographic);
        assert_eq!(config.ordering, OrderingStrategy::LargestFirst);
        assert!(config.improve);
        assert_eq!(config.iteration_cap(7), 21);
        assert_eq!(config.iteration_cap(0), 0);
    }

    #[test]
    fn test_lexicographic() {
        let obj = Objective::Lexicographic;
        assert!(obj.improves(&score(100, 200), &score(90, 90)));
        assert!(obj.improves(&score(100, 120), &score(100, 200)));
        assert!(!obj.improves(&score(100, 200), &score(100, 200)));
        assert!(!obj.improves(&score(90, 90), &score(100, 200)));
    }

    #[test]
    fn test_weighted() {
        let obj = Objective::Weighted {
            tonnage_weight: 1.0,
            idle_weight: 2.0,
        };
        // 100 - 2*100 = -100 vs 90 - 2*0 = 90
        assert!(obj.improves(&score(90, 90), &score(100, 200)));
        assert!(!obj.improves(&score(100, 200), &score(90, 90)));
        assert_eq!(obj.compare_totals(10, 0, 10, 0), Ordering::Equal);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: OptimizerConfig = serde_json::from_str(r#"{"iteration_multiplier": 5}"#).unwrap();
        assert_eq!(config.iteration_multiplier, 5);
        assert_eq!(config.objective, Objective::Lexicographic);
        assert!(config.improve);

        let config: OptimizerConfig = serde_json::from_str(
            r#"{"objective": {"kind": "weighted", "tonnage_weight": 1.0, "idle_weight": 0.25}, "ordering": "scarcest_first", "improve": false}"#,
        )
        .unwrap();
        assert_eq!(
            config.objective,
            Objective::Weighted {
                tonnage_weight: 1.0,
                idle_weight: 0.25
            }
        );
        assert_eq!(config.ordering, OrderingStrategy::ScarcestFirst);
        assert!(!config.improve);
    }

    #[test]
    fn test_ordering_strategy_build() {
        assert_eq!(OrderingStrategy::LargestFirst.build().rule_names(), vec!["LARGEST"]);
        assert_eq!(
            OrderingStrategy::ScarcestFirst.build().rule_names(),
            vec!["FEWEST", "LARGEST"]
        );
        assert_eq!(
            OrderingStrategy::EarliestFirst.build().rule_names(),
            vec!["EARLIEST", "LARGEST"]
        );
    }

    #[test]
    fn test_builders() {
        let config = OptimizerConfig::default()
            .with_iteration_multiplier(1)
            .with_objective(Objective::Weighted {
                tonnage_weight: 2.0,
                idle_weight: 1.0,
            })
            .with_ordering(OrderingStrategy::EarliestFirst)
            .greedy_only();
        assert_eq!(config.iteration_multiplier, 1);
        assert_eq!(config.ordering, OrderingStrategy::EarliestFirst);
        assert!(!config.improve);
    }
}
