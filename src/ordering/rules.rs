//! Built-in demand rules.
//!
//! # Categories
//!
//! - **Size**: LARGEST, SMALLEST
//! - **Time**: EARLIEST, TIGHTEST
//! - **Scarcity**: FEWEST, STRICT
//! - **Commercial**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for demands processed first.

use super::{DemandRule, OrderingContext, RuleScore};
use crate::models::{Demand, RequiredClass};

// ======================== Size rules ========================

/// Largest tonnage first.
///
/// Big liftings have the fewest vessels able to carry them, so committing
/// them first reduces fragmentation of the large-vessel pool.
#[derive(Debug, Clone, Copy)]
pub struct LargestTonnage;

impl DemandRule for LargestTonnage {
    fn name(&self) -> &'static str {
        "LARGEST"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        -(demand.tonnage_t as f64)
    }

    fn description(&self) -> &'static str {
        "Largest Tonnage First"
    }
}

/// Smallest tonnage first.
#[derive(Debug, Clone, Copy)]
pub struct SmallestTonnage;

impl DemandRule for SmallestTonnage {
    fn name(&self) -> &'static str {
        "SMALLEST"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        demand.tonnage_t as f64
    }

    fn description(&self) -> &'static str {
        "Smallest Tonnage First"
    }
}

// ======================== Time rules ========================

/// Earliest loading window start first.
#[derive(Debug, Clone, Copy)]
pub struct EarliestLoading;

impl DemandRule for EarliestLoading {
    fn name(&self) -> &'static str {
        "EARLIEST"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        demand.loading_window.start_ms as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Loading Window"
    }
}

/// Longest loading window first.
///
/// A long window blocks its vessel for longer; committing it early leaves
/// the short demands to fill remaining gaps.
#[derive(Debug, Clone, Copy)]
pub struct LongestWindow;

impl DemandRule for LongestWindow {
    fn name(&self) -> &'static str {
        "LONGEST"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        -(demand.loading_window.duration_ms() as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Loading Window"
    }
}

// ======================== Scarcity rules ========================

/// Fewest compatible vessels first.
///
/// Uses `context.candidate_counts`; demands without a known count are
/// processed last.
#[derive(Debug, Clone, Copy)]
pub struct FewestCandidates;

impl DemandRule for FewestCandidates {
    fn name(&self) -> &'static str {
        "FEWEST"
    }

    fn evaluate(&self, demand: &Demand, context: &OrderingContext) -> RuleScore {
        context
            .candidate_count(&demand.id)
            .map(|c| c as f64)
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Fewest Compatible Vessels"
    }
}

/// Class-restricted demands before any-class demands.
#[derive(Debug, Clone, Copy)]
pub struct StrictClassFirst;

impl DemandRule for StrictClassFirst {
    fn name(&self) -> &'static str {
        "STRICT"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        match demand.required_class {
            RequiredClass::Class(_) => 0.0,
            RequiredClass::Any => 1.0,
        }
    }

    fn description(&self) -> &'static str {
        "Class-Restricted First"
    }
}

// ======================== Commercial rules ========================

/// Highest commercial priority first.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DemandRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, demand: &Demand, _context: &OrderingContext) -> RuleScore {
        -(demand.priority as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeWindow, VesselClass};

    fn ctx() -> OrderingContext {
        OrderingContext::new()
    }

    #[test]
    fn test_size_rules() {
        let small = Demand::new("S", 1000, TimeWindow::new(0, 10));
        let large = Demand::new("L", 9000, TimeWindow::new(0, 10));
        assert!(LargestTonnage.evaluate(&large, &ctx()) < LargestTonnage.evaluate(&small, &ctx()));
        assert!(SmallestTonnage.evaluate(&small, &ctx()) < SmallestTonnage.evaluate(&large, &ctx()));
    }

    #[test]
    fn test_time_rules() {
        let early_short = Demand::new("A", 1, TimeWindow::new(0, 10));
        let late_long = Demand::new("B", 1, TimeWindow::new(50, 500));
        assert!(
            EarliestLoading.evaluate(&early_short, &ctx())
                < EarliestLoading.evaluate(&late_long, &ctx())
        );
        assert!(
            LongestWindow.evaluate(&late_long, &ctx()) < LongestWindow.evaluate(&early_short, &ctx())
        );
    }

    #[test]
    fn test_fewest_candidates() {
        let a = Demand::new("A", 1, TimeWindow::new(0, 10));
        let b = Demand::new("B", 1, TimeWindow::new(0, 10));
        let c = Demand::new("C", 1, TimeWindow::new(0, 10));
        let context = OrderingContext::new()
            .with_candidate_count("A", 3)
            .with_candidate_count("B", 1);

        assert!((FewestCandidates.evaluate(&b, &context) - 1.0).abs() < 1e-10);
        assert!(FewestCandidates.evaluate(&b, &context) < FewestCandidates.evaluate(&a, &context));
        assert_eq!(FewestCandidates.evaluate(&c, &context), f64::MAX);
    }

    #[test]
    fn test_strict_class_first() {
        let any = Demand::new("A", 1, TimeWindow::new(0, 10));
        let cape = Demand::new("C", 1, TimeWindow::new(0, 10)).with_class(VesselClass::Capesize);
        assert!(StrictClassFirst.evaluate(&cape, &ctx()) < StrictClassFirst.evaluate(&any, &ctx()));
    }

    #[test]
    fn test_priority_rule() {
        let low = Demand::new("L", 1, TimeWindow::new(0, 10)).with_priority(1);
        let high = Demand::new("H", 1, TimeWindow::new(0, 10)).with_priority(10);
        assert!(HighestPriority.evaluate(&high, &ctx()) < HighestPriority.evaluate(&low, &ctx()));
        assert_eq!(HighestPriority.description(), "PRIORITY");
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(LargestTonnage.name(), "LARGEST");
        assert_eq!(EarliestLoading.description(), "Earliest Loading Window");
        assert_eq!(FewestCandidates.name(), "FEWEST");
    }
}
