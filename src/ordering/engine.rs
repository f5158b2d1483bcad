//! Demand ordering.
//!
//! Demands are ranked by a chain of rules: the first rule decides, each
//! later rule only separates demands the earlier ones score equal, and the
//! demand ID settles whatever remains. The final ID step makes every
//! ordering total, so the greedy pass does not depend on input order.
//!
//! Rule scores are computed once per demand, then compared as keys.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DemandRule, OrderingContext, RuleScore};
use crate::models::Demand;

/// Scores closer than this compare equal.
const EPSILON: f64 = 1e-9;

/// Chain of demand rules deciding the greedy processing order.
#[derive(Debug, Clone)]
pub struct DemandOrdering {
    rules: Vec<Arc<dyn DemandRule>>,
}

impl DemandOrdering {
    /// Demand ID order only.
    pub fn by_id() -> Self {
        Self { rules: Vec::new() }
    }

    /// Largest tonnage first. The optimizer's default.
    ///
    /// Big liftings have the fewest vessels able to carry them.
    pub fn largest_first() -> Self {
        Self::by_id().then(rules::LargestTonnage)
    }

    /// Fewest compatible vessels first, then largest tonnage.
    pub fn scarcest_first() -> Self {
        Self::by_id()
            .then(rules::FewestCandidates)
            .then(rules::LargestTonnage)
    }

    /// Earliest loading window first, then largest tonnage.
    pub fn earliest_first() -> Self {
        Self::by_id()
            .then(rules::EarliestLoading)
            .then(rules::LargestTonnage)
    }

    /// Appends a rule consulted only when all previous rules tie.
    pub fn then<R: DemandRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the rules, in consultation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Processing order of `demands`, as indices into the slice.
    pub fn sort_indices(&self, demands: &[Demand], context: &OrderingContext) -> Vec<usize> {
        let keys: Vec<Vec<RuleScore>> = demands
            .iter()
            .map(|d| self.rules.iter().map(|r| r.evaluate(d, context)).collect())
            .collect();

        let mut indices: Vec<usize> = (0..demands.len()).collect();
        indices.sort_by(|&a, &b| {
            compare_keys(&keys[a], &keys[b]).then_with(|| demands[a].id.cmp(&demands[b].id))
        });
        indices
    }
}

impl Default for DemandOrdering {
    fn default() -> Self {
        Self::largest_first()
    }
}

fn compare_keys(a: &[RuleScore], b: &[RuleScore]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            if (x - y).abs() <= EPSILON {
                Ordering::Equal
            } else {
                x.total_cmp(y)
            }
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeWindow, VesselClass};

    fn make_demand(id: &str, tonnage_t: i64, start_ms: i64) -> Demand {
        Demand::new(id, tonnage_t, TimeWindow::new(start_ms, start_ms + 100))
    }

    fn ordered_ids(ordering: &DemandOrdering, demands: &[Demand], context: &OrderingContext) -> Vec<String> {
        ordering
            .sort_indices(demands, context)
            .into_iter()
            .map(|i| demands[i].id.clone())
            .collect()
    }

    #[test]
    fn test_largest_first() {
        let demands = vec![
            make_demand("small", 10_000, 0),
            make_demand("large", 150_000, 0),
            make_demand("medium", 70_000, 0),
        ];
        assert_eq!(
            ordered_ids(&DemandOrdering::largest_first(), &demands, &OrderingContext::new()),
            vec!["large", "medium", "small"]
        );
    }

    #[test]
    fn test_ties_fall_back_to_id() {
        let demands = vec![
            make_demand("D2", 1000, 0),
            make_demand("D10", 1000, 0),
            make_demand("D1", 1000, 0),
        ];
        assert_eq!(
            ordered_ids(&DemandOrdering::largest_first(), &demands, &OrderingContext::new()),
            vec!["D1", "D10", "D2"]
        );
        assert_eq!(
            ordered_ids(&DemandOrdering::by_id(), &demands, &OrderingContext::new()),
            vec!["D1", "D10", "D2"]
        );
    }

    #[test]
    fn test_later_rule_only_breaks_ties() {
        let demands = vec![
            make_demand("late", 5000, 900),
            make_demand("early", 5000, 100),
            make_demand("big", 6000, 5000),
        ];
        let ordering = DemandOrdering::largest_first().then(rules::EarliestLoading);
        assert_eq!(
            ordered_ids(&ordering, &demands, &OrderingContext::new()),
            vec!["big", "early", "late"]
        );
    }

    #[test]
    fn test_scarcest_first() {
        let demands = vec![
            make_demand("common", 90_000, 0),
            make_demand("rare", 1000, 0).with_class(VesselClass::Shuttle),
            make_demand("rare_big", 2000, 0).with_class(VesselClass::Shuttle),
        ];
        let context = OrderingContext::new()
            .with_candidate_count("common", 4)
            .with_candidate_count("rare", 1)
            .with_candidate_count("rare_big", 1);
        assert_eq!(
            ordered_ids(&DemandOrdering::scarcest_first(), &demands, &context),
            vec!["rare_big", "rare", "common"]
        );
    }

    #[test]
    fn test_earliest_first() {
        let demands = vec![make_demand("A", 1000, 500), make_demand("B", 5000, 100)];
        assert_eq!(
            ordered_ids(&DemandOrdering::earliest_first(), &demands, &OrderingContext::new()),
            vec!["B", "A"]
        );
    }

    #[test]
    fn test_empty_demands() {
        assert!(DemandOrdering::default()
            .sort_indices(&[], &OrderingContext::new())
            .is_empty());
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(DemandOrdering::by_id().rule_names(), Vec::<&str>::new());
        assert_eq!(
            DemandOrdering::scarcest_first().rule_names(),
            vec!["FEWEST", "LARGEST"]
        );
        assert!(format!("{:?}", DemandOrdering::largest_first()).contains("LargestTonnage"));
    }
}
