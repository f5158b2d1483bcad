//! Demand ordering rules and rule engine.
//!
//! The greedy pass of the optimizer commits demands one at a time, so the
//! processing order decides which demand wins a contested vessel. This
//! module provides priority rules over demands and a composable engine
//! for multi-criteria ordering.
//!
//! # Usage
//!
//! ```
//! use u_fleet::models::{Demand, TimeWindow};
//! use u_fleet::ordering::{rules, DemandOrdering, OrderingContext};
//!
//! let ordering = DemandOrdering::largest_first().then(rules::EarliestLoading);
//!
//! let demands = vec![
//!     Demand::new("late", 5_000, TimeWindow::new(900, 1_000)),
//!     Demand::new("early", 5_000, TimeWindow::new(100, 200)),
//! ];
//! let order = ordering.sort_indices(&demands, &OrderingContext::new());
//! assert_eq!(order, vec![1, 0]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::OrderingContext;
pub use engine::DemandOrdering;

use crate::models::Demand;
use std::fmt::Debug;

/// Score returned by a demand rule.
///
/// Lower scores = processed earlier.
pub type RuleScore = f64;

/// A rule that evaluates how early a demand should be processed.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// demands that should be committed first.
pub trait DemandRule: Send + Sync + Debug {
    /// Rule name (e.g., "LARGEST", "EARLIEST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a demand given the ordering context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, demand: &Demand, context: &OrderingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
