//! Fleet allocation framework.
//!
//! Assigns cargo demands to vessels of a fleet snapshot so that as much
//! tonnage as possible is lifted with as little idle deadweight as
//! possible, under capacity, class, availability and loading-window
//! constraints.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Vessel`, `Demand`, `TimeWindow`, `Plan`,
//!   `Assignment`, `Unassignable`
//! - **`validation`**: Input integrity checks (duplicate IDs, tonnage,
//!   deadweight bounds, window shape)
//! - **`filter`**: Compatibility filter producing best-fit candidate vessels
//! - **`ordering`**: Composable demand-ordering rules for the greedy pass
//! - **`optimizer`**: Greedy construction plus local improvement
//! - **`evaluator`**: Plan scoring, violation detection, per-vessel report
//! - **`registry`**: Vessel store with status transitions and plan commit
//! - **`error`**: Run-level and registry errors
//!
//! # Flow
//!
//! ```text
//! FleetRegistry::snapshot ─┐
//!                          ├─► FleetOptimizer::optimize ─► Plan ─► evaluator
//! DemandSet ───────────────┘                                 │
//!                                   FleetRegistry::apply_plan ◄┘
//! ```
//!
//! # Units
//!
//! Tonnage and deadweight are integer tonnes; times are integer
//! milliseconds. Windows are half-open `[start, end)`.

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod models;
pub mod optimizer;
pub mod ordering;
pub mod registry;
pub mod validation;
