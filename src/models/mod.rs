//! Fleet allocation domain models.
//!
//! Provides the core data types for allocation inputs (vessel and demand
//! snapshots) and outputs (plans).
//!
//! # Domain Mappings
//!
//! | u-fleet | Bulk shipping | Scheduling analogue |
//! |---------|---------------|---------------------|
//! | Vessel | Ship (shuttle, panamax, capesize) | Resource |
//! | Demand | Cargo nomination / lifting | Task |
//! | Assignment | Fixture | Assignment |
//! | Plan | Lineup | Schedule |

mod demand;
mod plan;
mod vessel;
mod window;

pub use demand::{Demand, DemandSet, RequiredClass};
pub use plan::{Assignment, Plan, Unassignable, UnassignableReason, Violation, ViolationType};
pub use vessel::{Vessel, VesselClass, VesselStatus, MAX_DEADWEIGHT_T};
pub use window::TimeWindow;
