//! Error types.
//!
//! Run-level failures abort an optimization run and return no plan.
//! Per-demand unassignability is not an error; it is recorded in the
//! [`Plan`](crate::models::Plan).

use thiserror::Error;

use crate::models::VesselStatus;
use crate::validation::ValidationError;

/// Errors that abort an optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Malformed vessel or demand records.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// The fleet snapshot holds no vessel at all.
    #[error("fleet snapshot is empty")]
    EmptyFleet,
    /// The run was cancelled before completion.
    #[error("optimization run cancelled")]
    Cancelled,
}

/// Errors raised by [`FleetRegistry`](crate::registry::FleetRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No vessel with this ID.
    #[error("unknown vessel '{0}'")]
    UnknownVessel(String),
    /// A vessel with this ID is already registered.
    #[error("duplicate vessel '{0}'")]
    DuplicateVessel(String),
    /// The status change is not allowed.
    #[error("vessel '{id}' cannot go from {from} to {to}")]
    InvalidTransition {
        /// Vessel ID.
        id: String,
        /// Current status.
        from: VesselStatus,
        /// Requested status.
        to: VesselStatus,
    },
    /// The vessel is referenced by an active assignment.
    #[error("vessel '{0}' is assigned and cannot be removed")]
    VesselInUse(String),
    /// A plan references a vessel that is not available anymore.
    #[error("vessel '{id}' is {status}, not available")]
    VesselNotAvailable {
        /// Vessel ID.
        id: String,
        /// Current status.
        status: VesselStatus,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
