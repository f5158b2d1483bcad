//! Input validation for allocation runs.
//!
//! Checks structural integrity of vessel and demand snapshots before
//! optimization. Detects:
//! - Duplicate or empty IDs
//! - Non-positive tonnage and capacity
//! - Deadweight above [`MAX_DEADWEIGHT_T`]
//! - Inverted windows (availability, maintenance, loading)
//!
//! All problems are collected; validation does not stop at the first one.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Demand, TimeWindow, Vessel, MAX_DEADWEIGHT_T};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// A demand requires zero or negative tonnage.
    NonPositiveTonnage,
    /// A vessel has zero or negative deadweight.
    NonPositiveCapacity,
    /// A vessel's deadweight is above the plausible maximum.
    ExcessiveCapacity,
    /// A window does not satisfy `start < end`.
    InvertedWindow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input snapshots of an allocation run.
///
/// Checks:
/// 1. No empty or duplicate vessel IDs
/// 2. Vessel deadweight in `1..=MAX_DEADWEIGHT_T`
/// 3. Vessel availability and maintenance windows well formed
/// 4. No empty or duplicate demand IDs
/// 5. Demand tonnage positive
/// 6. Demand loading window well formed
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(vessels: &[Vessel], demands: &[Demand]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut vessel_ids = HashSet::new();
    for v in vessels {
        check_id("vessel", &v.id, &mut vessel_ids, &mut errors);
        validate_vessel(v, &mut errors);
    }

    let mut demand_ids = HashSet::new();
    for d in demands {
        check_id("demand", &d.id, &mut demand_ids, &mut errors);
        validate_demand(d, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single vessel record, appending problems to `errors`.
pub fn validate_vessel(vessel: &Vessel, errors: &mut Vec<ValidationError>) {
    if vessel.capacity_t <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveCapacity,
            format!(
                "Vessel '{}' has non-positive deadweight {}",
                vessel.id, vessel.capacity_t
            ),
        ));
    } else if vessel.capacity_t > MAX_DEADWEIGHT_T {
        errors.push(ValidationError::new(
            ValidationErrorKind::ExcessiveCapacity,
            format!(
                "Vessel '{}' deadweight {} exceeds {MAX_DEADWEIGHT_T}",
                vessel.id, vessel.capacity_t
            ),
        ));
    }

    check_window(
        &vessel.availability,
        || format!("Vessel '{}' availability window", vessel.id),
        errors,
    );
    for m in &vessel.maintenance_windows {
        check_window(
            m,
            || format!("Vessel '{}' maintenance window", vessel.id),
            errors,
        );
    }
}

/// Validates a single demand record, appending problems to `errors`.
pub fn validate_demand(demand: &Demand, errors: &mut Vec<ValidationError>) {
    if demand.tonnage_t <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveTonnage,
            format!(
                "Demand '{}' has non-positive tonnage {}",
                demand.id, demand.tonnage_t
            ),
        ));
    }
    check_window(
        &demand.loading_window,
        || format!("Demand '{}' loading window", demand.id),
        errors,
    );
}

fn check_id<'a>(
    entity: &str,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if id.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            format!("Empty {entity} ID"),
        ));
    } else if !seen.insert(id) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate {entity} ID: {id}"),
        ));
    }
}

fn check_window(
    window: &TimeWindow,
    label: impl FnOnce() -> String,
    errors: &mut Vec<ValidationError>,
) {
    if !window.is_well_formed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedWindow,
            format!(
                "{} [{}, {}) is inverted or empty",
                label(),
                window.start_ms,
                window.end_ms
            ),
        ));
    }
}
