//! Demand (shipment requirement) model.
//!
//! A demand asks for one vessel to lift a given tonnage inside a loading
//! window. Demands are immutable once admitted to a [`DemandSet`]; a
//! changed requirement is issued as a new demand with a new ID.

use serde::{Deserialize, Serialize};

use super::{TimeWindow, VesselClass};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A shipment requirement to be matched to a vessel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// Unique demand identifier.
    pub id: String,
    /// Vessel class the shipment needs.
    pub required_class: RequiredClass,
    /// Cargo to lift (t).
    pub tonnage_t: i64,
    /// Period in which loading must happen.
    pub loading_window: TimeWindow,
    /// Discharge port.
    pub destination: String,
    /// Commercial priority (higher = more important). Used only by
    /// ordering rules that ask for it.
    pub priority: i32,
}

/// Class constraint of a demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredClass {
    /// Any vessel class is acceptable.
    Any,
    /// Only this class is acceptable.
    Class(VesselClass),
}

impl RequiredClass {
    /// Whether a vessel of `class` satisfies this requirement.
    #[inline]
    pub fn accepts(&self, class: VesselClass) -> bool {
        match self {
            Self::Any => true,
            Self::Class(required) => *required == class,
        }
    }
}

impl From<VesselClass> for RequiredClass {
    fn from(class: VesselClass) -> Self {
        Self::Class(class)
    }
}

impl Demand {
    /// Creates a demand accepting any vessel class.
    pub fn new(id: impl Into<String>, tonnage_t: i64, loading_window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            required_class: RequiredClass::Any,
            tonnage_t,
            loading_window,
            destination: String::new(),
            priority: 0,
        }
    }

    /// Restricts the demand to one vessel class.
    pub fn with_class(mut self, class: VesselClass) -> Self {
        self.required_class = RequiredClass::Class(class);
        self
    }

    /// Sets the destination.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Demands admitted to an optimization run.
///
/// Keeps admission order and rejects duplicate IDs. There is no way to
/// mutate an admitted demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandSet {
    demands: Vec<Demand>,
}

impl DemandSet {
    /// Creates an empty demand set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a demand.
    ///
    /// Fails with [`ValidationErrorKind::DuplicateId`] if a demand with the
    /// same ID was already admitted.
    pub fn admit(&mut self, demand: Demand) -> Result<(), ValidationError> {
        if self.get(&demand.id).is_some() {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate demand ID: {}", demand.id),
            ));
        }
        self.demands.push(demand);
        Ok(())
    }

    /// Admits a demand, builder style.
    pub fn with_demand(mut self, demand: Demand) -> Result<Self, ValidationError> {
        self.admit(demand)?;
        Ok(self)
    }

    /// Finds a demand by ID.
    pub fn get(&self, id: &str) -> Option<&Demand> {
        self.demands.iter().find(|d| d.id == id)
    }

    /// Sum of required tonnage, saturating at `i64::MAX`.
    pub fn total_tonnage_t(&self) -> i64 {
        self.demands
            .iter()
            .fold(0i64, |acc, d| acc.saturating_add(d.tonnage_t))
    }

    /// Admitted demands in admission order.
    pub fn as_slice(&self) -> &[Demand] {
        &self.demands
    }

    /// Number of demands.
    pub fn len(&self) -> usize {
        self.demands.len()
    }

    /// Whether no demand was admitted.
    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }
}
