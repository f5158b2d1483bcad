//! Fleet registry.
//!
//! Holds the current vessel records, hands out detached snapshots for
//! optimization runs, and applies status changes. Vessels are mutated only
//! through explicit transitions; an accepted plan is committed as one
//! all-or-nothing operation.
//!
//! The registry is a plain value. Callers that share it between threads
//! wrap it in their own lock so that plan commits are serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::models::{Plan, Vessel, VesselClass, VesselStatus};

/// Queryable store of vessel records, keyed by vessel ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetRegistry {
    vessels: BTreeMap<String, Vessel>,
}

/// Aggregate view of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetOverview {
    /// Number of vessels.
    pub vessel_count: usize,
    /// Vessel count per status.
    pub by_status: BTreeMap<VesselStatus, usize>,
    /// Vessel count per class.
    pub by_class: BTreeMap<VesselClass, usize>,
    /// Σ deadweight per class (t).
    pub deadweight_by_class: BTreeMap<VesselClass, i64>,
    /// Σ deadweight of all vessels (t).
    pub total_deadweight_t: i64,
    /// Σ deadweight of available vessels (t).
    pub available_deadweight_t: i64,
}

impl FleetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from vessel records.
    ///
    /// Fails on the first duplicate ID.
    pub fn from_vessels(vessels: impl IntoIterator<Item = Vessel>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for v in vessels {
            registry.insert(v)?;
        }
        Ok(registry)
    }

    /// Registers a vessel.
    pub fn insert(&mut self, vessel: Vessel) -> Result<(), RegistryError> {
        if self.vessels.contains_key(&vessel.id) {
            return Err(RegistryError::DuplicateVessel(vessel.id));
        }
        self.vessels.insert(vessel.id.clone(), vessel);
        Ok(())
    }

    /// Removes a vessel record.
    ///
    /// Assigned vessels are referenced by an active plan and cannot be
    /// removed; release them first.
    pub fn remove(&mut self, id: &str) -> Result<Vessel, RegistryError> {
        let vessel = self
            .vessels
            .get(id)
            .ok_or_else(|| RegistryError::UnknownVessel(id.to_string()))?;
        if vessel.status == VesselStatus::Assigned {
            return Err(RegistryError::VesselInUse(id.to_string()));
        }
        self.vessels
            .remove(id)
            .ok_or_else(|| RegistryError::UnknownVessel(id.to_string()))
    }

    /// Finds a vessel.
    pub fn get(&self, id: &str) -> Option<&Vessel> {
        self.vessels.get(id)
    }

    /// Number of vessels.
    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    /// Whether the registry holds no vessel.
    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    /// Iterates vessels in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.values()
    }

    /// Detached copy of all vessel records, ordered by ID.
    pub fn snapshot(&self) -> Vec<Vessel> {
        self.vessels.values().cloned().collect()
    }

    /// Changes the status of a vessel.
    ///
    /// Returns the previous status.
    pub fn transition(&mut self, id: &str, to: VesselStatus) -> Result<VesselStatus, RegistryError> {
        let vessel = self
            .vessels
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownVessel(id.to_string()))?;
        let from = vessel.status;
        if !from.can_transition_to(to) {
            return Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                from,
                to,
            });
        }
        vessel.status = to;
        debug!(vessel = id, %from, %to, "vessel status changed");
        Ok(from)
    }

    /// Releases an assigned vessel back to the available pool.
    pub fn release(&mut self, id: &str) -> Result<(), RegistryError> {
        self.transition(id, VesselStatus::Available).map(|_| ())
    }

    /// Commits an accepted plan: every vessel it uses becomes `Assigned`.
    ///
    /// All-or-nothing: if any vessel is unknown or no longer available,
    /// nothing changes.
    pub fn apply_plan(&mut self, plan: &Plan) -> Result<(), RegistryError> {
        let ids = plan.vessel_ids();
        for id in &ids {
            let vessel = self
                .vessels
                .get(*id)
                .ok_or_else(|| RegistryError::UnknownVessel(id.to_string()))?;
            if vessel.status != VesselStatus::Available {
                return Err(RegistryError::VesselNotAvailable {
                    id: id.to_string(),
                    status: vessel.status,
                });
            }
        }
        for id in &ids {
            if let Some(vessel) = self.vessels.get_mut(*id) {
                vessel.status = VesselStatus::Assigned;
            }
        }
        debug!(vessels = ids.len(), "plan committed");
        Ok(())
    }

    /// Counts and deadweight totals of the fleet.
    pub fn overview(&self) -> FleetOverview {
        let mut by_status = BTreeMap::new();
        let mut by_class = BTreeMap::new();
        let mut deadweight_by_class = BTreeMap::new();
        let mut total_deadweight_t = 0;
        let mut available_deadweight_t = 0;

        for v in self.vessels.values() {
            *by_status.entry(v.status).or_insert(0) += 1;
            *by_class.entry(v.class).or_insert(0) += 1;
            *deadweight_by_class.entry(v.class).or_insert(0) += v.capacity_t;
            total_deadweight_t += v.capacity_t;
            if v.is_available() {
                available_deadweight_t += v.capacity_t;
            }
        }

        FleetOverview {
            vessel_count: self.vessels.len(),
            by_status,
            by_class,
            deadweight_by_class,
            total_deadweight_t,
            available_deadweight_t,
        }
    }
}
