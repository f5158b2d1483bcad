//! Vessel model.
//!
//! Vessels are the entities demands are allocated to. Each vessel has a
//! class, a deadweight capacity, an availability window, an operational
//! status, and optional planned maintenance periods.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TimeWindow;

/// Largest deadweight tonnage accepted for a vessel record.
pub const MAX_DEADWEIGHT_T: i64 = 500_000;

/// A vessel that can be assigned to demands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    /// Unique vessel identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Size/type classification.
    pub class: VesselClass,
    /// Deadweight tonnage (t).
    pub capacity_t: i64,
    /// Period during which the vessel can be chartered.
    pub availability: TimeWindow,
    /// Operational status.
    pub status: VesselStatus,
    /// Current location (port, anchorage, "at sea").
    pub location: String,
    /// Planned maintenance periods. A vessel cannot load during these.
    pub maintenance_windows: Vec<TimeWindow>,
}

/// Vessel size classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselClass {
    /// Short-haul transfer vessel between loading berth and anchorage.
    Shuttle,
    /// Largest class able to transit the Panama Canal.
    Panamax,
    /// Bulk carrier too large for Panama or Suez.
    Capesize,
}

/// Vessel operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselStatus {
    /// Free for new assignments.
    Available,
    /// Committed to an accepted plan.
    Assigned,
    /// Out of service for maintenance.
    Maintenance,
    /// Permanently out of service.
    Retired,
}

impl VesselClass {
    /// All classes, in size order.
    pub const ALL: [VesselClass; 3] = [Self::Shuttle, Self::Panamax, Self::Capesize];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shuttle => "shuttle",
            Self::Panamax => "panamax",
            Self::Capesize => "capesize",
        }
    }
}

impl VesselStatus {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
        }
    }

    /// Whether the status may change from `self` to `next`.
    ///
    /// Retired is terminal. An assigned vessel must be released before it
    /// can go into maintenance or be retired; a vessel in maintenance
    /// returns to service before it can be retired.
    pub fn can_transition_to(&self, next: VesselStatus) -> bool {
        use VesselStatus::*;
        matches!(
            (self, next),
            (Available, Assigned)
                | (Available, Maintenance)
                | (Available, Retired)
                | (Assigned, Available)
                | (Maintenance, Available)
        )
    }
}

impl fmt::Display for VesselClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VesselStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Vessel {
    /// Creates a new available vessel.
    pub fn new(
        id: impl Into<String>,
        class: VesselClass,
        capacity_t: i64,
        availability: TimeWindow,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            class,
            capacity_t,
            availability,
            status: VesselStatus::Available,
            location: String::new(),
            maintenance_windows: Vec::new(),
        }
    }

    /// Creates a shuttle.
    pub fn shuttle(id: impl Into<String>, capacity_t: i64, availability: TimeWindow) -> Self {
        Self::new(id, VesselClass::Shuttle, capacity_t, availability)
    }

    /// Creates a panamax.
    pub fn panamax(id: impl Into<String>, capacity_t: i64, availability: TimeWindow) -> Self {
        Self::new(id, VesselClass::Panamax, capacity_t, availability)
    }

    /// Creates a capesize.
    pub fn capesize(id: impl Into<String>, capacity_t: i64, availability: TimeWindow) -> Self {
        Self::new(id, VesselClass::Capesize, capacity_t, availability)
    }

    /// Sets the vessel name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: VesselStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the current location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Adds a planned maintenance period.
    pub fn with_maintenance(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.maintenance_windows
            .push(TimeWindow::new(start_ms, end_ms));
        self
    }

    /// Whether the vessel is open for new assignments.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == VesselStatus::Available
    }

    /// Whether the vessel can load during the whole `window`.
    ///
    /// The window must lie inside the availability window and must not
    /// touch any maintenance period.
    pub fn can_serve_window(&self, window: &TimeWindow) -> bool {
        self.availability.contains_window(window)
            && !self.maintenance_windows.iter().any(|m| m.overlaps(window))
    }
}
