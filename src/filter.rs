//! Compatibility filter.
//!
//! Produces, for one demand, the vessels of a fleet snapshot that could
//! serve it, ordered so that tighter fits come first.
//!
//! # Eligibility
//!
//! A vessel is a candidate iff:
//! - its status is `Available`,
//! - its class satisfies the demand's required class,
//! - its deadweight is at least the demand's tonnage,
//! - its availability window fully contains the loading window,
//! - none of its maintenance periods overlaps the loading window.
//!
//! # Ordering
//! Descending utilization ratio (`tonnage / capacity`), then ascending
//! vessel ID. Ratios are compared by integer cross-multiplication so the
//! order is exact and platform independent.

use std::cmp::Ordering;

use crate::models::{Demand, Vessel};

/// Whether `vessel` may serve `demand`.
pub fn is_compatible(demand: &Demand, vessel: &Vessel) -> bool {
    vessel.is_available()
        && demand.required_class.accepts(vessel.class)
        && vessel.capacity_t >= demand.tonnage_t
        && vessel.can_serve_window(&demand.loading_window)
}

/// Fraction of the vessel's deadweight the demand would use.
///
/// Returns `0.0` for a vessel with non-positive capacity.
pub fn utilization_ratio(demand: &Demand, vessel: &Vessel) -> f64 {
    if vessel.capacity_t <= 0 {
        return 0.0;
    }
    demand.tonnage_t as f64 / vessel.capacity_t as f64
}

/// Candidate vessels for `demand`, best fit first.
///
/// An empty result is not an error: it means the demand cannot currently
/// be served by this snapshot.
pub fn candidates<'a>(demand: &Demand, snapshot: &'a [Vessel]) -> Vec<&'a Vessel> {
    let mut out: Vec<&Vessel> = snapshot
        .iter()
        .filter(|v| is_compatible(demand, v))
        .collect();
    out.sort_by(|a, b| compare_fit(demand.tonnage_t, a, b));
    out
}

/// Index-based variant of [`candidates`] used by the optimizer.
pub(crate) fn candidate_indices(demand: &Demand, snapshot: &[Vessel]) -> Vec<usize> {
    let mut out: Vec<usize> = snapshot
        .iter()
        .enumerate()
        .filter(|(_, v)| is_compatible(demand, v))
        .map(|(i, _)| i)
        .collect();
    out.sort_by(|&a, &b| compare_fit(demand.tonnage_t, &snapshot[a], &snapshot[b]));
    out
}

/// Tighter fit (higher `tonnage / capacity`) first, then lower vessel ID.
fn compare_fit(tonnage_t: i64, a: &Vessel, b: &Vessel) -> Ordering {
    // t/a.cap > t/b.cap  <=>  t*b.cap > t*a.cap
    let ratio_a = tonnage_t as i128 * b.capacity_t as i128;
    let ratio_b = tonnage_t as i128 * a.capacity_t as i128;
    ratio_b.cmp(&ratio_a).then_with(|| a.id.cmp(&b.id))
}
