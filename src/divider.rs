//! Voltage-divider arithmetic for the wind-vane sensing circuit.
//!
//! The wind vane is a rotary switch: each compass bearing closes a
//! different internal resistor, which becomes the lower leg (R2) of a
//! divider against one fixed series resistor (R1). The ADC then reads
//! `Vin * R2 / (R1 + R2)`, so the choice of R1 decides how the sixteen
//! bearings spread across the usable ADC range.
//!
//! Everything here is pure: the feasibility check and the voltage table
//! take the vane table by reference and return values, leaving printing
//! and persistence to callers.

use serde::{Deserialize, Serialize};

/// One wind-vane position: the switch resistance it presents and the
/// compass bearing it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanePoint {
    /// Vane switch resistance in ohms. Must be positive.
    pub ohms: f64,
    /// Compass bearing in degrees. An identity tag only, never used in
    /// arithmetic.
    pub degrees: f64,
}

/// Divider output voltage for a single vane position.
pub fn divider_output(vin: f64, r1: f64, r2: f64) -> f64 {
    vin * r2 / (r1 + r2)
}

/// Check whether `r1` keeps the divider output at or below `target` for
/// every vane position at once.
///
/// This is a universal check: one bearing over the ceiling fails the
/// whole candidate. An empty table is vacuously feasible. A bearing that
/// lands exactly on the ceiling still counts as feasible, which matters
/// for the computed ideal values that sit right on the boundary.
///
/// Non-finite or non-positive `r1` is infeasible rather than an error,
/// so callers can probe candidate values freely without guarding the
/// division singularity themselves.
pub fn is_feasible(table: &[VanePoint], vin: f64, target: f64, r1: f64) -> bool {
    if !r1.is_finite() || r1 <= 0.0 {
        return false;
    }
    table
        .iter()
        .all(|p| divider_output(vin, r1, p.ohms) <= target)
}

/// Expected ADC voltage for every vane position with a given `r1`,
/// rounded to 2 decimals and paired with the bearing.
///
/// No feasibility filtering here. This is the calibration view used to
/// build the firmware's voltage-to-bearing lookup.
pub fn voltage_table(table: &[VanePoint], vin: f64, r1: f64) -> Vec<(f64, f64)> {
    table
        .iter()
        .map(|p| {
            let v = divider_output(vin, r1, p.ohms);
            ((v * 100.0).round() / 100.0, p.degrees)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
