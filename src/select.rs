//! Series-resistor selection against the standard value catalog.
//!
//! For each vane position there is an ideal R1 that would pin that
//! position exactly at the target voltage. None of those ideals exist as
//! parts you can buy, so the selector ranks the real catalog by distance
//! to the ideals and walks the ranking, keeping values that hold the
//! ceiling for every position at once.

use crate::catalog::ResistorCatalog;
use crate::divider::{is_feasible, VanePoint};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error("supply voltage must be positive and finite, got {0}")]
    InvalidSupply(f64),
    #[error("target ceiling must be positive and finite, got {0}")]
    InvalidTarget(f64),
    #[error("target ceiling {target}V must be below the supply {vin}V")]
    TargetAboveSupply { vin: f64, target: f64 },
    #[error("vane resistance must be positive and finite, got {0}")]
    InvalidVaneResistance(f64),
}

/// A catalog value paired with its distance from a computed ideal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub value: f64,
    pub distance: f64,
}

/// Pick up to `n` standard resistor values for the divider's series leg,
/// closest-feasible-first.
///
/// The ranking works in four steps:
///
/// 1. Compute the per-position ideal `(vin * R2 / target) - R2` for
///    every vane resistance. Each ideal pins its own position at the
///    target; positions with larger resistances need larger ideals.
/// 2. Keep only ideals that are feasible against the whole table. An
///    ideal can be fine for its own position and still push another one
///    over the ceiling.
/// 3. Rank the Cartesian product of retained ideals and flattened
///    catalog values by absolute distance. The sort is stable, so
///    equidistant values keep catalog enumeration order.
/// 4. Walk the ranking and accept feasible values until `n` are found
///    or the ranking is exhausted. A value reachable from two ideals is
///    accepted twice; the output is not deduplicated.
///
/// Degenerate inputs (empty table, empty catalog, `n == 0`, or no
/// feasible ideal) return an empty or short vector, not an error.
/// Malformed `vin`/`target`/table values fail fast with [`SelectError`]
/// instead of producing a misleading ranking.
pub fn select_resistors(
    table: &[VanePoint],
    vin: f64,
    target: f64,
    catalog: &ResistorCatalog,
    n: usize,
) -> Result<Vec<f64>, SelectError> {
    validate(table, vin, target)?;

    let ideals: Vec<f64> = table
        .iter()
        .map(|p| (vin * p.ohms) / target - p.ohms)
        .filter(|&ideal| is_feasible(table, vin, target, ideal))
        .collect();

    let ranked = rank_candidates(&ideals, catalog);

    let mut accepted = Vec::with_capacity(n.min(ranked.len()));
    for candidate in &ranked {
        if accepted.len() == n {
            break;
        }
        if is_feasible(table, vin, target, candidate.value) {
            accepted.push(candidate.value);
        }
    }
    Ok(accepted)
}

/// Materialize the ideal × catalog product and sort it by distance,
/// stable with respect to catalog enumeration order.
pub fn rank_candidates(ideals: &[f64], catalog: &ResistorCatalog) -> Vec<RankedCandidate> {
    let values = catalog.flatten();
    let mut ranked = Vec::with_capacity(ideals.len() * values.len());
    for &ideal in ideals {
        for &value in &values {
            ranked.push(RankedCandidate {
                value,
                distance: (ideal - value).abs(),
            });
        }
    }
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

fn validate(table: &[VanePoint], vin: f64, target: f64) -> Result<(), SelectError> {
    if !vin.is_finite() || vin <= 0.0 {
        return Err(SelectError::InvalidSupply(vin));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(SelectError::InvalidTarget(target));
    }
    if target >= vin {
        return Err(SelectError::TargetAboveSupply { vin, target });
    }
    if let Some(p) = table.iter().find(|p| !p.ohms.is_finite() || p.ohms <= 0.0) {
        return Err(SelectError::InvalidVaneResistance(p.ohms));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ohms: f64, degrees: f64) -> VanePoint {
        VanePoint { ohms, degrees }
    }

    #[test]
    fn zero_count_returns_empty() {
        let table = vec![point(1000.0, 90.0)];
        let picks = select_resistors(&table, 3.3, 2.56, &ResistorCatalog::e24(), 0).unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn empty_table_returns_empty() {
        // No positions means no ideals, so nothing to rank against.
        let picks = select_resistors(&[], 3.3, 2.56, &ResistorCatalog::e24(), 10).unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn empty_catalog_returns_empty() {
        let table = vec![point(1000.0, 90.0)];
        let catalog = ResistorCatalog { rows: vec![] };
        let picks = select_resistors(&table, 3.3, 2.56, &catalog, 10).unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn single_position_ranking() {
        // Ideal for {1000Ω} at Vin=3.3, target=1.65 is exactly 1000Ω.
        // 1000 itself is in the catalog at distance zero; 910 is closer
        // than 1100 but infeasible (its output overshoots the ceiling).
        let table = vec![point(1000.0, 0.0)];
        let picks = select_resistors(&table, 3.3, 1.65, &ResistorCatalog::e24(), 3).unwrap();
        assert_eq!(picks, vec![1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn no_feasible_catalog_value_returns_empty() {
        // target of 1mV needs R1 near 400MΩ; the catalog tops out at
        // 9.1MΩ, so the walk accepts nothing.
        let table = vec![point(120_000.0, 270.0)];
        let picks = select_resistors(&table, 3.3, 0.001, &ResistorCatalog::e24(), 10).unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn duplicate_catalog_values_stay_duplicated() {
        // A catalog listing the same magnitude twice yields it twice in
        // the ranking, and both occurrences survive the walk.
        let table = vec![point(1000.0, 0.0)];
        let catalog = ResistorCatalog {
            rows: vec![vec![900.0, 1100.0], vec![1100.0, 900.0]],
        };
        let picks = select_resistors(&table, 3.3, 1.65, &catalog, 4).unwrap();
        assert_eq!(picks, vec![1100.0, 1100.0]);
    }

    #[test]
    fn equidistant_values_keep_catalog_order() {
        // 950 and 1050 are both 50 away from the 1000 ideal; the stable
        // sort keeps 950 first, but only 1050 is feasible.
        let table = vec![point(1000.0, 0.0)];
        let catalog = ResistorCatalog {
            rows: vec![vec![950.0, 1050.0, 2000.0]],
        };
        let picks = select_resistors(&table, 3.3, 1.65, &catalog, 3).unwrap();
        assert_eq!(picks, vec![1050.0, 2000.0]);
    }

    #[test]
    fn every_pick_is_feasible() {
        let table = vec![point(1000.0, 90.0), point(120_000.0, 270.0)];
        let picks = select_resistors(&table, 3.3, 2.56, &ResistorCatalog::e24(), 10).unwrap();
        assert!(!picks.is_empty());
        for r1 in &picks {
            assert!(
                is_feasible(&table, 3.3, 2.56, *r1),
                "selected value {r1} should hold the ceiling"
            );
        }
    }

    // ── Validation ──────────────────────────────────────────────────────

    #[test]
    fn rejects_non_positive_supply() {
        let table = vec![point(1000.0, 90.0)];
        let err = select_resistors(&table, 0.0, 2.56, &ResistorCatalog::e24(), 10).unwrap_err();
        assert_eq!(err, SelectError::InvalidSupply(0.0));
    }

    #[test]
    fn rejects_non_positive_target() {
        let table = vec![point(1000.0, 90.0)];
        let err = select_resistors(&table, 3.3, -2.0, &ResistorCatalog::e24(), 10).unwrap_err();
        assert_eq!(err, SelectError::InvalidTarget(-2.0));
    }

    #[test]
    fn rejects_target_at_or_above_supply() {
        let table = vec![point(1000.0, 90.0)];
        let err = select_resistors(&table, 3.3, 3.3, &ResistorCatalog::e24(), 10).unwrap_err();
        assert_eq!(
            err,
            SelectError::TargetAboveSupply {
                vin: 3.3,
                target: 3.3
            }
        );
    }

    #[test]
    fn rejects_non_positive_vane_resistance() {
        let table = vec![point(1000.0, 90.0), point(-5.0, 180.0)];
        let err = select_resistors(&table, 3.3, 2.56, &ResistorCatalog::e24(), 10).unwrap_err();
        assert_eq!(err, SelectError::InvalidVaneResistance(-5.0));
    }
}
