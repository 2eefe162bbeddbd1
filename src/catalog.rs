//! Standard resistor values.
//!
//! The catalog mirrors the drawer on the bench: the 24 E24 base values,
//! each stocked across the decades from 1 Ω to 9.1 MΩ. Rows are base
//! values, columns are decade scales; flattening enumerates row-major,
//! and that enumeration order is what breaks ranking ties downstream.

use serde::{Deserialize, Serialize};

/// E24 series base values (±5% tolerance parts).
const E24_BASES: [f64; 24] = [
    1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1,
    5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
];

/// Decade multipliers covering 1 Ω through 9.1 MΩ.
const DECADES: [f64; 7] = [1.0, 10.0, 100.0, 1e3, 1e4, 1e5, 1e6];

/// A table of commercially available resistor magnitudes, in ohms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistorCatalog {
    pub rows: Vec<Vec<f64>>,
}

impl ResistorCatalog {
    /// The stock E24 catalog: one row per base value, one column per
    /// decade scale.
    pub fn e24() -> Self {
        let rows = E24_BASES
            .iter()
            .map(|&base| DECADES.iter().map(|&scale| base * scale).collect())
            .collect();
        Self { rows }
    }

    /// All catalog values as one row-major sequence.
    pub fn flatten(&self) -> Vec<f64> {
        self.rows.iter().flatten().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }
}

/// Format a resistance with an engineering suffix for display.
pub fn format_ohms(val: f64) -> String {
    if val >= 1e6 {
        format!("{:.1}MΩ", val / 1e6)
    } else if val >= 1e3 {
        format!("{:.1}kΩ", val / 1e3)
    } else {
        format!("{:.1}Ω", val)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
