//! Solar power-log aggregation.
//!
//! The panel logger runs one cycle per minute: it samples the charge
//! current many times, averages the positive readings, derives power
//! and a per-cycle energy figure, and appends one delimited row to the
//! log file. This module holds the aggregation arithmetic and the row
//! format; the sensor behind it is a single trait so the same cycle
//! runs against the bench INA219 or a scripted mock in tests.
//!
//! Energy is integrated over the nominal cycle period, not elapsed wall
//! time, matching how the log has always been read downstream.

use anyhow::Result;
use std::io::Write;
use std::thread::sleep;
use std::time::Duration;

/// The current/voltage sensor the logger polls.
pub trait PowerSensor {
    /// Instantaneous charge current in milliamps.
    fn read_current_ma(&mut self) -> Result<f64>;
    /// Bus voltage in volts.
    fn read_bus_voltage(&mut self) -> Result<f64>;
}

/// Column header for a fresh log file.
pub const CSV_HEADER: &str = "Timestamp,Avg Current (mA),Voltage (V),Power (mW),Energy (mWh)";

/// Aggregate of one sampling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSummary {
    pub avg_current_ma: f64,
    pub bus_voltage: f64,
    pub power_mw: f64,
    pub energy_mwh: f64,
}

impl WindowSummary {
    /// Summarize a window of retained current readings against the bus
    /// voltage. Returns `None` when no readings survived the window, in
    /// which case no row should be written.
    pub fn from_readings(readings: &[f64], bus_voltage: f64, period_secs: f64) -> Option<Self> {
        if readings.is_empty() {
            return None;
        }
        let avg_current_ma = readings.iter().sum::<f64>() / readings.len() as f64;
        let power_mw = avg_current_ma * bus_voltage;
        let energy_mwh = power_mw * period_secs / 3600.0;
        Some(Self {
            avg_current_ma,
            bus_voltage,
            power_mw,
            energy_mwh,
        })
    }

    /// One delimited log row: current, voltage and power at 2 decimals,
    /// energy at 3.
    pub fn csv_row(&self, timestamp: &str) -> String {
        format!(
            "{},{:.2},{:.2},{:.2},{:.3}",
            timestamp, self.avg_current_ma, self.bus_voltage, self.power_mw, self.energy_mwh
        )
    }
}

/// Sampling cadence for the logging loop.
#[derive(Debug, Clone, Copy)]
pub struct LogSchedule {
    /// Readings taken per cycle.
    pub samples_per_cycle: u32,
    /// Spacing between readings.
    pub sample_spacing: Duration,
    /// Nominal cycle period in seconds, the energy integration step.
    pub cycle_period_secs: f64,
}

impl Default for LogSchedule {
    /// 50 readings at 100 ms spacing, one row per minute.
    fn default() -> Self {
        Self {
            samples_per_cycle: 50,
            sample_spacing: Duration::from_millis(100),
            cycle_period_secs: 60.0,
        }
    }
}

/// Drives sampling cycles against a sensor and appends rows to a sink.
pub struct PowerLogger<S, W> {
    sensor: S,
    sink: W,
    schedule: LogSchedule,
    total_energy_mwh: f64,
}

impl<S: PowerSensor, W: Write> PowerLogger<S, W> {
    pub fn new(sensor: S, sink: W) -> Self {
        Self::with_schedule(sensor, sink, LogSchedule::default())
    }

    pub fn with_schedule(sensor: S, sink: W, schedule: LogSchedule) -> Self {
        Self {
            sensor,
            sink,
            schedule,
            total_energy_mwh: 0.0,
        }
    }

    /// Write the column header. Call once on a fresh log.
    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.sink, "{CSV_HEADER}")?;
        Ok(())
    }

    /// Run one sampling window and append a row stamped `timestamp`.
    ///
    /// Returns the window summary, or `None` when no positive current
    /// reading was seen (a dark panel at night); nothing is written in
    /// that case. The bus voltage is only read once a window has
    /// readings to summarize.
    pub fn log_cycle(&mut self, timestamp: &str) -> Result<Option<WindowSummary>> {
        let readings = self.collect_window();
        if readings.is_empty() {
            return Ok(None);
        }
        let bus_voltage = self.sensor.read_bus_voltage()?;
        let summary =
            WindowSummary::from_readings(&readings, bus_voltage, self.schedule.cycle_period_secs);
        if let Some(summary) = summary {
            self.total_energy_mwh += summary.energy_mwh;
            writeln!(self.sink, "{}", summary.csv_row(timestamp))?;
        }
        Ok(summary)
    }

    /// Run `cycles` windows back to back, stamping rows with epoch
    /// seconds. Sleeps out the remainder of each nominal period.
    pub fn run(&mut self, cycles: usize) -> Result<()> {
        for _ in 0..cycles {
            let started = std::time::Instant::now();
            self.log_cycle(&unix_timestamp())?;
            let period = Duration::from_secs_f64(self.schedule.cycle_period_secs);
            let elapsed = started.elapsed();
            if elapsed < period {
                sleep(period - elapsed);
            }
        }
        Ok(())
    }

    /// Collect one window of readings. A failed or non-positive reading
    /// skips the sample; the window carries on.
    fn collect_window(&mut self) -> Vec<f64> {
        let mut readings = Vec::with_capacity(self.schedule.samples_per_cycle as usize);
        for _ in 0..self.schedule.samples_per_cycle {
            if let Ok(ma) = self.sensor.read_current_ma() {
                if ma.is_finite() && ma > 0.0 {
                    readings.push(ma);
                }
            }
            if !self.schedule.sample_spacing.is_zero() {
                sleep(self.schedule.sample_spacing);
            }
        }
        readings
    }

    /// Energy accumulated across all logged cycles.
    pub fn total_energy_mwh(&self) -> f64 {
        self.total_energy_mwh
    }

    /// Consume the logger and return the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// Epoch-seconds timestamp without pulling in a date-time crate.
pub fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
