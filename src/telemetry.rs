//! CSV export of recorded simulation histories.
//!
//! The simulation core never formats or renders its own data; these writers
//! read the append-only histories after a run and produce deterministic CSV
//! for offline visualization.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::{FleetRunResult, HouseholdRunResult, SingleRunResult};

/// Fixed column prefix for fleet telemetry; per-unit capacity columns
/// (`capacity_<id>`) follow, ordered by unit id.
const FLEET_HEADER: &str = "timestep,demand,residual";

/// Column header for household telemetry.
const HOUSEHOLD_HEADER: &str = "timestep,household,battery,threshold,grid,percent_full";

/// Column header for single-battery telemetry.
const SINGLE_HEADER: &str = "timestep,prosumption,capacity";

/// Writes a fleet run as CSV to any writer.
///
/// One row per step: demand, residual, then each unit's capacity after the
/// step, keyed by unit id so columns stay stable across re-sorted passes.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_fleet_csv(result: &FleetRunResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut units: Vec<_> = result.fleet.iter().collect();
    units.sort_by_key(|unit| unit.id);

    let mut header: Vec<String> = FLEET_HEADER.split(',').map(str::to_string).collect();
    for unit in &units {
        header.push(format!("capacity_{}", unit.id));
    }
    wtr.write_record(&header)?;

    for (t, (demand, residual)) in result
        .demand_history
        .iter()
        .zip(&result.residual_history)
        .enumerate()
    {
        let mut record = vec![
            t.to_string(),
            format!("{demand:.4}"),
            format!("{residual:.4}"),
        ];
        for unit in &units {
            record.push(format!("{:.4}", unit.capacity_history()[t]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a household run as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_household_csv(result: &HouseholdRunResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HOUSEHOLD_HEADER.split(','))?;

    for (t, household) in result.household_history.iter().enumerate() {
        wtr.write_record(&[
            t.to_string(),
            format!("{household:.4}"),
            format!("{:.4}", result.battery.history()[t]),
            format!("{:.4}", result.threshold_history[t]),
            format!("{:.4}", result.grid_history[t]),
            format!("{:.4}", result.charge_history[t]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a single-battery run as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_single_csv(result: &SingleRunResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SINGLE_HEADER.split(','))?;

    for (t, prosumption) in result.battery.history().iter().enumerate() {
        wtr.write_record(&[
            t.to_string(),
            format!("{prosumption:.4}"),
            format!("{:.4}", result.battery.capacity_history()[t]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a fleet run to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_fleet_csv(result: &FleetRunResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_fleet_csv(result, io::BufWriter::new(file))
}

/// Exports a household run to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_household_csv(result: &HouseholdRunResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_household_csv(result, io::BufWriter::new(file))
}

/// Exports a single-battery run to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_single_csv(result: &SingleRunResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_single_csv(result, io::BufWriter::new(file))
}
