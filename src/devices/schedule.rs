//! Schedule-driven prosumption source for household-style demand.

use std::fs;
use std::io;
use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::types::Prosumer;

/// One scheduled hour: core target, uncertainty band, and flex allowance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleRow {
    /// Core prosumption target for this slot.
    pub target: f32,
    /// Width of the uniform noise band around the target.
    pub uncertainty: f32,
    /// Largest flex magnitude this slot can absorb, either direction.
    pub ability_to_flex: f32,
}

/// A looping, schedulable prosumer emulating typical building demand.
///
/// The source follows a fixed per-slot schedule (e.g. one row per hour of
/// the day), looping forever. Each slot carries a target, an uncertainty,
/// and an ability to flex; the flex plan is mutable within limits, so total
/// prosumption can be nudged slot by slot. Look-ahead queries wrap around
/// the schedule.
#[derive(Debug, Clone)]
pub struct ScheduleProsumer {
    rows: Vec<ScheduleRow>,
    /// The flex actually applied per slot; mutable, clamped on write.
    plan: Vec<f32>,
    index: usize,
    history: Vec<f32>,
    rng: StdRng,
}

impl ScheduleProsumer {
    /// Creates a source from in-memory schedule rows.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty.
    pub fn from_rows(rows: Vec<ScheduleRow>, seed: u64) -> Self {
        assert!(!rows.is_empty());

        let plan = vec![0.0; rows.len()];
        Self {
            rows,
            plan,
            index: 0,
            history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Loads a schedule from a whitespace-separated text file.
    ///
    /// Each non-empty line is `target uncertainty ability_to_flex`.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be read, a line does not
    /// have three numeric columns, or the file holds no rows.
    pub fn from_path(path: &Path, seed: u64) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut rows = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<f32> = line
                .split_whitespace()
                .map(|field| {
                    field.parse::<f32>().map_err(|e| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("line {}: bad value {field:?}: {e}", lineno + 1),
                        )
                    })
                })
                .collect::<io::Result<_>>()?;
            if fields.len() != 3 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "line {}: expected 3 columns, found {}",
                        lineno + 1,
                        fields.len()
                    ),
                ));
            }
            rows.push(ScheduleRow {
                target: fields[0],
                uncertainty: fields[1],
                ability_to_flex: fields[2],
            });
        }

        if rows.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "schedule file holds no rows",
            ));
        }
        Ok(Self::from_rows(rows, seed))
    }

    /// Number of slots in one schedule loop.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the schedule has no slots (never, by construction).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Core target of the current slot.
    pub fn target(&self) -> f32 {
        self.rows[self.index].target
    }

    /// Uncertainty band of the current slot.
    pub fn uncertainty(&self) -> f32 {
        self.rows[self.index].uncertainty
    }

    /// Flex allowance of the current slot.
    pub fn ability_to_flex(&self) -> f32 {
        self.rows[self.index].ability_to_flex
    }

    /// Flex currently planned for the current slot.
    pub fn flex(&self) -> f32 {
        self.plan[self.index]
    }

    /// Plans flex for the current slot, clamped to the slot's allowance.
    pub fn set_flex(&mut self, value: f32) {
        let limit = self.ability_to_flex();
        self.plan[self.index] = if value > 0.0 {
            value.min(limit)
        } else {
            value.max(-limit)
        };
    }

    /// Planned flex for the next `n_steps` slots, wrapping around.
    pub fn plan(&self, n_steps: usize) -> Vec<f32> {
        (0..n_steps)
            .map(|step| self.plan[(self.index + step) % self.plan.len()])
            .collect()
    }

    /// Expected prosumption (target plus planned flex) for the next
    /// `n_steps` slots, wrapping around. Noise-free by design, so the same
    /// query always returns the same sequence.
    pub fn prediction(&self, n_steps: usize) -> Vec<f32> {
        (0..n_steps)
            .map(|step| {
                let i = (self.index + step) % self.plan.len();
                self.plan[i] + self.rows[i].target
            })
            .collect()
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.rows.len();
    }
}

impl Prosumer for ScheduleProsumer {
    /// Advances to the next slot, then realizes its target plus planned
    /// flex plus uniform noise within the uncertainty band.
    fn next_value(&mut self) -> f32 {
        self.advance();
        let noise = self.uncertainty() * (self.rng.random::<f32>() - 0.5);
        let result = self.target() + self.flex() + noise;
        self.history.push(result);
        result
    }

    fn history(&self) -> &[f32] {
        &self.history
    }

    fn prosumer_type(&self) -> &'static str {
        "Schedule"
    }
}
