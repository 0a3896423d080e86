//! Deterministic synthesis of the Engagement Table.
//!
//! A seeded uniform base in `[low, high)` is drawn row-major, then each row
//! gets a ramp added (weekdays) or subtracted (weekends) across its columns.
//! Values are never clamped.

pub mod prng;
pub mod ramp;

use rand::RngCore;
use tracing::debug;

use heatmap_common::table::{hour_labels, DAY_LABELS, WEEKDAY_COUNT};
use heatmap_common::{DayKind, EngagementTable, HeatmapError, HeatmapResult};

pub use prng::Mt19937;
pub use ramp::Ramp;

/// Seed used when none is given.
pub const DEFAULT_SEED: u32 = 42;

/// Everything the synthesizer needs besides the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// Leading rows that get the additive ramp
    pub weekday_rows: usize,
    /// Inclusive lower bound of the base draw
    pub low: i64,
    /// Exclusive upper bound of the base draw
    pub high: i64,
    pub weekday_ramp: Ramp,
    pub weekend_ramp: Ramp,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            rows: DAY_LABELS.iter().map(|d| d.to_string()).collect(),
            columns: hour_labels(),
            weekday_rows: WEEKDAY_COUNT,
            low: 10,
            high: 100,
            weekday_ramp: Ramp::new(10.0, 50.0),
            weekend_ramp: Ramp::new(5.0, 20.0),
        }
    }
}

impl SynthesisParams {
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.rows.is_empty() {
            return Err(HeatmapError::config("rows", "at least one row label is required"));
        }
        if self.columns.is_empty() {
            return Err(HeatmapError::config(
                "columns",
                "at least one column label is required",
            ));
        }
        if self.low >= self.high {
            return Err(HeatmapError::config(
                "low",
                format!("low ({}) must be below high ({})", self.low, self.high),
            ));
        }
        if self.weekday_rows > self.rows.len() {
            return Err(HeatmapError::config(
                "weekday_rows",
                format!(
                    "{} weekday rows requested but only {} rows exist",
                    self.weekday_rows,
                    self.rows.len()
                ),
            ));
        }
        Ok(())
    }

    pub fn kind_of_row(&self, row: usize) -> DayKind {
        DayKind::for_row(row, self.weekday_rows)
    }
}

/// Synthesize the default 7x9 table from `seed`.
pub fn synthesize(seed: u32) -> HeatmapResult<EngagementTable> {
    synthesize_with_params(seed, &SynthesisParams::default())
}

/// Synthesize with explicit parameters, seeding a fresh MT19937.
pub fn synthesize_with_params(seed: u32, params: &SynthesisParams) -> HeatmapResult<EngagementTable> {
    let mut rng = Mt19937::new(seed);
    debug!(seed, rows = params.rows.len(), cols = params.columns.len(), "Synthesizing table");
    synthesize_with(&mut rng, params)
}

/// Synthesize from any generator.
pub fn synthesize_with<R: RngCore + ?Sized>(
    rng: &mut R,
    params: &SynthesisParams,
) -> HeatmapResult<EngagementTable> {
    params.validate()?;

    let mut values = raw_draws(rng, params);
    let n_cols = params.columns.len();
    let weekday = params.weekday_ramp.offsets(n_cols);
    let weekend = params.weekend_ramp.offsets(n_cols);

    for (row, cells) in values.chunks_exact_mut(n_cols).enumerate() {
        match params.kind_of_row(row) {
            DayKind::Weekday => cells.iter_mut().zip(&weekday).for_each(|(v, o)| *v += o),
            DayKind::Weekend => cells.iter_mut().zip(&weekend).for_each(|(v, o)| *v -= o),
        }
    }

    EngagementTable::new(params.rows.clone(), params.columns.clone(), values)
}

/// The unadjusted base draws, row-major.
pub fn raw_draws<R: RngCore + ?Sized>(rng: &mut R, params: &SynthesisParams) -> Vec<i64> {
    let n = params.rows.len() * params.columns.len();
    (0..n)
        .map(|_| prng::bounded(rng, params.low, params.high))
        .collect()
}
