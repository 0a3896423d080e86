//! Linear ramps applied per row category.

use serde::{Deserialize, Serialize};

/// Inclusive linear ramp from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub start: f64,
    pub end: f64,
}

impl Ramp {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `n` integer offsets, each truncated toward zero.
    pub fn offsets(&self, n: usize) -> Vec<i64> {
        linspace(self.start, self.end, n)
            .into_iter()
            .map(|v| v.trunc() as i64)
            .collect()
    }
}

/// `n` evenly spaced samples over `[start, end]`.
///
/// Samples are `start + i * step`; the last one is pinned to `end` so
/// rounding in `step` never leaves it short.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}
