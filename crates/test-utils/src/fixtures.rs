//! Reference data for the default seed (42).
//!
//! These values are the output of MT19937 seeded with `init_genrand(42)` and
//! masked bounded draws over `[10, 100)`.

/// Base draws before any ramp is applied.
pub const SEED_42_RAW: [[i64; 9]; 7] = [
    [61, 24, 81, 70, 30, 92, 96, 84, 84],
    [97, 33, 12, 31, 62, 11, 97, 39, 47],
    [11, 73, 69, 30, 42, 85, 67, 31, 98],
    [58, 68, 51, 69, 89, 24, 71, 71, 56],
    [71, 60, 64, 73, 12, 60, 16, 30, 82],
    [48, 27, 13, 98, 69, 23, 18, 99, 62],
    [11, 93, 69, 80, 53, 17, 56, 44, 87],
];

/// The adjusted table.
pub const SEED_42_TABLE: [[i64; 9]; 7] = [
    [71, 39, 101, 95, 60, 127, 136, 129, 134],
    [107, 48, 32, 56, 92, 46, 137, 84, 97],
    [21, 88, 89, 55, 72, 120, 107, 76, 148],
    [68, 83, 71, 94, 119, 59, 111, 116, 106],
    [81, 75, 84, 98, 42, 95, 56, 75, 132],
    [43, 21, 5, 88, 57, 9, 2, 81, 42],
    [6, 87, 61, 70, 41, 3, 40, 26, 67],
];
