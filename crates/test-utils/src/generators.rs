//! Table generators for creating predictable test data.

use heatmap_common::table::{hour_labels, DAY_LABELS};
use heatmap_common::EngagementTable;

use crate::fixtures::SEED_42_TABLE;

/// Creates a table with predictable values.
///
/// Each cell value is calculated as: `row * 100 + col`
///
/// # Example
///
/// ```
/// use test_utils::create_test_table;
///
/// let table = create_test_table(3, 4);
/// assert_eq!(table.get(2, 1), Some(201));
/// ```
pub fn create_test_table(rows: usize, cols: usize) -> EngagementTable {
    let row_labels = (0..rows).map(|r| format!("R{}", r)).collect();
    let col_labels = (0..cols).map(|c| format!("C{}", c)).collect();
    let values = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r * 100 + c) as i64))
        .collect();
    match EngagementTable::new(row_labels, col_labels, values) {
        Ok(table) => table,
        Err(e) => panic!("invalid test table {}x{}: {}", rows, cols, e),
    }
}

/// Creates a table where every cell holds the same value.
pub fn create_constant_table(rows: usize, cols: usize, value: i64) -> EngagementTable {
    let row_labels = (0..rows).map(|r| format!("R{}", r)).collect();
    let col_labels = (0..cols).map(|c| format!("C{}", c)).collect();
    match EngagementTable::new(row_labels, col_labels, vec![value; rows * cols]) {
        Ok(table) => table,
        Err(e) => panic!("invalid constant table {}x{}: {}", rows, cols, e),
    }
}

/// The seed-42 reference table with day and hour labels.
pub fn seed_42_table() -> EngagementTable {
    let rows = DAY_LABELS.iter().map(|d| d.to_string()).collect();
    let values = SEED_42_TABLE.iter().flatten().copied().collect();
    match EngagementTable::new(rows, hour_labels(), values) {
        Ok(table) => table,
        Err(e) => panic!("invalid reference table: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_table() {
        let table = create_test_table(2, 3);
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.values(), &[0, 1, 2, 100, 101, 102]);
    }

    #[test]
    fn test_seed_42_table_labels() {
        let table = seed_42_table();
        assert_eq!(table.shape(), (7, 9));
        assert_eq!(table.row_labels()[2], "Wednesday");
        assert_eq!(table.max(), 148);
    }
}
