//! The Engagement Table: a labeled, row-major integer matrix.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Row labels in rendering order. The first [`WEEKDAY_COUNT`] are weekdays.
pub const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Number of leading rows classified as weekdays.
pub const WEEKDAY_COUNT: usize = 5;

/// First and last hour of the column range (inclusive).
pub const FIRST_HOUR: u32 = 9;
pub const LAST_HOUR: u32 = 17;

/// Column labels `9:00` through `17:00`.
pub fn hour_labels() -> Vec<String> {
    (FIRST_HOUR..=LAST_HOUR).map(|h| format!("{}:00", h)).collect()
}

/// Row category used to pick the additive or subtractive ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    /// Classify a row by its position: the first `weekday_rows` rows are weekdays.
    pub fn for_row(index: usize, weekday_rows: usize) -> Self {
        if index < weekday_rows {
            DayKind::Weekday
        } else {
            DayKind::Weekend
        }
    }
}

/// Labeled integer matrix of engagement values.
///
/// Values are stored row-major. Construction validates the shape, so a table
/// that exists is never empty or ragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementTable {
    rows: Vec<String>,
    columns: Vec<String>,
    values: Vec<i64>,
}

/// JSON shape of a table: values nested per row.
#[derive(Debug, Serialize, Deserialize)]
struct TableJson {
    rows: Vec<String>,
    columns: Vec<String>,
    values: Vec<Vec<i64>>,
}

impl EngagementTable {
    /// Build a table from labels and row-major values.
    pub fn new(rows: Vec<String>, columns: Vec<String>, values: Vec<i64>) -> HeatmapResult<Self> {
        if rows.is_empty() || columns.is_empty() {
            return Err(HeatmapError::InvalidTable(format!(
                "table must have at least one row and one column (got {}x{})",
                rows.len(),
                columns.len()
            )));
        }
        let expected = rows.len() * columns.len();
        if values.len() != expected {
            return Err(HeatmapError::InvalidTable(format!(
                "expected {} values for a {}x{} table, got {}",
                expected,
                rows.len(),
                columns.len(),
                values.len()
            )));
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Build a table from nested rows of values.
    pub fn from_rows(
        rows: Vec<String>,
        columns: Vec<String>,
        values: Vec<Vec<i64>>,
    ) -> HeatmapResult<Self> {
        if let Some((i, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(HeatmapError::InvalidTable(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                columns.len()
            )));
        }
        Self::new(rows, columns, values.into_iter().flatten().collect())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }

    pub fn column_labels(&self) -> &[String] {
        &self.columns
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Value at (row, col), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return None;
        }
        Some(self.values[row * self.n_cols() + col])
    }

    /// One row of values.
    pub fn row(&self, row: usize) -> Option<&[i64]> {
        if row >= self.n_rows() {
            return None;
        }
        let start = row * self.n_cols();
        Some(&self.values[start..start + self.n_cols()])
    }

    /// Iterate rows as slices, in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        self.values.chunks_exact(self.n_cols())
    }

    pub fn min(&self) -> i64 {
        self.values.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> i64 {
        self.values.iter().copied().max().unwrap_or_default()
    }

    /// Serialize as `{"rows": [...], "columns": [...], "values": [[...]]}`.
    pub fn to_json(&self) -> HeatmapResult<String> {
        let json = TableJson {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            values: self.iter_rows().map(<[i64]>::to_vec).collect(),
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Parse the JSON shape produced by [`EngagementTable::to_json`].
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        let parsed: TableJson = serde_json::from_str(json)?;
        Self::from_rows(parsed.rows, parsed.columns, parsed.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_hour_labels() {
        let hours = hour_labels();
        assert_eq!(hours.len(), 9);
        assert_eq!(hours.first().map(String::as_str), Some("9:00"));
        assert_eq!(hours.last().map(String::as_str), Some("17:00"));
    }

    #[test]
    fn test_day_kind_split() {
        let kinds: Vec<DayKind> = (0..DAY_LABELS.len())
            .map(|i| DayKind::for_row(i, WEEKDAY_COUNT))
            .collect();
        assert_eq!(kinds.iter().filter(|k| **k == DayKind::Weekday).count(), 5);
        assert_eq!(kinds[5], DayKind::Weekend);
        assert_eq!(kinds[6], DayKind::Weekend);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert!(EngagementTable::new(vec![], labels("c", 2), vec![]).is_err());
        assert!(EngagementTable::new(labels("r", 2), labels("c", 2), vec![1, 2, 3]).is_err());
        assert!(EngagementTable::from_rows(
            labels("r", 2),
            labels("c", 2),
            vec![vec![1, 2], vec![3]]
        )
        .is_err());
    }

    #[test]
    fn test_accessors() {
        let table =
            EngagementTable::new(labels("r", 2), labels("c", 3), vec![1, 2, 3, -4, 5, 60]).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(1, 0), Some(-4));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.row(1), Some(&[-4, 5, 60][..]));
        assert_eq!(table.min(), -4);
        assert_eq!(table.max(), 60);
        assert_eq!(table.iter_rows().count(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let table =
            EngagementTable::new(labels("r", 2), labels("c", 2), vec![10, 20, 30, 40]).unwrap();
        let json = table.to_json().unwrap();
        assert!(json.contains("\"values\""));
        assert_eq!(EngagementTable::from_json(&json).unwrap(), table);
    }
}
