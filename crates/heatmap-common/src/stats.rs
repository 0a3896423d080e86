//! Summary statistics reported after synthesis.

use serde::Serialize;

use crate::table::EngagementTable;

/// Maximum, minimum and mean of all cells in a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub max: i64,
    pub min: i64,
    pub mean: f64,
}

impl SummaryStats {
    pub fn from_table(table: &EngagementTable) -> Self {
        let values = table.values();
        // The sum of any i64 table fits in i128
        let sum: i128 = values.iter().map(|v| *v as i128).sum();
        Self {
            max: table.max(),
            min: table.min(),
            mean: sum as f64 / values.len() as f64,
        }
    }

    /// Console report lines, mean to two decimals.
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            format!("Max Engagement: {}", self.max),
            format!("Min Engagement: {}", self.min),
            format!("Average Engagement: {:.2}", self.mean),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_and_report() {
        let table = EngagementTable::new(
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into()],
            vec![1, 2, 3, 5],
        )
        .unwrap();
        let stats = SummaryStats::from_table(&table);
        assert_eq!(stats.max, 5);
        assert_eq!(stats.min, 1);
        assert!((stats.mean - 2.75).abs() < 1e-12);
        assert_eq!(
            stats.report_lines(),
            vec![
                "Max Engagement: 5".to_string(),
                "Min Engagement: 1".to_string(),
                "Average Engagement: 2.75".to_string(),
            ]
        );
    }

    #[test]
    fn test_mean_of_extreme_values() {
        let table = EngagementTable::new(
            vec!["a".into()],
            vec!["x".into(), "y".into()],
            vec![i64::MAX, i64::MAX],
        )
        .unwrap();
        let stats = SummaryStats::from_table(&table);
        assert_eq!(stats.max, i64::MAX);
        assert!((stats.mean - i64::MAX as f64).abs() < 1.0);

        let table = EngagementTable::new(
            vec!["a".into()],
            vec!["x".into(), "y".into()],
            vec![i64::MIN, i64::MAX],
        )
        .unwrap();
        assert!((SummaryStats::from_table(&table).mean - -0.5).abs() < 1e-12);
    }
}
