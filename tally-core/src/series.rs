//! Dense series handed to renderers: one label and one value per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label format for days: ISO `YYYY-MM-DD`.
pub const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Two parallel, equal-length sequences in ascending day order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DenseSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl DenseSeries {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            labels: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, day: NaiveDate, value: f64) {
        self.labels.push(day.format(LABEL_FORMAT).to_string());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(label, value)` pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Most recent value, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_formats_iso_labels() {
        let mut s = DenseSeries::with_capacity(2);
        s.push(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(), 10.0);
        s.push(NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(), -2.5);

        assert_eq!(s.labels, vec!["2026-02-07", "2026-02-08"]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.last_value(), Some(-2.5));
        let pts: Vec<(&str, f64)> = s.points().collect();
        assert_eq!(pts[1], ("2026-02-08", -2.5));
    }

    #[test]
    fn test_serializes_as_labels_and_values() {
        let mut s = DenseSeries::default();
        s.push(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(), 5.0);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"labels":["2026-02-07"],"values":[5.0]}"#);
    }
}
