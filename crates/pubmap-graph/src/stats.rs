//! Distribution summaries for a snapshot's node power and edge weight.
//!
//! Mirrors the classic `describe()` layout (count, mean, std, min, quartiles,
//! max). Every value is truncated toward zero to an integer.

use serde::Serialize;

use crate::aggregate::{Edge, Node};
use crate::links::LinkTable;
use crate::Year;

/// Summary of one numeric column. Empty columns only report `count: 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Describe {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(rename = "25%", skip_serializing_if = "Option::is_none")]
    pub p25: Option<i64>,
    #[serde(rename = "50%", skip_serializing_if = "Option::is_none")]
    pub p50: Option<i64>,
    #[serde(rename = "75%", skip_serializing_if = "Option::is_none")]
    pub p75: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// Linear-interpolated quantile of sorted, non-empty `values`.
fn quantile(sorted: &[usize], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let base = sorted[lo] as f64;
    base + (sorted[hi] as f64 - base) * (pos - lo as f64)
}

pub fn describe(values: impl IntoIterator<Item = usize>) -> Describe {
    let mut sorted: Vec<usize> = values.into_iter().collect();
    if sorted.is_empty() {
        return Describe::default();
    }
    sorted.sort_unstable();

    let n = sorted.len();
    let mean = sorted.iter().sum::<usize>() as f64 / n as f64;
    // sample std (n - 1); a single value has no spread
    let std = if n > 1 {
        let ss: f64 = sorted.iter().map(|&v| (v as f64 - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };

    Describe {
        count: n,
        mean: Some(mean as i64),
        std: Some(std as i64),
        min: Some(sorted[0] as i64),
        p25: Some(quantile(&sorted, 0.25) as i64),
        p50: Some(quantile(&sorted, 0.50) as i64),
        p75: Some(quantile(&sorted, 0.75) as i64),
        max: Some(sorted[n - 1] as i64),
    }
}

/// The `info` block of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    /// `[min, max]` year of the window's links, `null` if it had none
    pub year: Option<[Year; 2]>,
    pub nodes: Describe,
    pub links: Describe,
}

pub fn snapshot_info(links: &LinkTable, nodes: &[Node], edges: &[Edge]) -> SnapshotInfo {
    SnapshotInfo {
        year: links.year_range().map(|(min, max)| [min, max]),
        nodes: describe(nodes.iter().map(|n| n.power)),
        links: describe(edges.iter().map(|e| e.weight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_matches_reference_values() {
        // describe([1, 2, 3, 4, 10]): mean 4.0, std 3.53, quartiles 2/3/4
        let d = describe([4, 1, 10, 3, 2]);
        assert_eq!(d.count, 5);
        assert_eq!(d.mean, Some(4));
        assert_eq!(d.std, Some(3));
        assert_eq!(d.min, Some(1));
        assert_eq!(d.p25, Some(2));
        assert_eq!(d.p50, Some(3));
        assert_eq!(d.p75, Some(4));
        assert_eq!(d.max, Some(10));
    }

    #[test]
    fn quartiles_interpolate_then_truncate() {
        // [1, 2]: 25% = 1.25, 50% = 1.5, 75% = 1.75, mean 1.5
        let d = describe([1, 2]);
        assert_eq!((d.p25, d.p50, d.p75), (Some(1), Some(1), Some(1)));
        assert_eq!(d.mean, Some(1));
    }

    #[test]
    fn single_value_has_zero_std() {
        let d = describe([7]);
        assert_eq!(d.std, Some(0));
        assert_eq!((d.min, d.max), (Some(7), Some(7)));
    }

    #[test]
    fn empty_column_serializes_count_only() {
        let d = describe(std::iter::empty());
        assert_eq!(d, Describe::default());
        assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"count":0}"#);
    }

    #[test]
    fn percent_keys_in_json() {
        let json = serde_json::to_value(describe([1, 2, 3])).unwrap();
        assert_eq!(json["25%"], 1);
        assert_eq!(json["50%"], 2);
        assert_eq!(json["75%"], 2);
    }

    #[test]
    fn info_year_range_from_links() {
        let info = snapshot_info(&LinkTable::default(), &[], &[]);
        assert_eq!(info.year, None);
        assert_eq!(info.nodes.count, 0);
        let json = serde_json::to_value(info).unwrap();
        assert!(json["year"].is_null());
    }
}
