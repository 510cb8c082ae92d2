use hashbrown::HashMap;

use crate::record::{record_label, Record};

/// Shape and value range of raw coordinate rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStats {
    pub count: usize,
    /// Length of the first row.
    pub dims: usize,
    /// Smallest finite value over all rows and columns.
    pub min: f32,
    /// Largest finite value over all rows and columns.
    pub max: f32,
}

impl RowStats {
    /// Returns `None` when there are no rows or no finite values.
    pub fn from_rows<P: AsRef<[f32]>>(rows: &[P]) -> Option<Self> {
        let first = rows.first()?;
        let (min, max) = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f32, f32)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        Some(Self {
            count: rows.len(),
            dims: first.as_ref().len(),
            min,
            max,
        })
    }
}

/// Counts records per integer label, sorted by label. Records whose label is
/// missing or not an integer are skipped.
pub fn label_histogram(records: &[Record], field: &str) -> Vec<(i64, usize)> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for record in records {
        if let Ok(label) = record_label(record, field) {
            *counts.entry(label).or_default() += 1;
        }
    }

    let mut hist: Vec<(i64, usize)> = counts.into_iter().collect();
    hist.sort_unstable();
    hist
}
