// File: crates/crash-chart-core/src/aggregate.rs
// Summary: Filter records by year/operator and sum fatalities and aboard per operator.

use std::collections::HashMap;

use log::debug;

use crate::record::{calendar_year, IncidentRecord, YearMode};

/// Per-operator sums over the currently filtered records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesEntry {
    pub operator: String,
    pub total_fatalities: u64,
    pub total_aboard: u64,
}

impl SeriesEntry {
    /// Fatalities plus aboard; the pie slice weight. Saturates at `u64::MAX`.
    pub fn combined(&self) -> u64 { self.total_fatalities.saturating_add(self.total_aboard) }

    /// Larger of the two metrics; drives the shared vertical scale.
    pub fn peak(&self) -> u64 { self.total_fatalities.max(self.total_aboard) }
}

/// Pie slice input derived from a `SeriesEntry`.
#[derive(Clone, Debug, PartialEq)]
pub struct PieValue {
    pub operator: String,
    pub value: f64,
    pub fatalities: u64,
    pub aboard: u64,
}

/// Keep records of `year` (under `mode`) whose operator contains `operator_substring`
/// (empty = any), then group by exact operator in first-seen order.
pub fn aggregate(
    records: &[IncidentRecord],
    year: i32,
    operator_substring: &str,
    mode: YearMode,
) -> Vec<SeriesEntry> {
    let mut out: Vec<SeriesEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut matched = 0usize;

    let filtered = records
        .iter()
        .filter(|r| r.year(mode) == Some(year))
        .filter(|r| operator_substring.is_empty() || r.operator.contains(operator_substring));

    for rec in filtered {
        matched += 1;
        let slot = *index.entry(rec.operator.as_str()).or_insert_with(|| {
            out.push(SeriesEntry { operator: rec.operator.clone(), total_fatalities: 0, total_aboard: 0 });
            out.len() - 1
        });
        let entry = &mut out[slot];
        // Coerced counts may already sit at u64::MAX; sums clamp there.
        entry.total_fatalities = entry.total_fatalities.saturating_add(rec.fatalities);
        entry.total_aboard = entry.total_aboard.saturating_add(rec.aboard);
    }

    debug!(
        "aggregate year={} operator={:?} mode={:?}: {} of {} records -> {} operators",
        year,
        operator_substring,
        mode,
        matched,
        records.len(),
        out.len()
    );
    out
}

/// Number of records with exactly `operator` whose calendar year is `year`.
/// Independent of any substring filter; used for pie labels.
pub fn count_for_operator_year(records: &[IncidentRecord], operator: &str, year: i32) -> usize {
    records
        .iter()
        .filter(|r| r.operator == operator && calendar_year(&r.date) == Some(year))
        .count()
}

pub fn pie_values(series: &[SeriesEntry]) -> Vec<PieValue> {
    series
        .iter()
        .map(|e| PieValue {
            operator: e.operator.clone(),
            value: e.combined() as f64,
            fatalities: e.total_fatalities,
            aboard: e.total_aboard,
        })
        .collect()
}

/// Largest single metric across the series (0 when empty).
pub fn series_peak(series: &[SeriesEntry]) -> u64 {
    series.iter().map(SeriesEntry::peak).max().unwrap_or(0)
}
