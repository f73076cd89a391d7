// File: crates/crash-chart-core/src/record.rs
// Summary: Incident records and the in-memory record store loaded once from CSV.
// Notes:
// - `Fatalities`/`Aboard` are coerced at load time: blank or non-numeric text
//   counts as zero, fractional values are truncated.
// - `Date` stays raw text. Year keys are derived on demand according to a
//   `YearMode` (numeric coercion of the raw text, or calendar-date parsing).

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Deserializer};

use crate::error::{ChartError, Result};

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Operator", "Fatalities", "Aboard"];

/// Accepted calendar layouts for `YearMode::Calendar` (after bare years and RFC 3339).
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// One row of the source dataset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IncidentRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Fatalities", deserialize_with = "lenient_count")]
    pub fatalities: u64,
    #[serde(rename = "Aboard", deserialize_with = "lenient_count")]
    pub aboard: u64,
}

impl IncidentRecord {
    pub fn new(date: impl Into<String>, operator: impl Into<String>, fatalities: u64, aboard: u64) -> Self {
        Self { date: date.into(), operator: operator.into(), fatalities, aboard }
    }

    /// Year key of this record under `mode`, if it has one.
    pub fn year(&self, mode: YearMode) -> Option<i32> {
        match mode {
            YearMode::Raw => raw_year(&self.date),
            YearMode::Calendar => calendar_year(&self.date),
        }
    }
}

/// How a record's `Date` text is turned into the integer the year filter compares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearMode {
    /// The whole `Date` value read as a number; only bare years ("1985") match.
    #[default]
    Raw,
    /// `Date` parsed as a calendar date and reduced to its year.
    Calendar,
}

impl FromStr for YearMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(YearMode::Raw),
            "calendar" => Ok(YearMode::Calendar),
            _ => Err(ChartError::UnknownYearMode(s.to_string())),
        }
    }
}

/// Selectable record fields for `RecordStore::distinct_values`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Date,
    Operator,
    Fatalities,
    Aboard,
}

impl Field {
    fn text(self, rec: &IncidentRecord) -> String {
        match self {
            Field::Date => rec.date.clone(),
            Field::Operator => rec.operator.clone(),
            Field::Fatalities => rec.fatalities.to_string(),
            Field::Aboard => rec.aboard.to_string(),
        }
    }
}

/// Parsed dataset, read-only after load.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<IncidentRecord>,
}

impl RecordStore {
    pub fn from_records(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Load the CSV file at `path`. Any read/parse failure is fatal for the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        info!("loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse CSV with headers from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        debug!("headers: {:?}", headers.iter().collect::<Vec<_>>());
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ChartError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for row in rdr.deserialize::<IncidentRecord>() {
            records.push(row?);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[IncidentRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Distinct values of `field`, in order of first appearance.
    pub fn distinct_values(&self, field: Field) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| field.text(r))
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    /// Distinct year keys under `mode`, in order of first appearance.
    /// Records without a year key are skipped.
    pub fn distinct_years(&self, mode: YearMode) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.year(mode))
            .filter(|y| seen.insert(*y))
            .collect()
    }

    /// Distinct operator names, in order of first appearance.
    pub fn distinct_operators(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.operator.as_str())
            .filter(|op| seen.insert(*op))
            .collect()
    }
}

/// Numeric coercion for count columns: trimmed, blank/non-numeric/negative -> 0.
pub fn coerce_count(raw: &str) -> u64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<u64, D::Error> {
    let raw = String::deserialize(de)?;
    Ok(coerce_count(&raw))
}

/// The raw `Date` text read as a number; only whole numbers yield a year.
pub fn raw_year(raw: &str) -> Option<i32> {
    let v = raw.trim().parse::<f64>().ok()?;
    if !v.is_finite() || v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 {
        return None;
    }
    Some(v as i32)
}

/// Calendar year of the `Date` text; a bare integer is taken as the year itself.
pub fn calendar_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.year());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Time,Operator,Fatalities,Aboard,Summary
1985,12:00,Aeroflot,10,12,first
1985,,Aeroflot,5,,second
1986,,Delta Air Lines,n/a,4,third
";

    #[test]
    fn loads_and_coerces_counts() {
        let store = RecordStore::from_reader(SAMPLE.as_bytes()).expect("load");
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[1].aboard, 0);
        assert_eq!(store.records()[2].fatalities, 0);
        assert_eq!(store.records()[2].aboard, 4);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = RecordStore::from_reader("Date,Operator,Aboard\n1985,X,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn("Fatalities")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = RecordStore::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, ChartError::Io { .. }));
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let store = RecordStore::from_reader(SAMPLE.as_bytes()).expect("load");
        assert_eq!(store.distinct_operators(), vec!["Aeroflot", "Delta Air Lines"]);
        assert_eq!(store.distinct_values(Field::Date), vec!["1985", "1986"]);
        assert_eq!(store.distinct_years(YearMode::Raw), vec![1985, 1986]);
    }

    #[test]
    fn coerce_count_edge_cases() {
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("  7 "), 7);
        assert_eq!(coerce_count("3.9"), 3);
        assert_eq!(coerce_count("-2"), 0);
        assert_eq!(coerce_count("NaN"), 0);
        assert_eq!(coerce_count("abc"), 0);
    }

    #[test]
    fn year_modes_disagree_on_full_dates() {
        let rec = IncidentRecord::new("09/17/1908", "Military - U.S. Army", 1, 2);
        assert_eq!(rec.year(YearMode::Raw), None);
        assert_eq!(rec.year(YearMode::Calendar), Some(1908));

        let bare = IncidentRecord::new("1985", "Aeroflot", 1, 2);
        assert_eq!(bare.year(YearMode::Raw), Some(1985));
        assert_eq!(bare.year(YearMode::Calendar), Some(1985));
    }

    #[test]
    fn calendar_year_formats() {
        assert_eq!(calendar_year("1999-03-04"), Some(1999));
        assert_eq!(calendar_year("2001-09-11T08:46:00Z"), Some(2001));
        assert_eq!(calendar_year("not a date"), None);
        assert_eq!(raw_year("1985.5"), None);
    }

    #[test]
    fn year_mode_parses_case_insensitively() {
        assert_eq!("Calendar".parse::<YearMode>().unwrap(), YearMode::Calendar);
        assert!("fiscal".parse::<YearMode>().is_err());
    }
}
