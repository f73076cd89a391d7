// File: crates/crash-chart-core/src/controls.rs
// Summary: Control surface: year/operator/chart-type selectors and the selection they produce.

use log::debug;

use crate::error::{ChartError, Result};
use crate::record::{RecordStore, YearMode};
use crate::render::ChartKind;

pub const YEAR: &str = "year";
pub const OPERATOR: &str = "operator";
pub const CHART_TYPE: &str = "chart-type";

/// What the filter and renderers read on each render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub year: i32,
    /// Substring filter on operator names; empty means no filter.
    pub operator: String,
    pub chart: ChartKind,
}

/// One dropdown. `free_text` selectors accept any value (options are suggestions).
#[derive(Clone, Debug)]
pub struct Selector {
    pub id: &'static str,
    options: Vec<String>,
    value: Option<String>,
    free_text: bool,
}

impl Selector {
    /// Strict selector with the first option selected.
    pub fn new(id: &'static str, options: Vec<String>) -> Self {
        let value = options.first().cloned();
        Self { id, options, value, free_text: false }
    }

    pub fn free_text(mut self) -> Self {
        self.free_text = true;
        self
    }

    pub fn options(&self) -> &[String] { &self.options }
    pub fn value(&self) -> Option<&str> { self.value.as_deref() }

    /// Select `value`; strict selectors reject anything that isn't an option.
    pub fn select(&mut self, value: &str) -> Result<()> {
        if !self.free_text && !self.options.iter().any(|o| o == value) {
            return Err(ChartError::InvalidOption { control: self.id, value: value.to_string() });
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// A user interaction with one selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    Year(i32),
    Operator(String),
    Chart(ChartKind),
}

impl ControlEvent {
    pub fn target(&self) -> &'static str {
        match self {
            ControlEvent::Year(_) => YEAR,
            ControlEvent::Operator(_) => OPERATOR,
            ControlEvent::Chart(_) => CHART_TYPE,
        }
    }

    fn value(&self) -> String {
        match self {
            ControlEvent::Year(y) => y.to_string(),
            ControlEvent::Operator(op) => op.trim().to_string(),
            ControlEvent::Chart(kind) => kind.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ControlSurface {
    widgets: Vec<Selector>,
}

impl ControlSurface {
    /// Selectors filled from the distinct values in `store`.
    /// The operator selector leads with an empty "all operators" entry.
    pub fn populate(store: &RecordStore, mode: YearMode) -> Self {
        let years: Vec<String> = store.distinct_years(mode).iter().map(i32::to_string).collect();
        let mut operators = vec![String::new()];
        operators.extend(store.distinct_operators().into_iter().map(str::to_string));
        let charts = ChartKind::ALL.iter().map(ChartKind::to_string).collect();
        debug!("controls: {} years, {} operators", years.len(), operators.len() - 1);

        Self {
            widgets: vec![
                Selector::new(YEAR, years),
                Selector::new(OPERATOR, operators).free_text(),
                Selector::new(CHART_TYPE, charts),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Selector> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Selector> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Detach a selector, as if its element vanished from the host page.
    pub fn remove(&mut self, id: &str) -> Option<Selector> {
        let pos = self.widgets.iter().position(|w| w.id == id)?;
        Some(self.widgets.remove(pos))
    }

    pub fn apply(&mut self, event: &ControlEvent) -> Result<()> {
        let target = event.target();
        let widget = self.get_mut(target).ok_or(ChartError::MissingControl(target))?;
        widget.select(&event.value())
    }

    /// Read the three selectors into a `Selection`.
    pub fn selection(&self) -> Result<Selection> {
        let year_raw = self.value_of(YEAR)?;
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| ChartError::InvalidOption { control: YEAR, value: year_raw.to_string() })?;
        let operator = self.value_of(OPERATOR)?.trim().to_string();
        let chart = self.value_of(CHART_TYPE)?.parse::<ChartKind>()?;
        Ok(Selection { year, operator, chart })
    }

    fn value_of(&self, id: &'static str) -> Result<&str> {
        let widget = self.get(id).ok_or(ChartError::MissingControl(id))?;
        widget.value().ok_or(ChartError::EmptyControl(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::IncidentRecord;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            IncidentRecord::new("1985", "Aeroflot", 10, 12),
            IncidentRecord::new("1986", "Delta", 2, 4),
        ])
    }

    #[test]
    fn populated_defaults() {
        let controls = ControlSurface::populate(&store(), YearMode::Raw);
        assert_eq!(controls.get(YEAR).unwrap().options(), ["1985", "1986"]);
        assert_eq!(controls.get(OPERATOR).unwrap().options(), ["", "Aeroflot", "Delta"]);
        let sel = controls.selection().unwrap();
        assert_eq!(sel, Selection { year: 1985, operator: String::new(), chart: ChartKind::Bar });
    }

    #[test]
    fn apply_changes_one_selector() {
        let mut controls = ControlSurface::populate(&store(), YearMode::Raw);
        controls.apply(&ControlEvent::Year(1986)).unwrap();
        controls.apply(&ControlEvent::Operator("  Del ".into())).unwrap();
        controls.apply(&ControlEvent::Chart(ChartKind::Pie)).unwrap();
        let sel = controls.selection().unwrap();
        assert_eq!(sel, Selection { year: 1986, operator: "Del".into(), chart: ChartKind::Pie });
    }

    #[test]
    fn unknown_year_is_rejected_and_state_kept() {
        let mut controls = ControlSurface::populate(&store(), YearMode::Raw);
        let err = controls.apply(&ControlEvent::Year(2020)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidOption { control: YEAR, .. }));
        assert_eq!(controls.selection().unwrap().year, 1985);
    }

    #[test]
    fn missing_selector_is_reported() {
        let mut controls = ControlSurface::populate(&store(), YearMode::Raw);
        controls.remove(YEAR);
        assert!(matches!(controls.selection(), Err(ChartError::MissingControl(YEAR))));
        assert!(matches!(controls.apply(&ControlEvent::Year(1985)), Err(ChartError::MissingControl(YEAR))));
    }

    #[test]
    fn empty_year_selector() {
        let controls = ControlSurface::populate(&RecordStore::default(), YearMode::Raw);
        assert!(matches!(controls.selection(), Err(ChartError::EmptyControl(YEAR))));
    }
}
