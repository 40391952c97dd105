use super::{ReportType, Selection};
use crate::sales::Dataset;

/// Report-type and year controls of the dashboard.
///
/// The year input is disabled while the recession report is selected. The
/// chosen year survives switching report types back and forth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    report_type: ReportType,
    year: Option<i32>,
}

impl SelectionState {
    pub fn new(report_type: ReportType, year: Option<i32>) -> Self {
        SelectionState { report_type, year }
    }

    /// Initial state for a dataset: yearly report on `preferred` when the
    /// dataset has that year, otherwise on its earliest year.
    pub fn for_dataset(dataset: &Dataset, preferred: Option<i32>) -> Self {
        let years = dataset.years();
        let year = preferred
            .filter(|y| years.contains(y))
            .or_else(|| years.first().copied());
        SelectionState::new(ReportType::Yearly, year)
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn set_report_type(&mut self, report_type: ReportType) {
        self.report_type = report_type;
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = Some(year);
    }

    pub fn year_input_enabled(&self) -> bool {
        self.report_type != ReportType::Recession
    }

    pub fn selection(&self) -> Selection {
        Selection {
            report_type: self.report_type,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generate_report;
    use crate::report::tests::record;
    use crate::sales::VehicleType;

    #[test]
    fn recession_disables_year_input() {
        let mut state = SelectionState::new(ReportType::Yearly, Some(2005));
        assert!(state.year_input_enabled());
        state.set_report_type(ReportType::Recession);
        assert!(!state.year_input_enabled());
        state.set_report_type(ReportType::Yearly);
        assert!(state.year_input_enabled());
    }

    #[test]
    fn toggling_preserves_year_and_output() {
        let dataset = Dataset::new(vec![
            record(2005, 1, VehicleType::Sports, 100.0, 50.0, 5.0, false),
            record(2006, 1, VehicleType::Sports, 10.0, 5.0, 6.0, true),
        ]);
        let mut state = SelectionState::new(ReportType::Yearly, Some(2005));
        let before = generate_report(&dataset, &state.selection());

        state.set_report_type(ReportType::Recession);
        assert_eq!(state.year(), Some(2005));
        state.set_report_type(ReportType::Yearly);

        assert_eq!(state.selection(), Selection::yearly(2005));
        assert_eq!(generate_report(&dataset, &state.selection()), before);
    }

    #[test]
    fn initial_year_falls_back_to_earliest() {
        let dataset = Dataset::new(vec![
            record(2007, 1, VehicleType::Sports, 1.0, 1.0, 1.0, false),
            record(2005, 1, VehicleType::Sports, 1.0, 1.0, 1.0, false),
        ]);
        assert_eq!(SelectionState::for_dataset(&dataset, Some(2007)).year(), Some(2007));
        assert_eq!(SelectionState::for_dataset(&dataset, Some(1990)).year(), Some(2005));
        assert_eq!(SelectionState::for_dataset(&dataset, None).year(), Some(2005));
        assert_eq!(SelectionState::for_dataset(&Dataset::default(), None).year(), None);
    }
}
