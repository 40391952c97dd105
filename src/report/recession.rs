//! Charts covering every recession period in the dataset.

use super::aggregate::{group_by, FloatKey};
use super::chart::*;
use super::{by_vehicle_type, by_year};
use crate::sales::SalesRecord;

pub fn charts(records: &[SalesRecord]) -> [ChartSpec; 4] {
    let recession: Vec<&SalesRecord> = records.iter().filter(|r| r.recession).collect();
    log::debug!(
        "Recession report over {} of {} records",
        recession.len(),
        records.len()
    );

    let yearly_sales = ChartSpec::new(
        ChartKind::Line,
        "Average Automobile Sales by Year (Recession)",
    )
    .with_axes(LABEL_YEAR, LABEL_AUTOMOBILE_SALES)
    .with_series(by_year(
        group_by(recession.iter().copied(), |r| r.year, |r| r.automobile_sales).means(),
    ));

    let type_sales = ChartSpec::new(
        ChartKind::Bar,
        "Average Automobile Sales by Vehicle Type (Recession)",
    )
    .with_axes(LABEL_VEHICLE_TYPE, LABEL_AUTOMOBILE_SALES)
    .with_series(by_vehicle_type(
        group_by(
            recession.iter().copied(),
            |r| r.vehicle_type,
            |r| r.automobile_sales,
        )
        .means(),
    ));

    let advertising = ChartSpec::new(
        ChartKind::Pie,
        "Advertising Expenditure by Vehicle Type (Recession)",
    )
    .with_axes(LABEL_VEHICLE_TYPE, LABEL_ADVERTISING_EXPENDITURE)
    .with_series(by_vehicle_type(
        group_by(
            recession.iter().copied(),
            |r| r.vehicle_type,
            |r| r.advertising_expenditure,
        )
        .sums(),
    ));

    let unemployment = ChartSpec::new(
        ChartKind::Bar,
        "Automobile Sales vs Unemployment Rate (Recession)",
    )
    .with_axes(LABEL_UNEMPLOYMENT_RATE, LABEL_AUTOMOBILE_SALES)
    .with_series(
        group_by(
            recession.iter().copied(),
            |r| (r.vehicle_type, FloatKey::new(r.unemployment_rate)),
            |r| r.automobile_sales,
        )
        .sums()
        .into_iter()
        .map(|((vehicle_type, rate), sales)| {
            SeriesPoint::grouped(rate.value(), sales, vehicle_type.label())
        })
        .collect(),
    );

    [yearly_sales, type_sales, advertising, unemployment]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::record;
    use crate::sales::VehicleType::*;

    fn sample() -> Vec<SalesRecord> {
        vec![
            record(1980, 1, Sports, 100.0, 10.0, 5.0, true),
            record(1980, 2, SuperMiniCar, 300.0, 30.0, 5.0, true),
            record(1981, 1, Sports, 200.0, 20.0, 6.0, true),
            record(1981, 2, Sports, 900.0, 90.0, 6.0, false),
            record(1982, 1, ExecutiveCar, 50.0, 5.0, 5.0, true),
            record(1982, 2, Sports, 40.0, 4.0, 5.0, true),
        ]
    }

    #[test]
    fn average_sales_per_recession_year() {
        let [line, ..] = charts(&sample());
        assert_eq!(line.kind, ChartKind::Line);
        assert_eq!(
            line.series,
            vec![
                SeriesPoint::new(1980, 200.0),
                SeriesPoint::new(1981, 200.0),
                SeriesPoint::new(1982, 45.0),
            ]
        );
    }

    #[test]
    fn vehicle_types_in_first_appearance_order() {
        let [_, bar, ..] = charts(&sample());
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(
            bar.series,
            vec![
                SeriesPoint::new("Sports Car", (100.0 + 200.0 + 40.0) / 3.0),
                SeriesPoint::new("Super Mini Car", 300.0),
                SeriesPoint::new("Executive Car", 50.0),
            ]
        );
    }

    #[test]
    fn advertising_pie_totals_recession_spend() {
        let records = sample();
        let [_, _, pie, _] = charts(&records);
        let expected: f64 = records
            .iter()
            .filter(|r| r.recession)
            .map(|r| r.advertising_expenditure)
            .sum();
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.total(), expected);
        assert_eq!(pie.y_label.as_deref(), Some(LABEL_ADVERTISING_EXPENDITURE));
    }

    #[test]
    fn unemployment_chart_groups_by_type_and_rate() {
        let [.., bars] = charts(&sample());
        assert_eq!(
            bars.series,
            vec![
                SeriesPoint::grouped(5.0, 140.0, "Sports Car"),
                SeriesPoint::grouped(5.0, 300.0, "Super Mini Car"),
                SeriesPoint::grouped(6.0, 200.0, "Sports Car"),
                SeriesPoint::grouped(5.0, 50.0, "Executive Car"),
            ]
        );
        assert_eq!(
            bars.groups(),
            vec!["Sports Car", "Super Mini Car", "Executive Car"]
        );
    }

    #[test]
    fn no_recession_records_gives_empty_charts() {
        let records = vec![record(1990, 1, Sports, 1.0, 1.0, 1.0, false)];
        for chart in charts(&records) {
            assert!(chart.is_empty(), "{} should be empty", chart.title);
        }
    }
}
