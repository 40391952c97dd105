//! Charts drilling into a single year, with the all-years trend for context.

use super::aggregate::group_by;
use super::chart::*;
use super::{by_vehicle_type, by_year};
use crate::sales::{month_abbrev, SalesRecord};

const MONTHS_PER_YEAR: f64 = 12.0;

pub fn charts(records: &[SalesRecord], year: Option<i32>) -> [ChartSpec; 4] {
    let year_slice: Vec<&SalesRecord> = match year {
        Some(year) => records.iter().filter(|r| r.year == year).collect(),
        None => Vec::new(),
    };
    log::debug!(
        "Yearly report for {:?}: {} of {} records",
        year,
        year_slice.len(),
        records.len()
    );
    let suffix = year.map(|y| format!(" in {}", y)).unwrap_or_default();

    let trend = ChartSpec::new(ChartKind::Line, "Yearly Average Automobile Sales")
        .with_axes(LABEL_YEAR, LABEL_AUTOMOBILE_SALES)
        .with_series(by_year(
            group_by(records, |r| r.year, |r| r.automobile_sales).means(),
        ));

    let mut monthly = group_by(
        year_slice.iter().copied(),
        |r| r.month,
        |r| r.automobile_sales,
    )
    .sums();
    monthly.sort_by_key(|(month, _)| month.number_from_month());
    let monthly_sales = ChartSpec::new(
        ChartKind::Line,
        format!("Total Monthly Automobile Sales{}", suffix),
    )
    .with_axes(LABEL_MONTH, LABEL_AUTOMOBILE_SALES)
    .with_series(
        monthly
            .into_iter()
            .map(|(month, sales)| SeriesPoint::new(month_abbrev(month), sales))
            .collect(),
    );

    let type_sales = ChartSpec::new(
        ChartKind::Bar,
        format!("Average Monthly Automobile Sales by Vehicle Type{}", suffix),
    )
    .with_axes(LABEL_VEHICLE_TYPE, LABEL_AUTOMOBILE_SALES)
    .with_series(by_vehicle_type(
        group_by(
            year_slice.iter().copied(),
            |r| r.vehicle_type,
            |r| r.automobile_sales,
        )
        .sums()
        .into_iter()
        .map(|(vehicle_type, total)| (vehicle_type, total / MONTHS_PER_YEAR))
        .collect(),
    ));

    let advertising = ChartSpec::new(
        ChartKind::Pie,
        format!("Advertising Expenditure by Vehicle Type{}", suffix),
    )
    .with_axes(LABEL_VEHICLE_TYPE, LABEL_ADVERTISING_EXPENDITURE)
    .with_series(by_vehicle_type(
        group_by(
            year_slice.iter().copied(),
            |r| r.vehicle_type,
            |r| r.advertising_expenditure,
        )
        .sums(),
    ));

    [trend, monthly_sales, type_sales, advertising]
}
