//! Summary command - what the loaded dataset contains

use crate::cmd::read_dataset;
use crate::report::aggregate::group_by;
use crate::sales::Dataset;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// CSV file containing the sales dataset ("-" for stdin)
    #[arg(short, long)]
    data: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub records: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub years: usize,
    pub recession_records: usize,
    pub recession_years: Vec<i32>,
    pub vehicle_types: Vec<VehicleTypeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct VehicleTypeSummary {
    pub code: String,
    pub label: String,
    pub records: usize,
    pub total_sales: f64,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = read_dataset(&self.data)?;
        let summary = summarize(&dataset);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }
        Ok(())
    }
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let years = dataset.years();

    let mut recession_years: Vec<i32> = dataset.recession_records().map(|r| r.year).collect();
    recession_years.sort_unstable();
    recession_years.dedup();

    let sales = group_by(dataset.records(), |r| r.vehicle_type, |r| r.automobile_sales);
    let vehicle_types = sales
        .sums()
        .into_iter()
        .zip(sales.counts())
        .map(|((vehicle_type, total_sales), (_, records))| VehicleTypeSummary {
            code: vehicle_type.code().to_string(),
            label: vehicle_type.label().to_string(),
            records,
            total_sales,
        })
        .collect();

    DatasetSummary {
        records: dataset.len(),
        first_year: years.first().copied(),
        last_year: years.last().copied(),
        years: years.len(),
        recession_records: dataset.recession_records().count(),
        recession_years,
        vehicle_types,
        sha256: dataset.fingerprint().map(str::to_string),
    }
}

fn print_summary(summary: &DatasetSummary) {
    println!();
    println!("AUTOMOBILE SALES DATASET");
    println!();
    println!("  Records: {}", summary.records);
    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => {
            println!("  Years: {} ({} - {})", summary.years, first, last)
        }
        _ => println!("  Years: 0"),
    }
    println!(
        "  Recession records: {} across {} year(s)",
        summary.recession_records,
        summary.recession_years.len()
    );
    if let Some(ref sha256) = summary.sha256 {
        println!("  SHA-256: {}", sha256);
    }
    println!();

    if summary.vehicle_types.is_empty() {
        return;
    }
    println!("VEHICLE TYPES");
    for vt in &summary.vehicle_types {
        println!(
            "  {:<18} {:<16} {:>6} records  {:>14} sold",
            vt.label,
            vt.code,
            vt.records,
            crate::utils::format_value(vt.total_sales)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::read_csv;

    #[test]
    fn summarizes_years_and_vehicle_types() {
        let csv = "Year,Month,Automobile_Sales,Vehicle_Type,Advertising_Expenditure,unemployment_rate,Recession
1981,Jan,100,Sports,50,5.0,1
1980,Feb,200,Executivecar,150,5.0,0
1981,Mar,50,Sports,150,5.0,1";
        let summary = summarize(&read_csv(csv.as_bytes()).unwrap());

        assert_eq!(summary.records, 3);
        assert_eq!(summary.first_year, Some(1980));
        assert_eq!(summary.last_year, Some(1981));
        assert_eq!(summary.years, 2);
        assert_eq!(summary.recession_records, 2);
        assert_eq!(summary.recession_years, vec![1981]);
        assert_eq!(summary.vehicle_types.len(), 2);
        assert_eq!(summary.vehicle_types[0].label, "Sports Car");
        assert_eq!(summary.vehicle_types[0].records, 2);
        assert_eq!(summary.vehicle_types[0].total_sales, 150.0);
        assert_eq!(summary.sha256.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn empty_dataset_summary() {
        let summary = summarize(&Dataset::default());
        assert_eq!(summary.records, 0);
        assert_eq!(summary.first_year, None);
        assert!(summary.vehicle_types.is_empty());
        assert_eq!(summary.sha256, None);
    }
}
