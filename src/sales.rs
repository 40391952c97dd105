//! Automobile sales records and the CSV loader.

use autosales_derive::CsvSchema;
use chrono::Month;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io::Read;
use thiserror::Error;

/// Vehicle category as coded in the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    SuperMiniCar,
    MediumFamilyCar,
    SmallFamilyCar,
    Sports,
    ExecutiveCar,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::SuperMiniCar,
        VehicleType::MediumFamilyCar,
        VehicleType::SmallFamilyCar,
        VehicleType::Sports,
        VehicleType::ExecutiveCar,
    ];

    /// Raw code used in the CSV. The misspellings are part of the published data.
    pub fn code(&self) -> &'static str {
        match self {
            VehicleType::SuperMiniCar => "Supperminicar",
            VehicleType::MediumFamilyCar => "Mediumfamilycar",
            VehicleType::SmallFamilyCar => "Smallfamiliycar",
            VehicleType::Sports => "Sports",
            VehicleType::ExecutiveCar => "Executivecar",
        }
    }

    /// Human readable name shown on charts.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::SuperMiniCar => "Super Mini Car",
            VehicleType::MediumFamilyCar => "Medium Family Car",
            VehicleType::SmallFamilyCar => "Small Family Car",
            VehicleType::Sports => "Sports Car",
            VehicleType::ExecutiveCar => "Executive Car",
        }
    }

    pub fn from_code(code: &str) -> Option<VehicleType> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// One row of the sales dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i32,
    pub month: Month,
    pub vehicle_type: VehicleType,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    pub recession: bool,
}

/// Column description produced by the `CsvSchema` derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// CSV record format for the sales dataset. Unknown columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, CsvSchema)]
pub struct SalesRecordRow {
    /// Calendar year of the observation
    #[serde(rename = "Year")]
    pub year: i32,
    /// Month name or three letter abbreviation (Jan, Feb, ...)
    #[serde(rename = "Month")]
    pub month: String,
    /// Number of automobiles sold
    #[serde(rename = "Automobile_Sales")]
    pub automobile_sales: f64,
    /// Supperminicar, Mediumfamilycar, Smallfamiliycar, Sports or Executivecar
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: String,
    /// Advertising spend for the period
    #[serde(rename = "Advertising_Expenditure")]
    pub advertising_expenditure: f64,
    /// Unemployment rate in percent
    #[serde(rename = "unemployment_rate")]
    pub unemployment_rate: f64,
    /// 1 during a recession period, otherwise 0
    #[serde(rename = "Recession")]
    pub recession: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read sales csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read sales data: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {row}: unknown month {value:?}")]
    UnknownMonth { row: usize, value: String },
    #[error("row {row}: unknown vehicle type {value:?}")]
    UnknownVehicleType { row: usize, value: String },
    #[error("row {row}: invalid recession flag {value:?}")]
    InvalidRecessionFlag { row: usize, value: String },
}

impl SalesRecordRow {
    /// Validate and convert a raw row. `row` is the 1-based data row number.
    fn into_record(self, row: usize) -> Result<SalesRecord, LoadError> {
        let month = self
            .month
            .trim()
            .parse::<Month>()
            .map_err(|_| LoadError::UnknownMonth {
                row,
                value: self.month.clone(),
            })?;
        let vehicle_type =
            VehicleType::from_code(self.vehicle_type.trim()).ok_or_else(|| {
                LoadError::UnknownVehicleType {
                    row,
                    value: self.vehicle_type.clone(),
                }
            })?;
        let recession = parse_flag(&self.recession).ok_or_else(|| {
            LoadError::InvalidRecessionFlag {
                row,
                value: self.recession.clone(),
            }
        })?;

        Ok(SalesRecord {
            year: self.year,
            month,
            vehicle_type,
            automobile_sales: self.automobile_sales,
            advertising_expenditure: self.advertising_expenditure,
            unemployment_rate: self.unemployment_rate,
            recession,
        })
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Some(true),
        "0" | "0.0" | "false" => Some(false),
        _ => None,
    }
}

/// The loaded sales table. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    fingerprint: Option<String>,
}

impl Dataset {
    #[cfg(test)]
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Dataset {
            records,
            fingerprint: None,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn recession_records(&self) -> impl Iterator<Item = &SalesRecord> {
        self.records.iter().filter(|r| r.recession)
    }

    /// Hex SHA-256 of the bytes the dataset was parsed from.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

/// Read the sales dataset from CSV.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Dataset, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let fingerprint = hex::encode(Sha256::digest(&bytes));

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());
    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<SalesRecordRow>().enumerate() {
        records.push(row?.into_record(idx + 1)?);
    }
    log::info!("Read {} sales records", records.len());

    Ok(Dataset {
        records,
        fingerprint: Some(fingerprint),
    })
}

/// Three letter month abbreviation as used in the dataset.
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Date,Year,Month,Recession,Automobile_Sales,GDP,unemployment_rate,Advertising_Expenditure,Vehicle_Type
1/31/1980,1980,Jan,1,456,17.3,5.4,1558,Supperminicar
2/29/1980,1980,Feb,1,555.9,23.2,4.8,3048,Smallfamiliycar
3/31/1981,1981,March,0,620,28.1,3.1,3137,Sports";

    #[test]
    fn parse_csv_ignores_extra_columns() {
        let dataset = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records()[0];
        assert_eq!(first.year, 1980);
        assert_eq!(first.month, Month::January);
        assert_eq!(first.vehicle_type, VehicleType::SuperMiniCar);
        assert_eq!(first.automobile_sales, 456.0);
        assert_eq!(first.advertising_expenditure, 1558.0);
        assert_eq!(first.unemployment_rate, 5.4);
        assert!(first.recession);

        assert_eq!(dataset.records()[2].month, Month::March);
        assert!(!dataset.records()[2].recession);
    }

    #[test]
    fn years_are_distinct_and_ascending() {
        let dataset = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.years(), vec![1980, 1981]);
        assert_eq!(dataset.recession_records().count(), 2);
    }

    #[test]
    fn fingerprint_is_sha256_of_input() {
        let dataset = read_csv(CSV.as_bytes()).unwrap();
        let expected = hex::encode(Sha256::digest(CSV.as_bytes()));
        assert_eq!(dataset.fingerprint(), Some(expected.as_str()));
        assert_eq!(Dataset::new(Vec::new()).fingerprint(), None);
    }

    #[test]
    fn unknown_vehicle_type_reports_row() {
        let csv = "Year,Month,Automobile_Sales,Vehicle_Type,Advertising_Expenditure,unemployment_rate,Recession
2005,Jan,100,Sports,50,5.0,0
2005,Feb,200,Truck,150,5.0,0";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownVehicleType { row: 2, ref value } if value == "Truck"
        ));
    }

    #[test]
    fn unknown_month_is_rejected() {
        let csv = "Year,Month,Automobile_Sales,Vehicle_Type,Advertising_Expenditure,unemployment_rate,Recession
2005,Smarch,100,Sports,50,5.0,0";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownMonth { row: 1, .. }));
    }

    #[test]
    fn invalid_recession_flag_is_rejected() {
        let csv = "Year,Month,Automobile_Sales,Vehicle_Type,Advertising_Expenditure,unemployment_rate,Recession
2005,Jan,100,Sports,50,5.0,maybe";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecessionFlag { row: 1, .. }));
    }

    #[test]
    fn vehicle_codes_round_trip_to_labels() {
        for vehicle_type in VehicleType::ALL {
            assert_eq!(VehicleType::from_code(vehicle_type.code()), Some(vehicle_type));
            assert_ne!(vehicle_type.code(), vehicle_type.label());
        }
        assert_eq!(VehicleType::Sports.label(), "Sports Car");
    }

    #[test]
    fn csv_schema_lists_input_columns() {
        assert_eq!(
            SalesRecordRow::csv_columns(),
            vec![
                "Year",
                "Month",
                "Automobile_Sales",
                "Vehicle_Type",
                "Advertising_Expenditure",
                "unemployment_rate",
                "Recession"
            ]
        );
        assert!(SalesRecordRow::csv_schema().iter().all(|f| f.required));
    }

    #[test]
    fn month_abbreviations() {
        assert_eq!(month_abbrev(Month::January), "Jan");
        assert_eq!(month_abbrev(Month::September), "Sep");
    }
}
