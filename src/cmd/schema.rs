//! Schema command - print the expected input and the report output formats

use crate::report::Report;
use crate::sales::SalesRecordRow;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema (report output), csv-header or csv-fields (dataset input)
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for `report --json` output
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(Report);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", SalesRecordRow::csv_columns().join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format");
        println!("================");
        println!();
        for field in SalesRecordRow::csv_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:24} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!("Additional columns are ignored.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_schema_describes_charts() {
        let schema = serde_json::to_value(schema_for!(Report)).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("selection").is_some());
        assert!(properties.get("charts").is_some());
        assert!(schema["definitions"].get("ChartSpec").is_some());
    }

    #[test]
    fn csv_fields_have_descriptions() {
        for field in SalesRecordRow::csv_schema() {
            assert!(!field.description.is_empty(), "{} undocumented", field.name);
        }
    }
}
