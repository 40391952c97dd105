use crate::cmd::read_dataset;
use crate::report::chart::LABEL_VEHICLE_TYPE;
use crate::report::{ChartSpec, Report, ReportType, SelectionState};
use crate::utils::{format_value, write_csv};
use clap::Args;
use serde::Serialize;
use std::{io, path::PathBuf};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// CSV file containing the sales dataset ("-" for stdin)
    #[arg(short, long)]
    data: PathBuf,

    /// Type of report to generate: yearly or recession
    #[arg(short, long, default_value_t = ReportType::Yearly)]
    report: ReportType,

    /// Year to drill into (yearly reports only, defaults to the earliest year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON chart specifications
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output chart series as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = read_dataset(&self.data)?;

        let mut state = SelectionState::for_dataset(&dataset, None);
        state.set_report_type(self.report);
        if let Some(year) = self.year {
            if !state.year_input_enabled() {
                log::warn!("Ignoring --year {} for a recession report", year);
            } else if !dataset.years().contains(&year) {
                log::warn!("No sales records for {}", year);
            }
            state.set_year(year);
        }

        let report = Report::generate(&dataset, state.selection());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else if self.csv {
            write_csv(series_rows(&report.charts), io::stdout())
        } else {
            self.print_report(&report);
            Ok(())
        }
    }

    fn print_report(&self, report: &Report) {
        let heading = match (report.selection.report_type, report.selection.year) {
            (ReportType::Yearly, Some(year)) => format!("{} ({})", ReportType::Yearly.display(), year),
            (report_type, _) => report_type.display().to_string(),
        };
        println!();
        println!("{}", heading.to_uppercase());

        for (idx, chart) in report.charts.iter().enumerate() {
            println!();
            println!("{}. {} [{}]", idx + 1, chart.title, chart.kind);
            print_chart(chart);
        }
    }
}

fn print_chart(chart: &ChartSpec) {
    if chart.is_empty() {
        println!("   No data");
        return;
    }

    let x_label = chart.x_label.as_deref().unwrap_or(LABEL_VEHICLE_TYPE);
    let y_label = chart.y_label.as_deref().unwrap_or("Value");
    let grouped = !chart.groups().is_empty();

    let mut builder = Builder::default();
    if grouped {
        builder.push_record([LABEL_VEHICLE_TYPE, x_label, y_label]);
    } else {
        builder.push_record([x_label, y_label]);
    }
    for point in &chart.series {
        let mut record = Vec::with_capacity(3);
        if grouped {
            record.push(point.group.clone().unwrap_or_default());
        }
        record.push(point.x.to_string());
        record.push(format_value(point.value));
        builder.push_record(record);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

/// Row for the CSV series output
#[derive(Debug, Serialize)]
pub struct SeriesRow {
    pub chart: usize,
    pub kind: String,
    pub title: String,
    pub x: String,
    pub group: String,
    pub value: f64,
}

fn series_rows(charts: &[ChartSpec]) -> Vec<SeriesRow> {
    charts
        .iter()
        .enumerate()
        .flat_map(|(idx, chart)| {
            chart.series.iter().map(move |p| SeriesRow {
                chart: idx + 1,
                kind: chart.kind.to_string(),
                title: chart.title.clone(),
                x: p.x.to_string(),
                group: p.group.clone().unwrap_or_default(),
                value: p.value,
            })
        })
        .collect()
}
