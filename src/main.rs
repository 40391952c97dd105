use clap::{Parser, Subcommand};

mod cmd;
mod report;
mod sales;
mod utils;

#[derive(Parser, Debug)]
#[command(
    name = "autosales",
    version,
    about = "Automobile sales statistics: yearly and recession-period reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the four charts of a yearly or recession report
    Report(cmd::report::ReportCommand),
    /// Write an interactive HTML dashboard and open it in the browser
    Html(cmd::html_report::HtmlCommand),
    /// Summarise the contents of a sales dataset
    Summary(cmd::summary::SummaryCommand),
    /// Print the dataset input format or the report output schema
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(report) => report.exec(),
        Command::Html(html) => html.exec(),
        Command::Summary(summary) => summary.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
