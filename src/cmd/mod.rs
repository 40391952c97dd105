pub mod html_report;
pub mod report;
pub mod schema;
pub mod summary;

use crate::sales::{self, Dataset};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read the sales dataset from a CSV file (or stdin with "-")
pub fn read_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let dataset = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        let file = File::open(path)?;
        sales::read_csv(BufReader::new(file))?
    };
    if dataset.is_empty() {
        log::warn!("{} contains no sales records", path.display());
    }
    Ok(dataset)
}

fn read_from_stdin() -> anyhow::Result<Dataset> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(sales::read_csv(io::Cursor::new(buffer))?)
}
