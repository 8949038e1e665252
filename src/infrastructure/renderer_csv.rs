use std::{fs::File, io::Write, path::PathBuf};

use anyhow::Context;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use serde_json::Value;

use crate::{OutputDirectory, RepositoryItem, ResultRenderer, SearchResult, StdResult};

/// The name of the CSV file written in the output directory.
pub const CSV_FILE_NAME: &str = "data.csv";

/// Renders the retained repositories as a CSV file.
pub struct CsvRenderer {
    output_directory: OutputDirectory,
}

impl CsvRenderer {
    /// Creates a new `CsvRenderer` instance writing into the given directory.
    pub fn new(output_directory: OutputDirectory) -> Self {
        Self { output_directory }
    }

    /// Writes the header and one record per item.
    ///
    /// The header holds the keys of the first item. Every record holds the values of its
    /// own item, in that item's key order, so records of heterogeneous items may not line up
    /// with the header. JSON numbers are written bare, every other value is quoted, and
    /// records end with `\r\n`.
    pub fn write_records<W: Write>(items: &[RepositoryItem], writer: W) -> StdResult<()> {
        let Some(first_item) = items.first() else {
            return Ok(());
        };
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        writer.write_record(first_item.keys().map(|key| quoted(key)))?;
        for item in items {
            writer.write_record(item.values().map(csv_field))?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// Quoting follows the JSON type of the value, not the look of its text.
fn csv_field(value: &Value) -> String {
    match value {
        Value::Number(number) => number.to_string(),
        Value::Null => quoted(""),
        Value::String(text) => quoted(text),
        other => quoted(&other.to_string()),
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

impl ResultRenderer for CsvRenderer {
    fn render(&self, result: &SearchResult) -> StdResult<Option<PathBuf>> {
        if result.is_empty() {
            return Ok(None);
        }

        info!("Generating CSV...");
        let directory = self.output_directory.ensure()?;
        let path = directory.join(CSV_FILE_NAME);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Self::write_records(result.items(), file)?;
        info!("CSV successfully generated in {}", directory.display());

        Ok(Some(directory.to_path_buf()))
    }
}
