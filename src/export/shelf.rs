use std::io::Write;

use crate::export::{Export, ExportError};
use crate::model::ShelfEntry;

const CSV_HEADER: [&str; 3] = ["title", "author", "location"];

fn md_cell(text: &str) -> String {
    if text.is_empty() {
        "N/A".to_string()
    } else {
        text.replace('|', "\\|")
    }
}

impl Export for [ShelfEntry] {
    fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        if self.is_empty() {
            wtr.write_record(CSV_HEADER)?;
        }
        for entry in self {
            wtr.serialize(entry)?;
        }
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }

    fn to_md(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        writeln!(buffer, "| Title | Author | Location |")?;
        writeln!(buffer, "|-------|--------|----------|")?;

        for entry in self {
            writeln!(
                buffer,
                "| {} | {} | {} |",
                md_cell(&entry.title),
                md_cell(&entry.author),
                md_cell(&entry.location)
            )?;
        }
        Ok(String::from_utf8(buffer)?)
    }

    fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string(self).map_err(ExportError::Json)
    }
}
