//! CSV assembly shared by every report.
//!
//! Fields containing a delimiter, quote or line break are wrapped in double
//! quotes with inner quotes doubled; everything else is written bare.

use anyhow::Result;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Rows are encoded one at a time so the document can also hold bare blank
/// lines, which a `csv::Writer` would render as `""`.
pub struct CsvDocument {
    buffer: Vec<u8>,
}

impl CsvDocument {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut self.buffer);
        writer.write_record(fields)?;
        writer.flush()?;
        Ok(())
    }

    pub fn blank_line(&mut self) {
        self.buffer.push(b'\n');
    }

    pub fn finish(self) -> Result<String> {
        Ok(String::from_utf8(self.buffer)?)
    }
}

impl Default for CsvDocument {
    fn default() -> Self {
        Self::new()
    }
}

pub fn csv_row<I, T>(fields: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut document = CsvDocument::new();
    document.row(fields)?;
    let mut line = document.finish()?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
