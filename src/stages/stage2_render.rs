use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, warn};

use crate::error::{ConvertError, ConvertResult};
use crate::models::TranscriptSheet;

/// Header row written at the top of every sheet
pub const HEADERS: [&str; 4] = ["ConversationID", "Name", "Time", "Text"];

const COLUMN_WIDTHS: [f64; 4] = [16.0, 20.0, 12.0, 100.0];

/// Longest string a single xlsx cell holds, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Builds one in-memory workbook, one worksheet per transcript
pub struct WorkbookAssembler {
    workbook: Workbook,
    header_format: Format,
    /// Lowercased names already used; Excel compares sheet names case-insensitively
    used_names: Vec<String>,
}

impl WorkbookAssembler {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            header_format: Format::new().set_bold(),
            used_names: Vec::new(),
        }
    }

    /// Number of sheets added so far
    pub fn sheet_count(&self) -> usize {
        self.used_names.len()
    }

    /// Add a sheet with the header row followed by one row per record.
    ///
    /// The sheet is built on its own and only pushed into the workbook once
    /// every cell has been written, so a failed call leaves the workbook as it was.
    pub fn add_sheet(&mut self, sheet: &TranscriptSheet) -> ConvertResult<()> {
        let name = sheet.sheet_name.as_str();
        let wrap = |source: XlsxError| ConvertError::Workbook {
            sheet: name.to_string(),
            source,
        };

        let folded = name.to_lowercase();
        if self.used_names.contains(&folded) {
            return Err(wrap(XlsxError::SheetnameReused(name.to_string())));
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(name).map_err(wrap)?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &self.header_format)
                .map_err(wrap)?;
        }
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width).map_err(wrap)?;
        }
        worksheet.set_freeze_panes(1, 0).map_err(wrap)?;

        for (index, record) in sheet.records.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet
                .write_number(row, 0, f64::from(record.sequence_number()))
                .map_err(wrap)?;
            let cells = [record.speaker_name(), record.timestamp(), record.text()];
            for (col, value) in (1u16..).zip(cells) {
                let value = clamp_cell(value, name, row, col);
                worksheet.write_string(row, col, value).map_err(wrap)?;
            }
        }

        self.workbook.push_worksheet(worksheet);
        debug!("Added sheet '{}' with {} rows", name, sheet.records.len());
        self.used_names.push(folded);
        Ok(())
    }

    /// Serialize the workbook to xlsx bytes
    pub fn finish(mut self) -> ConvertResult<Vec<u8>> {
        self.workbook.save_to_buffer().map_err(ConvertError::Save)
    }
}

impl Default for WorkbookAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut a cell value to MAX_CELL_CHARS characters
fn clamp_cell<'a>(value: &'a str, sheet: &str, row: u32, col: u16) -> &'a str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            warn!(
                "Truncating cell in sheet '{}' row {} column {} to {} characters",
                sheet,
                row + 1,
                col + 1,
                MAX_CELL_CHARS
            );
            &value[..end]
        }
        None => value,
    }
}

/// Render all sheets, in order, into one xlsx buffer
pub fn render_workbook(sheets: &[TranscriptSheet]) -> ConvertResult<Vec<u8>> {
    let mut assembler = WorkbookAssembler::new();
    for sheet in sheets {
        assembler.add_sheet(sheet)?;
    }
    assembler.finish()
}

/// Write rendered workbook bytes to disk
pub fn write_workbook(bytes: &[u8], path: &Path) -> ConvertResult<()> {
    info!("Writing workbook to {:?}", path);
    std::fs::write(path, bytes).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}
