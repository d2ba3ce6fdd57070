use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::stages::ParseReport;

/// Outcome for one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Converted,
    SkippedUndecodable,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub source: String,
    /// Sheet the records went to; absent for skipped files
    pub sheet_name: Option<String>,
    pub status: FileStatus,
    pub header_candidates: usize,
    pub records: usize,
    pub skipped_headers: usize,
    pub unpaired_headers: usize,
    /// Lines per speaker, in order of first appearance
    pub speakers: Vec<SpeakerCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerCount {
    pub name: String,
    pub lines: usize,
}

impl FileSummary {
    pub fn converted(source: &str, sheet_name: &str, report: &ParseReport) -> Self {
        let mut speakers: Vec<SpeakerCount> = Vec::new();
        for record in &report.records {
            match speakers.iter_mut().find(|s| s.name == record.speaker_name()) {
                Some(count) => count.lines += 1,
                None => speakers.push(SpeakerCount {
                    name: record.speaker_name().to_string(),
                    lines: 1,
                }),
            }
        }

        Self {
            source: source.to_string(),
            sheet_name: Some(sheet_name.to_string()),
            status: FileStatus::Converted,
            header_candidates: report.header_candidates,
            records: report.records.len(),
            skipped_headers: report.skipped_headers,
            unpaired_headers: report.unpaired_headers,
            speakers,
        }
    }

    pub fn undecodable(source: &str) -> Self {
        Self {
            source: source.to_string(),
            sheet_name: None,
            status: FileStatus::SkippedUndecodable,
            header_candidates: 0,
            records: 0,
            skipped_headers: 0,
            unpaired_headers: 0,
            speakers: vec![],
        }
    }
}

/// Per-file outcomes of one workbook build
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub files: Vec<FileSummary>,
    pub total_records: usize,
    pub sheets_written: usize,
    pub files_skipped: usize,
}

impl BatchSummary {
    pub fn new(files: Vec<FileSummary>) -> Self {
        let total_records = files.iter().map(|f| f.records).sum();
        let sheets_written = files
            .iter()
            .filter(|f| f.status == FileStatus::Converted)
            .count();
        Self {
            files_skipped: files.len() - sheets_written,
            files,
            total_records,
            sheets_written,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    /// Plain-text report, one block per file
    pub fn format(&self) -> String {
        let mut output = String::new();

        for file in &self.files {
            output.push_str(&format!("{}\n", file.source));
            match &file.sheet_name {
                Some(sheet) => {
                    output.push_str(&format!("  Sheet: {}\n", sheet));
                    output.push_str(&format!(
                        "  Records: {} of {} header lines ({} skipped, {} without text)\n",
                        file.records,
                        file.header_candidates,
                        file.skipped_headers,
                        file.unpaired_headers
                    ));
                    for speaker in &file.speakers {
                        output.push_str(&format!("  {}: {} lines\n", speaker.name, speaker.lines));
                    }
                }
                None => output.push_str("  Skipped: not valid UTF-8\n"),
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "{} sheets, {} records, {} files skipped\n",
            self.sheets_written, self.total_records, self.files_skipped
        ));
        output
    }
}
