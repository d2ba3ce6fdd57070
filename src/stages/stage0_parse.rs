use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvertResult;
use crate::matching::{HeaderMatcher, SpeakerTimeMatcher};
use crate::models::TranscriptRecord;

/// How header and text lines are laid out in a transcript file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LineLayout {
    /// Header, text, header, text, ...
    #[default]
    Paired,
    /// Header, text, separator, header, text, separator, ... (Otter's export
    /// with blank lines between speakers)
    Separated,
}

impl LineLayout {
    /// Number of lines per header/text group
    pub fn group_size(self) -> usize {
        match self {
            Self::Paired => 2,
            Self::Separated => 3,
        }
    }
}

/// Configuration for transcript parsing
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    pub layout: LineLayout,
}

/// Records of one file plus counters about what was dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Matched records in source order
    pub records: Vec<TranscriptRecord>,
    /// Lines examined as potential headers
    pub header_candidates: usize,
    /// Header candidates that did not match and were skipped
    pub skipped_headers: usize,
    /// Matched headers with no text line after them (emitted with empty text)
    pub unpaired_headers: usize,
}

/// Split decoded file content into lines, keeping the `\n` terminators
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Parse transcript lines with the default header pattern and paired layout
pub fn parse<S: AsRef<str>>(lines: &[S]) -> ConvertResult<Vec<TranscriptRecord>> {
    let matcher = SpeakerTimeMatcher::new()?;
    Ok(parse_lines(lines, &matcher, &ParseConfig::default()).records)
}

/// Parse decoded file content
pub fn parse_text<M>(text: &str, matcher: &M, config: &ParseConfig) -> ParseReport
where
    M: HeaderMatcher + ?Sized,
{
    parse_lines(&split_lines(text), matcher, config)
}

/// Turn header/text line groups into records.
///
/// Header candidates that the matcher rejects are skipped without consuming a
/// sequence number. A matched header with no text line gets empty text.
pub fn parse_lines<S, M>(lines: &[S], matcher: &M, config: &ParseConfig) -> ParseReport
where
    S: AsRef<str>,
    M: HeaderMatcher + ?Sized,
{
    let group = config.layout.group_size();
    let headers: Vec<&str> = lines.iter().step_by(group).map(AsRef::<str>::as_ref).collect();
    let texts: Vec<&str> = lines
        .iter()
        .skip(1)
        .step_by(group)
        .map(AsRef::<str>::as_ref)
        .collect();

    let mut report = ParseReport {
        header_candidates: headers.len(),
        ..Default::default()
    };

    for (index, header) in headers.iter().enumerate() {
        let Some(found) = matcher.match_header(header) else {
            debug!("Skipping header candidate {}: {:?}", index, header.trim_end());
            report.skipped_headers += 1;
            continue;
        };

        let text = match texts.get(index) {
            Some(line) => line.replace('\n', "").trim().to_string(),
            None => {
                report.unpaired_headers += 1;
                String::new()
            }
        };

        let sequence_number = report.records.len() as u32 + 1;
        report.records.push(TranscriptRecord::new(
            sequence_number,
            found.speaker.trim(),
            found.timestamp.trim(),
            text,
        ));
    }

    report
}
