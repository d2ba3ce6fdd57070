use tracing::{info, warn};

use crate::error::{ConvertError, ConvertResult};
use crate::io::{decode_source, BatchSummary, FileSummary, SourceFile};
use crate::matching::SpeakerTimeMatcher;
use crate::models::{SheetNameConfig, SheetNameState, TranscriptSheet};
use crate::stages::{parse_text, render_workbook, resolve_sheet_name, ParseConfig};

/// What to do with a file that is not valid UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Fail the whole batch, naming the file
    #[default]
    Abort,
    /// Leave the file out of the workbook and carry on
    Skip,
}

/// Configuration for one workbook build
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    pub parse: ParseConfig,
    pub sheet_names: SheetNameConfig,
    pub decode_policy: DecodePolicy,
    /// Replaces the default header pattern when set
    pub header_pattern: Option<String>,
}

/// Parsed sheets plus the per-file summary
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub sheets: Vec<TranscriptSheet>,
    pub summary: BatchSummary,
}

/// Decode, parse and name every source in order, without rendering.
///
/// Sheet names depend on the order of `sources`: the name state is shared
/// across the whole batch and updated once per decoded file.
pub fn prepare_batch(sources: &[SourceFile], config: &BatchConfig) -> ConvertResult<PreparedBatch> {
    let matcher = match &config.header_pattern {
        Some(pattern) => SpeakerTimeMatcher::with_pattern(pattern)?,
        None => SpeakerTimeMatcher::new()?,
    };

    let mut state = SheetNameState::new();
    let mut sheets = Vec::with_capacity(sources.len());
    let mut files = Vec::with_capacity(sources.len());

    for source in sources {
        let text = match decode_source(source) {
            Ok(text) => text,
            Err(err @ ConvertError::Decoding { .. }) if config.decode_policy == DecodePolicy::Skip => {
                warn!("Skipping {}: {}", source.name, err);
                files.push(FileSummary::undecodable(&source.name));
                continue;
            }
            Err(err) => return Err(err),
        };

        let report = parse_text(&text, &matcher, &config.parse);
        let sheet_name = resolve_sheet_name(&source.name, &mut state, &config.sheet_names);

        info!(
            "{} -> '{}': {} records, {} headers skipped",
            source.name,
            sheet_name,
            report.records.len(),
            report.skipped_headers
        );

        files.push(FileSummary::converted(&source.name, &sheet_name, &report));
        sheets.push(TranscriptSheet::new(sheet_name, report.records));
    }

    Ok(PreparedBatch {
        sheets,
        summary: BatchSummary::new(files),
    })
}

/// Convert all sources into one xlsx workbook
pub fn convert_batch(
    sources: &[SourceFile],
    config: &BatchConfig,
) -> ConvertResult<(Vec<u8>, BatchSummary)> {
    let prepared = prepare_batch(sources, config)?;
    let workbook = render_workbook(&prepared.sheets)?;
    Ok((workbook, prepared.summary))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::io::FileStatus;
    use crate::stages::LineLayout;

    fn source(name: &str, content: &str) -> SourceFile {
        SourceFile::new(name, content.as_bytes().to_vec())
    }

    fn invalid(name: &str) -> SourceFile {
        SourceFile::new(name, vec![b'A', b' ', b' ', 0xff, 0xfe, b'\n'])
    }

    #[test]
    fn test_duplicate_file_names_get_distinct_sheets() {
        let sources = vec![
            source("meeting.txt", "Alice  0:01\nHi\n"),
            source("meeting.txt", "Bob  0:02\nHello\n"),
            source("other.txt", ""),
        ];
        let prepared = prepare_batch(&sources, &BatchConfig::default()).unwrap();
        let names: Vec<&str> = prepared.sheets.iter().map(|s| s.sheet_name.as_str()).collect();

        assert_eq!(names, vec!["meeting", "meeting (1)", "other"]);
        assert_eq!(prepared.sheets[1].records[0].speaker_name(), "Bob");
        assert!(prepared.sheets[2].records.is_empty());
    }

    #[test]
    fn test_undecodable_file_aborts_by_default() {
        let sources = vec![source("good.txt", "Alice  0:01\nHi\n"), invalid("broken.txt")];
        let err = prepare_batch(&sources, &BatchConfig::default()).unwrap_err();

        assert_eq!(err.file_name(), Some("broken.txt"));
        assert!(err.to_string().contains("broken.txt"));
    }

    #[test]
    fn test_undecodable_file_skipped_without_taking_a_name() {
        let config = BatchConfig {
            decode_policy: DecodePolicy::Skip,
            ..Default::default()
        };
        let sources = vec![
            invalid("notes.txt"),
            source("notes.txt", "Alice  0:01\nHi\n"),
        ];
        let prepared = prepare_batch(&sources, &config).unwrap();

        assert_eq!(prepared.sheets.len(), 1);
        assert_eq!(prepared.sheets[0].sheet_name, "notes");
        assert_eq!(prepared.summary.files[0].status, FileStatus::SkippedUndecodable);
        assert_eq!(prepared.summary.files[1].status, FileStatus::Converted);
        assert_eq!(prepared.summary.total_records, 1);
    }

    #[test]
    fn test_invalid_header_pattern_fails_before_reading() {
        let config = BatchConfig {
            header_pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        let err = prepare_batch(&[invalid("x.txt")], &config).unwrap_err();
        assert!(matches!(err, ConvertError::Pattern(_)));
    }

    #[test]
    fn test_separated_layout_applies_to_every_file() {
        let config = BatchConfig {
            parse: ParseConfig {
                layout: LineLayout::Separated,
            },
            ..Default::default()
        };
        let sources = vec![source(
            "call.txt",
            "Alice  0:00:01\nHello\n\nBob  0:00:04\nHi\n\n",
        )];
        let prepared = prepare_batch(&sources, &config).unwrap();

        assert_eq!(prepared.sheets[0].records.len(), 2);
        assert_eq!(prepared.summary.files[0].skipped_headers, 0);
    }

    #[test]
    fn test_overlong_text_line_does_not_fail_the_batch() {
        let long = format!("Alice  0:00:01\n{}\n", "x".repeat(40_000));
        let sources = vec![source("long.txt", &long), source("ok.txt", "Bob  0:00:02\nHi\n")];
        let (bytes, summary) = convert_batch(&sources, &BatchConfig::default()).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["long", "ok"]);
        let range = workbook.worksheet_range("long").unwrap();
        match range.get_value((1, 3)) {
            Some(Data::String(text)) => assert_eq!(text.chars().count(), 32_767),
            other => panic!("unexpected cell: {:?}", other),
        }
        assert_eq!(summary.total_records, 2);
    }

    #[test]
    fn test_convert_batch_end_to_end() {
        let sources = vec![
            source(
                "standup.txt",
                "Alice  0:00:01\nMorning\nnoise\nmore noise\nBob  0:00:07\nHey\n",
            ),
            source("standup.txt", ""),
        ];
        let (bytes, summary) = convert_batch(&sources, &BatchConfig::default()).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["standup", "standup (1)"]);

        let first = workbook.worksheet_range("standup").unwrap();
        assert_eq!(first.height(), 3);
        assert_eq!(first.get_value((2, 0)), Some(&Data::Float(2.0)));
        assert_eq!(first.get_value((2, 1)), Some(&Data::String("Bob".to_string())));

        let second = workbook.worksheet_range("standup (1)").unwrap();
        assert_eq!(second.height(), 1);

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.files[0].skipped_headers, 1);
    }
}
