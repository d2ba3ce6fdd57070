pub mod batch;
pub mod error;
pub mod io;
pub mod matching;
pub mod models;
pub mod stages;

pub use batch::{convert_batch, prepare_batch, BatchConfig, DecodePolicy, PreparedBatch};
pub use error::{ConvertError, ConvertResult};
pub use io::{decode_source, read_source_files, BatchSummary, FileStatus, FileSummary, SourceFile};
pub use matching::{DEFAULT_HEADER_PATTERN, HeaderMatch, HeaderMatcher, SpeakerTimeMatcher};
pub use models::{SheetNameConfig, SheetNameState, TranscriptRecord, TranscriptSheet};
pub use stages::{
    parse, parse_lines, parse_text, render_workbook, resolve_sheet_name, resolve_sheet_names,
    write_workbook, HEADERS, LineLayout, ParseConfig, ParseReport, WorkbookAssembler,
};
