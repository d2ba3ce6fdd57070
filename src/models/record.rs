use serde::{Deserialize, Serialize};

/// One matched header/text pair from a transcript file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    sequence_number: u32,
    speaker_name: String,
    timestamp: String,
    text: String,
}

impl TranscriptRecord {
    pub(crate) fn new(
        sequence_number: u32,
        speaker_name: impl Into<String>,
        timestamp: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            speaker_name: speaker_name.into(),
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    /// 1-based position among the records of the same file
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    /// Timestamp exactly as written in the header line (e.g. "0:01:23")
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Records of one input file together with the sheet they are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSheet {
    /// Resolved, collision-free worksheet name
    pub sheet_name: String,
    /// Records in source order
    pub records: Vec<TranscriptRecord>,
}

impl TranscriptSheet {
    pub fn new(sheet_name: impl Into<String>, records: Vec<TranscriptRecord>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            records,
        }
    }
}

