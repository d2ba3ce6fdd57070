use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{ConvertError, ConvertResult};

/// A transcript file as received: display name and raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name used for the sheet name and in error messages
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Read a transcript file from disk without decoding it
pub fn read_source_file(path: &Path) -> Result<SourceFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {:?}", path))?;
    Ok(SourceFile::new(name, bytes))
}

/// Read several files, keeping their order
pub fn read_source_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceFile>> {
    paths.iter().map(|p| read_source_file(p.as_ref())).collect()
}

/// Decode a source as strict UTF-8
pub fn decode_source(source: &SourceFile) -> ConvertResult<String> {
    String::from_utf8(source.bytes.clone()).map_err(|source_err| ConvertError::Decoding {
        file: source.name.clone(),
        source: source_err,
    })
}
