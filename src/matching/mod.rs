pub mod speaker_time;

pub use speaker_time::*;

/// Raw captures from a header line, before trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    pub speaker: &'a str,
    pub timestamp: &'a str,
}

/// Recognizes speaker/time header lines
///
/// The parser only depends on this trait, so the matching engine can be
/// replaced without touching the pairing logic.
pub trait HeaderMatcher {
    /// Split a header candidate into speaker and timestamp, or `None` if the
    /// line is not a header.
    fn match_header<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>>;
}
