use regex::Regex;

use super::{HeaderMatch, HeaderMatcher};
use crate::error::{ConvertError, ConvertResult};

/// Speaker name, two or more whitespace characters, then a digit-led timestamp.
///
/// Both groups are greedy, so the name is the longest prefix that still
/// leaves a double-whitespace boundary before a digit.
pub const DEFAULT_HEADER_PATTERN: &str = r"(.+)\s\s(\d.+)";

/// Regex-backed header matcher
#[derive(Debug, Clone)]
pub struct SpeakerTimeMatcher {
    pattern: Regex,
}

impl SpeakerTimeMatcher {
    /// Matcher for Otter's `Name  0:00:00` header lines
    pub fn new() -> ConvertResult<Self> {
        Self::with_pattern(DEFAULT_HEADER_PATTERN)
    }

    /// Matcher using a custom pattern; group 1 is the speaker, group 2 the timestamp
    pub fn with_pattern(pattern: &str) -> ConvertResult<Self> {
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() < 3 {
            return Err(ConvertError::HeaderGroups {
                pattern: pattern.as_str().to_string(),
            });
        }
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl HeaderMatcher for SpeakerTimeMatcher {
    fn match_header<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let caps = self.pattern.captures(line)?;
        Some(HeaderMatch {
            speaker: caps.get(1)?.as_str(),
            timestamp: caps.get(2)?.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SpeakerTimeMatcher {
        SpeakerTimeMatcher::new().unwrap()
    }

    #[test]
    fn test_matches_double_space_header() {
        let m = matcher().match_header("Alice  0:00:01\n").unwrap();
        assert_eq!(m.speaker, "Alice");
        assert_eq!(m.timestamp, "0:00:01");
    }

    #[test]
    fn test_single_space_is_not_a_header() {
        assert!(matcher().match_header("NoDoubleSpace 0:00:01\n").is_none());
    }

    #[test]
    fn test_name_with_single_spaces_is_kept_whole() {
        let m = matcher()
            .match_header("Dr. Jane Q. Public  12:04\n")
            .unwrap();
        assert_eq!(m.speaker, "Dr. Jane Q. Public");
        assert_eq!(m.timestamp, "12:04");
    }

    #[test]
    fn test_name_takes_longest_prefix() {
        // Last double-space-then-digit boundary wins
        let m = matcher().match_header("Room 2  1  0:05\n").unwrap();
        assert_eq!(m.speaker, "Room 2  1");
        assert_eq!(m.timestamp, "0:05");
    }

    #[test]
    fn test_extra_whitespace_stays_in_capture() {
        let m = matcher().match_header("Bob    3:15\n").unwrap();
        assert_eq!(m.speaker, "Bob  ");
        assert_eq!(m.timestamp, "3:15");
    }

    #[test]
    fn test_timestamp_needs_more_than_one_character() {
        assert!(matcher().match_header("Alice  5\n").is_none());
        assert!(matcher().match_header("Alice  5s").is_some());
    }

    #[test]
    fn test_timestamp_must_start_with_digit() {
        assert!(matcher().match_header("Alice  at noon\n").is_none());
    }

    #[test]
    fn test_pattern_without_groups_is_rejected() {
        assert!(SpeakerTimeMatcher::with_pattern(r"\d+").is_err());
        assert!(SpeakerTimeMatcher::with_pattern(r"(.+").is_err());
    }

    #[test]
    fn test_custom_pattern() {
        let matcher = SpeakerTimeMatcher::with_pattern(r"^\[(.+?)\]\s*(\d.*)$").unwrap();
        let m = matcher.match_header("[Alice] 00:12").unwrap();
        assert_eq!(m.speaker, "Alice");
        assert_eq!(m.timestamp, "00:12");
    }
}
