use std::collections::HashMap;

/// Longest worksheet name the xlsx format accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Base names longer than this are shortened before a suffix is appended
pub const SUFFIX_TRUNCATE_THRESHOLD: usize = 25;

/// Characters of the base name kept in front of a suffix once it is shortened
pub const SUFFIX_KEEP_CHARS: usize = 26;

/// Configuration for sheet name resolution
#[derive(Debug, Clone)]
pub struct SheetNameConfig {
    /// Extension removed from the end of a desired name
    pub source_extension: String,
    /// Keep suffixed names within MAX_SHEET_NAME_LEN
    pub clamp_to_limit: bool,
}

impl Default for SheetNameConfig {
    fn default() -> Self {
        Self {
            source_extension: ".txt".to_string(),
            clamp_to_limit: true,
        }
    }
}

/// Occurrence counts per base name for one workbook build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetNameState {
    counts: HashMap<String, u32>,
}

impl SheetNameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record another occurrence of `base`.
    ///
    /// Returns `None` on first sight, otherwise the number of earlier
    /// occurrences (1 for the first duplicate).
    pub(crate) fn bump(&mut self, base: &str) -> Option<u32> {
        match self.counts.get_mut(base) {
            Some(count) => {
                *count += 1;
                Some(*count)
            }
            None => {
                self.counts.insert(base.to_string(), 0);
                None
            }
        }
    }

    /// Current count for a base name, if it has been seen
    pub fn count(&self, base: &str) -> Option<u32> {
        self.counts.get(base).copied()
    }

    /// Number of distinct base names seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_counts_from_zero() {
        let mut state = SheetNameState::new();

        assert_eq!(state.bump("meeting"), None);
        assert_eq!(state.count("meeting"), Some(0));
        assert_eq!(state.bump("meeting"), Some(1));
        assert_eq!(state.bump("meeting"), Some(2));
        assert_eq!(state.bump("other"), None);
        assert_eq!(state.len(), 2);
    }
}
