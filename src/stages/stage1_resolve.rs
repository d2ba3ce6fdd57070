use tracing::debug;

use crate::models::{
    MAX_SHEET_NAME_LEN, SUFFIX_KEEP_CHARS, SUFFIX_TRUNCATE_THRESHOLD, SheetNameConfig,
    SheetNameState,
};

/// Collision key for a desired name: directory and source extension removed,
/// cut to the sheet name limit.
pub fn base_name(desired: &str, config: &SheetNameConfig) -> String {
    let file_name = desired.rsplit(['/', '\\']).next().unwrap_or(desired);
    let stem = if config.source_extension.is_empty() {
        file_name
    } else {
        file_name
            .strip_suffix(config.source_extension.as_str())
            .unwrap_or(file_name)
    };
    take_chars(stem, MAX_SHEET_NAME_LEN)
}

/// Resolve a desired sheet name against the names seen so far in this batch.
///
/// The first occurrence of a base name is returned as is; later ones get a
/// ` (n)` suffix, with long bases shortened to make room.
pub fn resolve_sheet_name(
    desired: &str,
    state: &mut SheetNameState,
    config: &SheetNameConfig,
) -> String {
    let base = base_name(desired, config);

    let Some(count) = state.bump(&base) else {
        return base;
    };

    let suffix = format!(" ({})", count);
    let base_len = base.chars().count();
    let mut resolved = if base_len > SUFFIX_TRUNCATE_THRESHOLD {
        format!("{}{}", take_chars(&base, SUFFIX_KEEP_CHARS), suffix)
    } else {
        format!("{}{}", base, suffix)
    };

    if config.clamp_to_limit && resolved.chars().count() > MAX_SHEET_NAME_LEN {
        let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        resolved = format!("{}{}", take_chars(&base, room), suffix);
    }

    debug!("Sheet name '{}' taken, using '{}'", base, resolved);
    resolved
}

/// Resolve a sequence of desired names with a fresh state
pub fn resolve_sheet_names<I, S>(desired: I, config: &SheetNameConfig) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = SheetNameState::new();
    desired
        .into_iter()
        .map(|name| resolve_sheet_name(name.as_ref(), &mut state, config))
        .collect()
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
