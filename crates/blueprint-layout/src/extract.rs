//! Extraction of the `level-json` block from free-form text.
//!
//! Level blueprints usually arrive as prose with an embedded fenced block:
//!
//! ````text
//! The crypt has three rooms...
//!
//! ```level-json
//! { "rooms": [ ... ] }
//! ```
//! ````
//!
//! The first fence opened with the `level-json` tag (any letter case) and
//! closed by the next triple backtick is taken; everything else in the text is
//! ignored.

use crate::model::LevelLayout;
use crate::LayoutError;

/// Tag that marks the fenced block carrying the layout.
pub const LEVEL_JSON_TAG: &str = "level-json";

const FENCE: &str = "```";

/// Locate the trimmed body of the first `level-json` fenced block.
///
/// Returns `None` if no opening fence carries the tag or the block is never
/// closed.
pub fn find_level_json_block(text: &str) -> Option<&str> {
    // Every backtick is a candidate opening, so a longer run such as
    // "````level-json" still matches on its last three backticks.
    for (start, _) in text.match_indices('`') {
        let Some(after_fence) = text[start..].strip_prefix(FENCE) else {
            continue;
        };
        let Some(tag) = after_fence.get(..LEVEL_JSON_TAG.len()) else {
            continue;
        };
        if !tag.eq_ignore_ascii_case(LEVEL_JSON_TAG) {
            continue;
        }

        let rest = &after_fence[LEVEL_JSON_TAG.len()..];
        let close = rest.find(FENCE)?;
        return Some(rest[..close].trim());
    }
    None
}

/// Extract and parse the layout embedded in `text`.
///
/// # Errors
///
/// - [`LayoutError::MissingBlock`] if there is no closed `level-json` block.
/// - [`LayoutError::EmptyBlock`] if the block body is blank.
/// - [`LayoutError::InvalidJson`] if the body does not parse as a layout.
pub fn extract_level_json(text: &str) -> Result<LevelLayout, LayoutError> {
    let body = find_level_json_block(text).ok_or(LayoutError::MissingBlock)?;
    if body.is_empty() {
        return Err(LayoutError::EmptyBlock);
    }

    LevelLayout::from_json_str(body).inspect_err(|e| {
        if let LayoutError::InvalidJson { source } = e {
            tracing::warn!(
                line = source.line(),
                column = source.column(),
                error = %source,
                "level-json block failed to parse"
            );
        }
    })
}
