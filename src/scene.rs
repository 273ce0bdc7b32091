use std::collections::BTreeMap;

use crate::annotations::WellAnnotation;
use crate::plate::WellId;

/// Everything the renderer needs for one plate map.
#[derive(Clone, Debug, Default)]
pub struct PlateScene {
    /// Optional title drawn centered at the top.
    pub title: Option<String>,
    /// Optional subtitle drawn beneath the title. Embedded newlines produce
    /// stacked lines.
    pub subtitle: Option<String>,
    /// Date stamp drawn in the top-right corner. Empty means no stamp.
    pub date_text: String,
    /// Per-well annotations keyed by well id. Wells absent from the map are
    /// rendered with the default empty appearance.
    pub annotations: BTreeMap<WellId, WellAnnotation>,
}

/// Replace literal `\n` escape sequences with real line breaks.
pub fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_literal_newlines() {
        assert_eq!(unescape_newlines("one\\ntwo"), "one\ntwo");
        assert_eq!(unescape_newlines("plain"), "plain");
        assert_eq!(unescape_newlines("already\nreal"), "already\nreal");
    }
}
