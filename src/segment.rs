//! Splitting pasted notes into individual task strings.

/// Fragments this many characters or shorter are dropped as noise.
pub const MIN_TASK_CHARS: usize = 2;

/// Split messy pasted text into individual tasks.
///
/// Commas, semicolons and newlines are all task boundaries. Each fragment is
/// trimmed and anything of [`MIN_TASK_CHARS`] characters or fewer is dropped.
/// Bullet glyphs are normalised to hyphens first.
pub fn segment(raw: &str) -> Vec<String> {
    raw.replace('•', "-")
        .split(|c| matches!(c, ',' | ';' | '\n'))
        .map(str::trim)
        .filter(|t| t.chars().count() > MIN_TASK_CHARS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(
            segment("fix bug, ok\ndo the thing;x"),
            vec!["fix bug".to_string(), "do the thing".to_string()]
        );
    }

    #[test]
    fn test_empty_and_delimiter_only_input() {
        assert!(segment("").is_empty());
        assert!(segment(",,;\n\n ; ,").is_empty());
        assert!(segment("   ").is_empty());
    }

    #[test]
    fn test_trims_and_keeps_order() {
        let tasks = segment("  refactor user service  \r\n explore docker basics ;update README");
        assert_eq!(tasks, vec!["refactor user service", "explore docker basics", "update README"]);
    }

    #[test]
    fn test_bullets_become_hyphens() {
        let tasks = segment("• fix login bug\n• write tests");
        assert_eq!(tasks, vec!["- fix login bug", "- write tests"]);
    }

    #[test]
    fn test_length_threshold_counts_characters() {
        // three characters survive, two do not
        assert_eq!(segment("abc,ab"), vec!["abc"]);
        // multi-byte characters count once each
        assert_eq!(segment("éé,ééé"), vec!["ééé"]);
    }

    #[test]
    fn test_no_escaping_or_nesting() {
        assert_eq!(segment("call \"foo, bar\" twice"), vec!["call \"foo", "bar\" twice"]);
    }
}
