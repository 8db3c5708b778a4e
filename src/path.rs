//! Logical path parsing.
//!
//! A logical path names a file stem and a nested lookup in one string:
//! `stem:key1:key2`. The stem may itself contain directory separators
//! (`config/project:test:users`), so it is a relative path fragment under
//! the configured directory.

/// Delimiter between the stem and the key sequence.
pub const DELIMITER: char = ':';

/// Everything before the first delimiter, or the whole path if there is none.
pub fn raw_stem(path: &str) -> &str {
    path.split_once(DELIMITER).map_or(path, |(stem, _)| stem)
}

/// The ordered lookup keys after the stem. Empty when the path has no
/// delimiter.
pub fn key_sequence(path: &str) -> Vec<String> {
    path.split(DELIMITER).skip(1).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_is_text_before_first_delimiter() {
        assert_eq!(raw_stem("project:test:users"), "project");
    }

    #[test]
    fn test_stem_of_plain_path_is_the_whole_path() {
        assert_eq!(raw_stem("project"), "project");
    }

    #[test]
    fn test_stem_may_contain_directory_separators() {
        assert_eq!(raw_stem("config/project:test:users"), "config/project");
    }

    #[test]
    fn test_key_sequence_drops_the_stem() {
        assert_eq!(
            key_sequence("config/project:test:users:first"),
            vec!["test", "users", "first"]
        );
    }

    #[test]
    fn test_key_sequence_without_delimiter_is_empty() {
        assert!(key_sequence("config/project").is_empty());
    }

    #[test]
    fn test_empty_trailing_segment_is_preserved() {
        // "stem:" splits into a stem and one empty key; the accessor will
        // reject the empty key as an invalid path.
        assert_eq!(key_sequence("stem:"), vec![""]);
    }
}
