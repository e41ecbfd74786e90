//! Extension list parsing
//!
//! In extension mode the engine answers with a single slash-delimited
//! string ("jpeg/jpg/jpe/jfif"). Callers get a set instead: order carries
//! no meaning and duplicates carry no information.

use std::collections::HashSet;

/// Split the engine's slash-delimited extension answer into a set.
///
/// Empty tokens are dropped, so an empty answer yields an empty set.
pub(crate) fn split_extensions(raw: &str) -> HashSet<String> {
    raw.split('/')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_yields_empty_set() {
        assert!(split_extensions("").is_empty());
    }

    #[test]
    fn test_single_token() {
        let set = split_extensions("png");
        assert_eq!(set.len(), 1);
        assert!(set.contains("png"));
    }

    #[test]
    fn test_multiple_tokens_order_free() {
        let set = split_extensions("jpeg/jpg/jpe");
        assert_eq!(set.len(), 3);
        assert!(set.contains("jpeg"));
        assert!(set.contains("jpg"));
        assert!(set.contains("jpe"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = split_extensions("gz/tgz/gz");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_stray_delimiters_do_not_produce_tokens() {
        let set = split_extensions("doc//dot/");
        assert_eq!(set.len(), 2);
        assert!(set.contains("doc"));
        assert!(set.contains("dot"));
    }
}
