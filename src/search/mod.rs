//! Web search providers
//!
//! [`WebSearch`] is the seam between the orchestrator and a hosted search
//! API. Implementations never fail from the caller's point of view: a failed
//! search and a search without hits both yield an empty list.

use crate::types::SearchResult;
use async_trait::async_trait;

/// Exa search API client.
pub mod exa;

pub use exa::ExaClient;

/// Snippets longer than this many characters are truncated.
pub const MAX_SNIPPET_CHARS: usize = 500;

const ELLIPSIS: &str = "...";

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Search the web and return at most `limit` results with non-empty text.
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult>;

    /// Human-readable provider name, used in logs.
    fn provider_name(&self) -> &str;
}

/// Cut `text` to [`MAX_SNIPPET_CHARS`] characters, appending `...` when shortened.
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(MAX_SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(499)]
    #[case(500)]
    fn test_short_text_is_unchanged(#[case] len: usize) {
        let text = "a".repeat(len);
        assert_eq!(truncate_snippet(&text), text);
    }

    #[rstest]
    #[case(501)]
    #[case(2000)]
    fn test_long_text_is_truncated(#[case] len: usize) {
        let text = "b".repeat(len);
        let snippet = truncate_snippet(&text);
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_CHARS + 3);
        assert!(snippet.ends_with("..."));
        assert_eq!(&snippet[..MAX_SNIPPET_CHARS], &text[..MAX_SNIPPET_CHARS]);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "é".repeat(600);
        let snippet = truncate_snippet(&text);
        assert_eq!(snippet.chars().count(), 503);
        assert!(snippet.starts_with(&"é".repeat(500)));
    }
}
