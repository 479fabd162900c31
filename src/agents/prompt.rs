//! Search-grounded prompt construction

use crate::types::SearchResult;
use std::fmt::Write;

const PREAMBLE: &str = "You are a knowledgeable AI assistant with access to recent information from web searches. \
Your task is to provide accurate, up-to-date answers based on the search results provided, \
while also drawing on your general knowledge.\n\n";

const INSTRUCTIONS: &str = "Instructions:\n\
1. Synthesize information from the search results and your knowledge\n\
2. Cite sources when using specific information from search results\n\
3. Consider the publication dates when assessing information relevance\n\
4. If search results are outdated or irrelevant, rely on your general knowledge\n\
5. Be clear about what information comes from searches vs. your knowledge\n\n\
Answer: ";

/// Build a prompt embedding `results` as numbered sources, in input order.
pub fn build_search_prompt(question: &str, results: &[SearchResult]) -> String {
    let mut prompt = String::with_capacity(
        PREAMBLE.len() + INSTRUCTIONS.len() + question.len() + results.len() * 600,
    );

    prompt.push_str(PREAMBLE);
    // Writing into a String cannot fail.
    let _ = write!(prompt, "Question: {}\n\n", question);
    prompt.push_str("Here are relevant search results from the web:\n\n");

    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(prompt, "[Source {}]", i + 1);
        let _ = writeln!(prompt, "Title: {}", result.title);
        if let Some(date) = result.published_date.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(prompt, "Published: {}", date);
        }
        let _ = writeln!(prompt, "URL: {}", result.url);
        let _ = write!(prompt, "Content: {}\n\n", result.text);
    }

    prompt.push_str(INSTRUCTIONS);
    prompt
}
