/// Question answering entry points and outcome rendering.
pub mod orchestrator;
/// Prompt construction for search-augmented answers.
pub mod prompt;

pub use orchestrator::{outcome_mode, render_outcome, Orchestrator};
pub use prompt::build_search_prompt;
