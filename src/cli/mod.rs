//! CLI module for askweb
//!
//! Command-line parsing for the `askweb` binary. Uses clap for argument
//! parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// askweb - answer questions with watsonx.ai, grounded in web search
#[derive(Parser, Debug)]
#[command(
    name = "askweb",
    version,
    about = "Answer questions with IBM watsonx.ai, optionally grounded in Exa web search",
    long_about = "Answer questions with IBM watsonx.ai foundation models.\n\n\
                  Credentials are read from the environment or a .env file:\n  \
                  IBM_WATSONX_API_KEY, IBM_WATSONX_URL, IBM_WATSONX_PROJECT_ID (required)\n  \
                  EXA_API_KEY (enables web search and tool calling)",
    after_help = "EXAMPLES:\n    \
                  askweb ask \"What is Rust?\"                 # Direct answer\n    \
                  askweb search \"Latest Rust release\"        # Answer grounded in web search\n    \
                  askweb tools \"Who won the 2024 Giro?\"      # Let the model call web_search\n    \
                  askweb sources \"watsonx.ai\" --results 5    # Show raw search results\n    \
                  askweb check                               # Verify credentials"
)]
pub struct Cli {
    /// Path to the settings file (defaults to askweb.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model to use (overrides the settings file)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print answers as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question directly from the model
    Ask {
        /// The question to answer
        question: String,
    },

    /// Answer a question using web search results as context
    Search {
        /// The question to answer
        question: String,

        /// Number of search results to use (defaults to the settings file)
        #[arg(short = 'n', long)]
        results: Option<usize>,
    },

    /// Answer a question, letting the model call the web_search tool
    Tools {
        /// The question to answer
        question: String,
    },

    /// Print raw web search results for a query
    Sources {
        /// The search query
        query: String,

        /// Number of results to fetch
        #[arg(short = 'n', long, default_value = "3")]
        results: usize,
    },

    /// Validate configuration and credentials
    Check,

    /// List known model identifiers
    Models,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
