//! askweb CLI entry point
//!
//! - `askweb ask <question>` - Direct answer from the model
//! - `askweb search <question>` - Answer grounded in web search results
//! - `askweb tools <question>` - Tool-calling round trip with `web_search`
//! - `askweb sources <query>` - Raw search results
//! - `askweb check` - Verify credentials
//! - `askweb models` - List known models

use anyhow::Context;
use askweb::agents::{outcome_mode, render_outcome};
use askweb::cli::output::Output;
use askweb::cli::{Cli, Commands};
use askweb::llm::watsonx::models;
use askweb::search::WebSearch;
use askweb::types::{Answer, AskMode};
use askweb::{Config, ExaClient, Orchestrator, Result, Settings, WatsonxClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "askweb=debug" } else { "askweb=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    let config_path = cli.config.clone();
    let model = cli.model.clone();
    let load_config = || -> anyhow::Result<Config> {
        let mut settings = Settings::load_or_default(config_path.as_deref())
            .context("Failed to load settings")?;
        if let Some(model) = &model {
            settings.model_id = model.clone();
        }
        Ok(Config::from_env(settings)?)
    };

    match cli.command {
        Commands::Models => {
            output.header("Known models");
            for (id, description) in models::ALL {
                output.kv(id, description);
            }
        }
        Commands::Ask { question } => {
            let config = load_config()?;
            let orchestrator = Orchestrator::from_config(&config);
            let result = orchestrator.ask(&question).await;
            print_outcome(output, result, AskMode::Direct, cli.json)?;
        }
        Commands::Search { question, results } => {
            let config = load_config()?;
            let limit = results.unwrap_or(config.settings.search_results);
            let orchestrator = Orchestrator::from_config(&config);
            if !orchestrator.has_search() {
                output.warning("EXA_API_KEY is not set, answering without web search");
            }
            let result = orchestrator.ask_with_search(&question, limit).await;
            print_outcome(output, result, AskMode::Search, cli.json)?;
        }
        Commands::Tools { question } => {
            let config = load_config()?;
            let orchestrator = Orchestrator::from_config(&config);
            let result = orchestrator.ask_with_tools(&question).await;
            print_outcome(output, result, AskMode::Tools, cli.json)?;
        }
        Commands::Sources { query, results } => {
            let config = load_config()?;
            let exa = config
                .exa
                .as_ref()
                .context("EXA_API_KEY must be set to search the web")?;
            let client = ExaClient::from_config(exa);
            let hits = client.search(&query, results).await;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                output.warning("No search results found.");
            } else {
                output.search_results(&hits);
            }
        }
        Commands::Check => {
            let config = load_config()?;
            let client = WatsonxClient::new(&config.watsonx, &config.settings);
            client
                .check_connection()
                .await
                .context("Failed to authenticate with IBM Cloud IAM")?;

            output.success("watsonx.ai credentials are valid");
            output.kv("project", client.project_id());
            output.kv("model", &config.settings.model_id);
            match &config.exa {
                Some(exa) => output.kv("search", &exa.base_url),
                None => output.hint("Set EXA_API_KEY to enable web search and tool calling"),
            }
        }
    }

    Ok(())
}

fn print_outcome(
    output: &Output,
    result: Result<Answer>,
    mode: AskMode,
    json: bool,
) -> anyhow::Result<()> {
    let text = render_outcome(&result, mode);
    let mode = outcome_mode(&result, mode);

    if json {
        let value = match &result {
            Ok(answer) => serde_json::to_value(answer)?,
            Err(_) => serde_json::json!({ "mode": mode, "error": text }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        output.answer(&text, result.as_ref().ok());
    }

    Ok(())
}
