//! Configuration loading tests
//!
//! Settings files on disk and credential checks that must fail before any
//! network traffic.

use askweb::utils::config::{
    EXA_API_KEY_ENV, EXA_BASE_URL_ENV, WATSONX_API_KEY_ENV, WATSONX_IAM_URL_ENV,
    WATSONX_PROJECT_ID_ENV, WATSONX_URL_ENV,
};
use askweb::{Config, ConfigError, Orchestrator, Settings};
use rstest::rstest;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

fn lookup(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).cloned()
}

#[tokio::test]
async fn test_missing_credentials_make_no_requests() {
    let server = MockServer::start().await;
    let vars = HashMap::from([
        (WATSONX_URL_ENV, server.uri()),
        (WATSONX_IAM_URL_ENV, server.uri()),
        (EXA_API_KEY_ENV, "exa-key".to_string()),
        (EXA_BASE_URL_ENV, server.uri()),
    ]);

    let result = Config::from_lookup(lookup(vars), Settings::default());

    match result {
        Err(ConfigError::MissingCredentials(missing)) => {
            assert_eq!(missing, vec![WATSONX_API_KEY_ENV, WATSONX_PROJECT_ID_ENV]);
        }
        other => panic!("Expected MissingCredentials, got {:?}", other),
    }
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_building_orchestrator_makes_no_requests() {
    let server = MockServer::start().await;
    let vars = HashMap::from([
        (WATSONX_API_KEY_ENV, "key".to_string()),
        (WATSONX_URL_ENV, server.uri()),
        (WATSONX_PROJECT_ID_ENV, "project".to_string()),
        (WATSONX_IAM_URL_ENV, server.uri()),
        (EXA_API_KEY_ENV, "exa-key".to_string()),
        (EXA_BASE_URL_ENV, server.uri()),
    ]);

    let config = Config::from_lookup(lookup(vars), Settings::default()).unwrap();
    let orchestrator = Orchestrator::from_config(&config);

    assert!(orchestrator.has_search());
    assert_eq!(orchestrator.tools().tool_names(), vec!["web_search"]);
    assert_eq!(config.exa.map(|exa| exa.base_url), Some(server.uri()));
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[test]
fn test_full_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("askweb.toml");
    fs::write(
        &path,
        r#"
model_id = "meta-llama/llama-3-3-70b-instruct"
api_version = "2025-01-01"
search_results = 5

[generation]
max_new_tokens = 500
min_new_tokens = 10
temperature = 0.3
top_p = 0.8
top_k = 20
"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();

    assert_eq!(settings.model_id, "meta-llama/llama-3-3-70b-instruct");
    assert_eq!(settings.api_version, "2025-01-01");
    assert_eq!(settings.search_results, 5);
    assert_eq!(settings.generation.max_new_tokens, 500);
    assert_eq!(settings.generation.top_k, 20);
}

#[rstest]
#[case::empty_model("model_id = \"\"")]
#[case::zero_results("search_results = 0")]
#[case::nan_temperature("[generation]\ntemperature = nan")]
#[case::top_p_too_high("[generation]\ntop_p = 1.5")]
#[case::zero_top_k("[generation]\ntop_k = 0")]
#[case::min_exceeds_max("[generation]\nmin_new_tokens = 20\nmax_new_tokens = 10")]
fn test_invalid_settings_rejected(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("askweb.toml");
    fs::write(&path, content).unwrap();

    let result = Settings::load(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_malformed_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("askweb.toml");
    fs::write(&path, "model_id = [unclosed").unwrap();

    assert!(matches!(Settings::load(&path), Err(ConfigError::ParseError(_))));
}
