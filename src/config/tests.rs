#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMProvider};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert!(config.llm.api_key.is_empty());
        assert!(config.llm.model.is_empty());
        assert_eq!(config.llm.max_tokens, 8192);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.llm.max_iterations, 12);
        assert_eq!(config.tools.scratch_dir, PathBuf::from("tmp"));
        assert_eq!(config.port, 5000);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "OpenAI".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );

        assert!("gemini".parse::<LLMProvider>().is_err());
        assert!("".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_llm_provider_default_model() {
        assert_eq!(LLMProvider::OpenAI.default_model(), "gpt-4o");
        assert_eq!(
            LLMProvider::Anthropic.default_model(),
            "claude-3-5-sonnet-20241022"
        );
    }

    #[test]
    fn test_llm_provider_native_tool_calls() {
        assert!(LLMProvider::OpenAI.supports_native_tool_calls());
        assert!(!LLMProvider::Anthropic.supports_native_tool_calls());
    }

    #[test]
    fn test_effective_model_falls_back_to_provider_default() {
        let mut config = Config::default();
        assert_eq!(config.llm.effective_model(), "gpt-4o");

        config.llm.provider = LLMProvider::Anthropic;
        assert_eq!(config.llm.effective_model(), "claude-3-5-sonnet-20241022");

        config.llm.model = "claude-3-7-sonnet-latest".to_string();
        assert_eq!(config.llm.effective_model(), "claude-3-7-sonnet-latest");
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("docforge.toml");

        let content = r#"
port = 8080
verbose = true

[llm]
provider = "anthropic"
api_key = "test-key"
api_base_url = ""
model = ""
max_tokens = 4096
temperature = 0.5
retry_attempts = 2
retry_delay_ms = 500
timeout_seconds = 60
max_iterations = 10

[tools]
search_endpoint = "https://search.internal/api"
scratch_dir = "scratch"
"#;
        fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.max_iterations, 10);
        assert_eq!(config.tools.scratch_dir, PathBuf::from("scratch"));
        assert_eq!(config.port, 8080);
        assert!(config.verbose);
    }

    #[test]
    fn test_config_from_file_missing() {
        let path = PathBuf::from("/nonexistent/docforge.toml");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit_value() {
        let mut config = Config::default();
        config.llm.api_key = "explicit".to_string();
        config.llm.resolve_api_key().unwrap();
        assert_eq!(config.llm.api_key, "explicit");
    }
}
