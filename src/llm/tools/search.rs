//! 网络搜索工具

use anyhow::Result;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::ToolsConfig;

/// 未配置搜索凭证时返回给模型的固定提示文本
const NO_API_KEY_ADVISORY: &str = "No search API key provided. In a real deployment this \
would call an actual search API.\n\n\
To enable real search functionality:\n\
1. Obtain an API key for a search service\n\
2. Add it to your environment as SEARCH_API_KEY\n\
3. Restart the application\n\n\
For now, rely on your existing knowledge to provide information about this topic.";

/// 搜索工具
#[derive(Debug, Clone)]
pub struct AgentToolSearch {
    api_key: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

/// 搜索工具错误
#[derive(Debug)]
pub struct SearchToolError;

impl std::fmt::Display for SearchToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Search tool error")
    }
}

impl std::error::Error for SearchToolError {}

impl AgentToolSearch {
    pub fn new(config: &ToolsConfig, timeout: Duration) -> Result<Self> {
        let api_key = std::env::var("SEARCH_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            endpoint: config.search_endpoint.clone(),
            client,
        })
    }

    /// 执行搜索。网络错误在此折叠为文本结果返回给模型，不向外传播。
    pub async fn search(&self, query: &str) -> String {
        println!("   🔍 搜索: {}", query);

        let Some(api_key) = &self.api_key else {
            return NO_API_KEY_ADVISORY.to_string();
        };

        match self.api_search(api_key, query).await {
            Ok(formatted) => formatted,
            Err(e) => format!("Error performing search: {}", e),
        }
    }

    async fn api_search(&self, api_key: &str, query: &str) -> Result<String> {
        let payload = serde_json::json!({
            "query": query,
            "limit": 5
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let results: Value = response.json().await?;
        Ok(Self::format_results(&results))
    }

    /// 将搜索结果格式化为可读文本
    fn format_results(results: &Value) -> String {
        let items = results
            .get("items")
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty());

        let Some(items) = items else {
            return "No results found.".to_string();
        };

        let mut formatted = String::from("Search Results:\n\n");
        for (index, item) in items.iter().enumerate() {
            let title = item
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("No title");
            let snippet = item
                .get("snippet")
                .and_then(Value::as_str)
                .unwrap_or("No description");
            let url = item.get("link").and_then(Value::as_str).unwrap_or("No URL");

            formatted.push_str(&format!("{}. {}\n", index + 1, title));
            formatted.push_str(&format!("   {}\n", snippet));
            formatted.push_str(&format!("   URL: {}\n\n", url));
        }

        formatted
    }
}

impl Tool for AgentToolSearch {
    const NAME: &'static str = "search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for information about a topic. Returns a list of \
                          result titles, snippets and URLs."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query string"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self.search(&args.query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_results() {
        let results = serde_json::json!({
            "items": [
                {"title": "Photosynthesis", "snippet": "How plants convert light.", "link": "https://example.com/a"},
                {"title": "Light reactions", "snippet": "First stage.", "link": "https://example.com/b"}
            ]
        });

        let formatted = AgentToolSearch::format_results(&results);
        assert!(formatted.starts_with("Search Results:"));
        assert!(formatted.contains("1. Photosynthesis"));
        assert!(formatted.contains("2. Light reactions"));
        assert!(formatted.contains("URL: https://example.com/b"));
    }

    #[test]
    fn test_format_results_empty() {
        let results = serde_json::json!({ "items": [] });
        assert_eq!(AgentToolSearch::format_results(&results), "No results found.");

        let results = serde_json::json!({});
        assert_eq!(AgentToolSearch::format_results(&results), "No results found.");
    }

    #[test]
    fn test_format_results_missing_fields() {
        let results = serde_json::json!({ "items": [{}] });
        let formatted = AgentToolSearch::format_results(&results);
        assert!(formatted.contains("1. No title"));
        assert!(formatted.contains("No description"));
        assert!(formatted.contains("URL: No URL"));
    }
}
