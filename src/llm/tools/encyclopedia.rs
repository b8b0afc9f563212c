//! 百科查询工具 - 基于Wikipedia的两步查询

use anyhow::Result;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const WIKI_API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// 百科查询工具
#[derive(Debug, Clone)]
pub struct AgentToolEncyclopedia {
    endpoint: String,
    client: reqwest::Client,
}

/// 百科查询参数
#[derive(Debug, Deserialize)]
pub struct EncyclopediaArgs {
    pub query: String,
}

/// 百科查询工具错误
#[derive(Debug)]
pub struct EncyclopediaToolError;

impl std::fmt::Display for EncyclopediaToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Encyclopedia tool error")
    }
}

impl std::error::Error for EncyclopediaToolError {}

impl AgentToolEncyclopedia {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: WIKI_API_ENDPOINT.to_string(),
            client,
        })
    }

    /// 两步查询：先检索最匹配的条目标题，再取其纯文本引言。
    /// 网络错误折叠为文本结果返回给模型。
    pub async fn lookup(&self, query: &str) -> String {
        println!("   📚 百科查询: {}", query);

        match self.lookup_inner(query).await {
            Ok(Some(formatted)) => formatted,
            Ok(None) => format!("No encyclopedia article found for '{}'.", query),
            Err(e) => format!("Error retrieving encyclopedia information: {}", e),
        }
    }

    async fn lookup_inner(&self, query: &str) -> Result<Option<String>> {
        let Some(title) = self.find_article(query).await? else {
            return Ok(None);
        };

        let extract = self.article_extract(&title).await?;

        Ok(Some(format!(
            "Source: {}\n\n{}\n\nMore info: {}",
            title,
            extract,
            Self::canonical_url(&title)
        )))
    }

    /// 检索与查询最匹配的条目标题
    async fn find_article(&self, query: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
                ("srlimit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        let title = data["query"]["search"]
            .as_array()
            .and_then(|hits| hits.first())
            .and_then(|hit| hit["title"].as_str())
            .map(str::to_string);

        Ok(title)
    }

    /// 取条目的纯文本引言
    async fn article_extract(&self, title: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        let extract = data["query"]["pages"]
            .as_object()
            .and_then(|pages| pages.values().next())
            .and_then(|page| page["extract"].as_str())
            .unwrap_or("No content available.")
            .to_string();

        Ok(extract)
    }

    fn canonical_url(title: &str) -> String {
        format!(
            "https://en.wikipedia.org/wiki/{}",
            urlencoding::encode(&title.replace(' ', "_"))
        )
    }
}

impl Tool for AgentToolEncyclopedia {
    const NAME: &'static str = "encyclopedia_lookup";

    type Error = EncyclopediaToolError;
    type Args = EncyclopediaArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Look up an encyclopedia article about a topic. Returns the title, \
                          the introductory extract and a link to the full article."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The topic to look up"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self.lookup(&args.query).await)
    }
}
