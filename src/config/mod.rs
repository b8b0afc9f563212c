use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::error::DocforgeError;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl LLMProvider {
    /// Provider凭证对应的环境变量名
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Provider的默认模型
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "gpt-4o",
            LLMProvider::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    /// 该Provider的后端是否原生支持结构化函数调用。
    /// 不支持的后端通过文本模式的推理-行动循环驱动。
    pub fn supports_native_tool_calls(&self) -> bool {
        matches!(self, LLMProvider::OpenAI)
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = DocforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            _ => Err(DocforgeError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 研究工具配置
    pub tools: ToolsConfig,

    /// Web服务监听端口
    pub port: u16,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY（留空时从Provider对应的环境变量读取）
    pub api_key: String,

    /// LLM API基地址（留空时使用Provider默认地址）
    pub api_base_url: String,

    /// 模型名称（留空时使用Provider默认模型）
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 外部调用超时时间（秒）
    pub timeout_seconds: u64,

    /// Agent工具循环的最大迭代次数
    pub max_iterations: usize,
}

/// 研究工具配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolsConfig {
    /// 搜索API端点
    pub search_endpoint: String,

    /// Agent暂存内容目录
    pub scratch_dir: PathBuf,
}

impl LLMConfig {
    /// 实际使用的模型名称
    pub fn effective_model(&self) -> String {
        if self.model.is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.model.clone()
        }
    }

    /// 解析Provider凭证。配置未显式指定时从环境变量读取，
    /// 两者都缺失视为致命的配置错误。
    pub fn resolve_api_key(&mut self) -> Result<(), DocforgeError> {
        if self.api_key.is_empty() {
            let env_name = self.provider.api_key_env();
            let value = std::env::var(env_name).unwrap_or_default();
            if value.is_empty() {
                return Err(DocforgeError::MissingCredentials(env_name));
            }
            self.api_key = value;
        }
        Ok(())
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMConfig {
                provider: LLMProvider::default(),
                api_key: String::new(),
                api_base_url: "https://api.openai.com/v1".to_string(),
                model: String::new(),
                max_tokens: 8192,
                temperature: 0.7,
                retry_attempts: 3,
                retry_delay_ms: 1500,
                timeout_seconds: 120,
                max_iterations: 12,
            },
            tools: ToolsConfig {
                search_endpoint: "https://api.search.example.com/search".to_string(),
                scratch_dir: PathBuf::from("tmp"),
            },
            port: 5000,
            verbose: false,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
