//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::Config;
use crate::llm::tools::Toolset;

mod providers;
mod react;
mod react_executor;
mod text_react;

pub use react::{ReActConfig, ReActResponse};

use providers::ProviderClient;
use react_executor::ReActExecutor;
use text_react::TextReActExecutor;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts;
        let retry_delay_ms = llm_config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 数据提取方法 - 以目标类型的JSON Schema约束模型输出
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let model = self.config.llm.effective_model();
        let extractor = self
            .client
            .create_extractor::<T>(&model, system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { extractor.extract(user_prompt).await })
            .await
    }

    /// 使用原生函数调用策略执行工具循环
    pub async fn prompt_with_tools(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        toolset: &Toolset,
        react_config: &ReActConfig,
    ) -> Result<ReActResponse> {
        let model = self.config.llm.effective_model();
        let agent = self.client.create_agent_with_tools(
            &model,
            system_prompt,
            &self.config.llm,
            toolset,
        );

        self.retry_with_backoff(|| async {
            ReActExecutor::execute(&agent, user_prompt, react_config).await
        })
        .await
    }

    /// 使用文本模式策略执行工具循环（面向不原生支持函数调用的后端）
    pub async fn prompt_text_react(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        toolset: &Toolset,
        react_config: &ReActConfig,
    ) -> Result<ReActResponse> {
        let model = self.config.llm.effective_model();
        let agent = self
            .client
            .create_agent(&model, system_prompt, &self.config.llm);

        TextReActExecutor::execute(&agent, user_prompt, toolset, react_config).await
    }
}
