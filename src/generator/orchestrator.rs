//! Agent编排器 - 配置工具集与系统提示词变体，驱动有界的工具循环

use anyhow::Result;

use crate::config::Config;
use crate::generator::prompt;
use crate::llm::client::{LLMClient, ReActConfig};
use crate::llm::tools::Toolset;
use crate::types::DocumentRequest;

/// Agent编排器
pub struct AgentOrchestrator<'a> {
    llm: &'a LLMClient,
    config: &'a Config,
}

impl<'a> AgentOrchestrator<'a> {
    pub fn new(llm: &'a LLMClient, config: &'a Config) -> Self {
        Self { llm, config }
    }

    /// 运行Agent，返回其最终自由文本输出。
    /// 按后端能力选择执行策略：原生函数调用，或文本模式的推理-行动循环。
    pub async fn run(&self, request: &DocumentRequest) -> Result<String> {
        let toolset = Toolset::assemble(self.config, request.enable_research)?;
        let user_prompt = prompt::compose(request);

        let mut react_config = ReActConfig::with_max_iterations(self.config.llm.max_iterations);
        react_config.verbose = self.config.verbose;

        let response = if request.model_provider.supports_native_tool_calls() {
            let system_prompt = prompt::system_prompt(request.enable_research);
            self.llm
                .prompt_with_tools(system_prompt, &user_prompt, &toolset, &react_config)
                .await?
        } else {
            let system_prompt = prompt::text_mode_system_prompt(
                request.enable_research,
                &toolset.text_mode_instructions(),
            );
            self.llm
                .prompt_text_react(&system_prompt, &user_prompt, &toolset, &react_config)
                .await?
        };

        if response.stopped_by_max_depth {
            println!(
                "   ⚠️ Agent循环在 {} 次迭代后被截断，使用部分结果继续",
                response.iterations_used
            );
        }

        Ok(response.content)
    }
}
