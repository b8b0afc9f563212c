//! 文本模式ReAct执行器 - 面向不原生支持函数调用的后端，
//! 对文本形式的工具调用做模式匹配并同步分发

use anyhow::Result;

use super::providers::ProviderAgent;
use super::react::{ReActConfig, ReActResponse};
use crate::error::DocforgeError;
use crate::llm::tools::Toolset;

/// 模型单步输出的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedStep {
    /// 工具调用：工具名 + 参数文本
    ToolCall { name: String, input: String },
    /// 最终答案
    FinalAnswer(String),
}

/// 文本模式ReAct执行器
pub struct TextReActExecutor;

impl TextReActExecutor {
    /// 执行文本模式的推理-行动循环。
    /// 每一步模型要么发出 `Action:`/`Action Input:` 形式的工具调用，
    /// 要么以 `Final Answer:` 给出最终答案；两者都解析不出并超出
    /// 解析预算时，循环以执行失败终止。
    pub async fn execute(
        agent: &ProviderAgent,
        user_prompt: &str,
        toolset: &Toolset,
        config: &ReActConfig,
    ) -> Result<ReActResponse> {
        if config.verbose {
            println!(
                "   ♻️ 激活文本模式ReAct循环，最大迭代次数: {}",
                config.max_iterations
            );
        }

        let mut transcript = user_prompt.to_string();
        let mut tool_calls_history: Vec<String> = Vec::new();
        let mut last_response = String::new();
        let mut parse_failures = 0usize;

        for iteration in 1..=config.max_iterations {
            let response = agent.prompt(&transcript).await?;
            last_response = response.clone();

            match Self::parse_step(&response) {
                Some(ParsedStep::FinalAnswer(answer)) => {
                    if config.verbose {
                        println!("   ✅ 文本模式ReAct循环完成，共 {} 次迭代", iteration);
                    }
                    let mut result = ReActResponse::success(answer, iteration);
                    result.tool_calls_history = tool_calls_history;
                    return Ok(result);
                }
                Some(ParsedStep::ToolCall { name, input }) => {
                    parse_failures = 0;

                    // 未知工具名不视为致命错误，作为观察结果返回给模型
                    let observation = match toolset.dispatch(&name, &input).await {
                        Some(result) => result,
                        None => format!(
                            "Unknown tool '{}'. Available tools: {}.",
                            name,
                            toolset.tool_names().join(", ")
                        ),
                    };

                    if config.verbose {
                        println!("   🔧 工具调用: {}", name);
                    }
                    tool_calls_history.push(format!("{}({})", name, input));

                    transcript.push_str(&format!(
                        "\n\n{}\nObservation: {}\n\nContinue with your next Thought. \
                         Invoke another tool if needed, or give the Final Answer.",
                        response.trim(),
                        observation
                    ));
                }
                None => {
                    parse_failures += 1;
                    if parse_failures >= config.parse_attempts {
                        return Err(DocforgeError::AgentExecution(format!(
                            "model output could not be parsed as a tool call or final answer \
                             after {} attempts",
                            parse_failures
                        ))
                        .into());
                    }

                    transcript.push_str(
                        "\n\nYour previous reply could not be parsed. Reply either with:\n\
                         Action: <tool name>\nAction Input: <input>\n\
                         or with:\nFinal Answer: <your complete answer>",
                    );
                }
            }
        }

        if config.verbose {
            println!(
                "   ⚠️ 达到最大迭代次数 ({}), 触发中断",
                config.max_iterations
            );
        }

        if config.return_partial_on_max_depth {
            Ok(ReActResponse::max_depth_reached(
                Self::strip_markers(&last_response),
                config.max_iterations,
                tool_calls_history,
            ))
        } else {
            Err(DocforgeError::AgentExecution(format!(
                "agent loop interrupted after reaching the step cap ({})",
                config.max_iterations
            ))
            .into())
        }
    }

    /// 解析模型的单步输出。最终答案优先于工具调用，保证循环可终止。
    fn parse_step(response: &str) -> Option<ParsedStep> {
        if let Some(idx) = response.find("Final Answer:") {
            let answer = response[idx + "Final Answer:".len()..].trim();
            if !answer.is_empty() {
                return Some(ParsedStep::FinalAnswer(answer.to_string()));
            }
        }

        let action_idx = Self::marker_position(response, "Action:")?;
        let after_action = &response[action_idx + "Action:".len()..];
        let name = after_action
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches('`')
            .trim()
            .to_string();
        if name.is_empty() {
            return None;
        }

        let input = match Self::marker_position(after_action, "Action Input:") {
            Some(idx) => after_action[idx + "Action Input:".len()..].trim().to_string(),
            None => String::new(),
        };

        Some(ParsedStep::ToolCall { name, input })
    }

    /// 查找行首标记的位置（标记之前只允许该行的前导空白）
    fn marker_position(text: &str, marker: &str) -> Option<usize> {
        text.match_indices(marker).map(|(idx, _)| idx).find(|&idx| {
            match text[..idx].rfind('\n') {
                Some(newline) => text[newline + 1..idx].trim().is_empty(),
                None => text[..idx].trim().is_empty(),
            }
        })
    }

    /// 去掉部分结果中的推理标记，只保留可读文本
    fn strip_markers(response: &str) -> String {
        let content = response
            .lines()
            .filter(|line| {
                let trimmed = line.trim_start();
                !trimmed.starts_with("Thought:")
                    && !trimmed.starts_with("Action:")
                    && !trimmed.starts_with("Action Input:")
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if content.is_empty() {
            "Agent因达到最大迭代次数而被中断，未能获得完整响应。".to_string()
        } else {
            content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_final_answer() {
        let step = TextReActExecutor::parse_step(
            "Thought: I have enough information.\nFinal Answer: Photosynthesis is the process.",
        );
        assert_eq!(
            step,
            Some(ParsedStep::FinalAnswer(
                "Photosynthesis is the process.".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_tool_call() {
        let step = TextReActExecutor::parse_step(
            "Thought: I should look this up.\nAction: search\nAction Input: light reactions",
        );
        assert_eq!(
            step,
            Some(ParsedStep::ToolCall {
                name: "search".to_string(),
                input: "light reactions".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_tool_call_multiline_input() {
        let step = TextReActExecutor::parse_step(
            "Action: save_content\nAction Input: # Title\n\nBody paragraph.",
        );
        assert_eq!(
            step,
            Some(ParsedStep::ToolCall {
                name: "save_content".to_string(),
                input: "# Title\n\nBody paragraph.".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_tool_call_without_input() {
        let step = TextReActExecutor::parse_step("Action: search");
        assert_eq!(
            step,
            Some(ParsedStep::ToolCall {
                name: "search".to_string(),
                input: String::new(),
            })
        );
    }

    #[test]
    fn test_final_answer_wins_over_action() {
        let step = TextReActExecutor::parse_step(
            "Action: search\nAction Input: x\nFinal Answer: done anyway",
        );
        assert_eq!(
            step,
            Some(ParsedStep::FinalAnswer("done anyway".to_string()))
        );
    }

    #[test]
    fn test_unparseable_output() {
        assert_eq!(
            TextReActExecutor::parse_step("I am just rambling without any markers."),
            None
        );
        assert_eq!(TextReActExecutor::parse_step(""), None);
    }

    #[test]
    fn test_strip_markers_keeps_plain_text() {
        let partial = "Thought: still thinking\nSome partial prose.\nAction: search";
        assert_eq!(
            TextReActExecutor::strip_markers(partial),
            "Some partial prose."
        );
    }
}
