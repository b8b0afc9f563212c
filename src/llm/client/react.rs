//! ReAct循环的配置与响应类型

/// ReAct循环配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大迭代次数，超过后循环强制终止
    pub max_iterations: usize,

    /// 达到最大迭代次数时是否返回部分结果（否则视为执行失败）
    pub return_partial_on_max_depth: bool,

    /// 连续无法解析的模型输出的容忍次数（文本模式策略使用）
    pub parse_attempts: usize,

    /// 是否启用详细日志
    pub verbose: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 12,
            return_partial_on_max_depth: true,
            parse_attempts: 3,
            verbose: false,
        }
    }
}

impl ReActConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..Default::default()
        }
    }
}

/// ReAct循环的执行结果
#[derive(Debug, Clone)]
pub struct ReActResponse {
    /// 模型的最终答案（达到最大迭代次数时为部分结果）
    pub content: String,

    /// 实际使用的迭代次数
    pub iterations_used: usize,

    /// 是否因达到最大迭代次数而中断
    pub stopped_by_max_depth: bool,

    /// 工具调用记录，按发生顺序
    pub tool_calls_history: Vec<String>,
}

impl ReActResponse {
    pub fn success(content: String, iterations_used: usize) -> Self {
        Self {
            content,
            iterations_used,
            stopped_by_max_depth: false,
            tool_calls_history: Vec::new(),
        }
    }

    pub fn max_depth_reached(
        content: String,
        iterations_used: usize,
        tool_calls_history: Vec<String>,
    ) -> Self {
        Self {
            content,
            iterations_used,
            stopped_by_max_depth: true,
            tool_calls_history,
        }
    }
}
